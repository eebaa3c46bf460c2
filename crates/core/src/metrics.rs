//! Prometheus metrics owned by the core crate: catalog rows skipped at
//! ingest plus the query engine counters and histograms. The server
//! pulls all of them into its registry via [`all_metrics`].

use once_cell::sync::Lazy;
use prometheus::{Histogram, HistogramOpts, HistogramVec, IntCounterVec, Opts};

// =============================================================================
// Catalog Metrics
// =============================================================================

/// Source rows excluded at load time, by reason.
pub static CATALOG_ROWS_SKIPPED: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "shopsight_catalog_rows_skipped_total",
            "Total catalog source rows excluded at load time",
        ),
        &["reason"], // "missing_id", "duplicate_id"
    )
    .unwrap()
});

// =============================================================================
// Query Engine Metrics
// =============================================================================

/// Query operations total by operation name.
pub static QUERIES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("shopsight_queries_total", "Total query engine operations"),
        &["operation"], // "search", "details", "stock", "categories", ...
    )
    .unwrap()
});

/// Query operation duration in seconds.
pub static QUERY_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "shopsight_query_duration_seconds",
            "Duration of query engine operations",
        )
        .buckets(vec![0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5]),
        &["operation"],
    )
    .unwrap()
});

/// Products returned per result-set query.
pub static QUERY_RESULTS: Lazy<Histogram> = Lazy::new(|| {
    Histogram::with_opts(
        HistogramOpts::new(
            "shopsight_query_results",
            "Number of products returned per query",
        )
        .buckets(vec![0.0, 1.0, 5.0, 10.0, 25.0, 50.0, 100.0, 250.0]),
    )
    .unwrap()
});

/// Id lookups that found no product.
pub static LOOKUP_MISSES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "shopsight_lookup_misses_total",
            "Total id lookups that matched no product",
        ),
        &["operation"], // "details", "stock"
    )
    .unwrap()
});

// =============================================================================
// Export
// =============================================================================

/// Every core metric, boxed so a server registry can adopt them.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        // Catalog
        Box::new(CATALOG_ROWS_SKIPPED.clone()),
        // Query engine
        Box::new(QUERIES_TOTAL.clone()),
        Box::new(QUERY_DURATION.clone()),
        Box::new(QUERY_RESULTS.clone()),
        Box::new(LOOKUP_MISSES.clone()),
    ]
}
