//! Prometheus metrics for the HTTP layer.
//!
//! Covers request latency/counts/in-flight, tool invocations by outcome,
//! and catalog-size gauges refreshed on every scrape. Core metrics from
//! `shopsight_core` are adopted into the same registry.

use once_cell::sync::Lazy;
use prometheus::{
    self, Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder,
};

/// Process-wide metrics registry.
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    register_metrics(&registry);
    registry
});

// =============================================================================
// Request metrics
// =============================================================================

/// Latency histogram for every HTTP request.
pub static HTTP_REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "shopsight_http_request_duration_seconds",
            "HTTP request latency in seconds",
        )
        .buckets(vec![
            0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
        ]),
        &["method", "path", "status"],
    )
    .unwrap()
});

/// Counter of finished HTTP requests.
pub static HTTP_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("shopsight_http_requests_total", "Total HTTP requests"),
        &["method", "path", "status"],
    )
    .unwrap()
});

/// Gauge of requests currently being handled.
pub static HTTP_REQUESTS_IN_FLIGHT: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "shopsight_http_requests_in_flight",
        "HTTP requests currently in flight",
    )
    .unwrap()
});

// =============================================================================
// Tool Invocation Metrics
// =============================================================================

/// Tool invocations by tool name and outcome.
pub static TOOL_INVOCATIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "shopsight_tool_invocations_total",
            "Total tool invocations dispatched to the query engine",
        ),
        &["tool", "outcome"],
    )
    .unwrap()
});

// =============================================================================
// Catalog gauges (refreshed on scrape)
// =============================================================================

/// Products in the loaded catalog.
pub static CATALOG_PRODUCTS: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "shopsight_catalog_products",
        "Number of products in the loaded catalog",
    )
    .unwrap()
});

/// Products currently in stock.
pub static CATALOG_IN_STOCK: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "shopsight_catalog_products_in_stock",
        "Number of catalog products currently in stock",
    )
    .unwrap()
});

// =============================================================================
// Registry wiring
// =============================================================================

fn register_metrics(registry: &Registry) {
    // HTTP
    registry
        .register(Box::new(HTTP_REQUEST_DURATION.clone()))
        .unwrap();
    registry
        .register(Box::new(HTTP_REQUESTS_TOTAL.clone()))
        .unwrap();
    registry
        .register(Box::new(HTTP_REQUESTS_IN_FLIGHT.clone()))
        .unwrap();

    // Tools
    registry
        .register(Box::new(TOOL_INVOCATIONS_TOTAL.clone()))
        .unwrap();

    // Catalog
    registry
        .register(Box::new(CATALOG_PRODUCTS.clone()))
        .unwrap();
    registry
        .register(Box::new(CATALOG_IN_STOCK.clone()))
        .unwrap();

    // Core metrics (loader and query engine)
    for metric in shopsight_core::metrics::all_metrics() {
        registry.register(metric).unwrap();
    }
}

/// Render every registered metric in Prometheus text format.
pub fn encode_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer).unwrap();
    String::from_utf8(buffer).unwrap()
}

/// Refresh gauges that mirror application state.
///
/// Called before encoding so the catalog gauges reflect the loaded
/// snapshot rather than whatever they were last set to.
pub fn collect_dynamic_metrics(state: &crate::state::AppState) {
    let stats = state.catalog().stats();
    CATALOG_PRODUCTS.set(stats.total_products as i64);
    CATALOG_IN_STOCK.set(stats.in_stock_count as i64);
}

/// Normalize a path for metric labels (replace route parameters with placeholders).
pub fn normalize_path(path: &str) -> String {
    // Fixed route that would otherwise look like a product id.
    if path == "/api/v1/products/featured" {
        return path.to_string();
    }

    let stock_regex = regex_lite::Regex::new(r"^/api/v1/products/[^/]+/stock$").unwrap();
    let product_regex = regex_lite::Regex::new(r"^/api/v1/products/[^/]+$").unwrap();
    let category_regex = regex_lite::Regex::new(r"^/api/v1/categories/[^/]+/products$").unwrap();

    if stock_regex.is_match(path) {
        return "/api/v1/products/{id}/stock".to_string();
    }
    if product_regex.is_match(path) {
        return "/api/v1/products/{id}".to_string();
    }
    if category_regex.is_match(path) {
        return "/api/v1/categories/{name}/products".to_string();
    }
    path.to_string()
}
