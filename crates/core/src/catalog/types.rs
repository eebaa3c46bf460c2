//! Types for the product catalog.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single product record in the catalog snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Unique product identifier, assigned at data-authoring time.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Free-text description (empty when the source has none).
    #[serde(default)]
    pub description: String,
    /// Unit price. Malformed source values load as 0.
    pub price: f64,
    /// Category label (e.g., "Electronics").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Brand label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    /// Color variant.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Size variant.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    /// Material.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    /// Weight in the source's unit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    /// Whether the product is currently in stock.
    pub in_stock: bool,
    /// Average rating in [0, 5], absent when unrated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
}

/// A category with its product count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    /// Category label.
    pub category: String,
    /// Number of products in the category.
    pub count: u64,
}

/// Catalog snapshot statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogStats {
    /// Total products in the snapshot.
    pub total_products: u64,
    /// Products currently in stock.
    pub in_stock_count: u64,
    /// Distinct categories.
    pub category_count: u64,
    /// Distinct brands.
    pub brand_count: u64,
    /// Lowest price in the catalog.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_min: Option<f64>,
    /// Highest price in the catalog.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_max: Option<f64>,
    /// When the snapshot was built.
    pub loaded_at: DateTime<Utc>,
    /// Short SHA-256 digest of the source bytes (absent for in-memory catalogs).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_digest: Option<String>,
    /// Source rows excluded at load time (missing or duplicate id).
    pub skipped_rows: u64,
}

/// Errors raised while loading the catalog source.
///
/// All of these are fatal at startup; per-row data problems are recovered
/// with policy defaults instead and never surface here.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read catalog source: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed catalog source: {0}")]
    Malformed(String),

    #[error("Missing required column: {0}")]
    MissingColumn(&'static str),

    #[error("Catalog source has no usable rows")]
    Empty,
}
