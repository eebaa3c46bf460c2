//! CSV loader for the product catalog.
//!
//! The source is read exactly once. Per-row data problems (bad numbers,
//! bad booleans) are recovered with policy defaults; only an unreadable or
//! structurally unusable source fails the load.

use std::collections::HashSet;
use std::path::Path;

use csv::StringRecord;
use sha2::{Digest, Sha256};
use tracing::{info, warn};

use super::types::{LoadError, Product};
use super::Catalog;
use crate::metrics::CATALOG_ROWS_SKIPPED;

/// Load the catalog from a CSV file.
///
/// Column order is free; columns are resolved by header name
/// (case-insensitive). `product_id` and `name` columns are required, all
/// others are optional. Rows without a `product_id` value are skipped, as
/// are rows repeating an already-seen id (first occurrence wins).
pub fn load_catalog(path: &Path) -> Result<Catalog, LoadError> {
    let bytes = std::fs::read(path)?;
    let digest = source_digest(&bytes);

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(bytes.as_slice());

    let headers = reader
        .headers()
        .map_err(|e| LoadError::Malformed(e.to_string()))?
        .clone();
    let columns = ColumnMap::resolve(&headers)?;

    let mut products: Vec<Product> = Vec::new();
    let mut seen_ids: HashSet<String> = HashSet::new();
    let mut skipped: u64 = 0;

    for record in reader.records() {
        let record = record.map_err(|e| LoadError::Malformed(e.to_string()))?;
        match columns.parse_row(&record) {
            Some(product) => {
                if !seen_ids.insert(product.id.clone()) {
                    warn!(id = %product.id, "Skipping row with duplicate product_id");
                    CATALOG_ROWS_SKIPPED
                        .with_label_values(&["duplicate_id"])
                        .inc();
                    skipped += 1;
                    continue;
                }
                products.push(product);
            }
            None => {
                CATALOG_ROWS_SKIPPED.with_label_values(&["missing_id"]).inc();
                skipped += 1;
            }
        }
    }

    if products.is_empty() {
        return Err(LoadError::Empty);
    }

    info!(
        products = products.len(),
        skipped,
        digest = %digest,
        "Catalog loaded from {}",
        path.display()
    );

    Ok(Catalog::build(products, skipped, Some(digest)))
}

/// First 16 hex chars of the SHA-256 of the source bytes.
fn source_digest(bytes: &[u8]) -> String {
    let digest = format!("{:x}", Sha256::digest(bytes));
    digest[..16].to_string()
}

/// Header-name to column-index mapping for one source file.
struct ColumnMap {
    product_id: usize,
    name: usize,
    description: Option<usize>,
    price: Option<usize>,
    category: Option<usize>,
    brand: Option<usize>,
    color: Option<usize>,
    size: Option<usize>,
    material: Option<usize>,
    weight: Option<usize>,
    in_stock: Option<usize>,
    rating: Option<usize>,
}

impl ColumnMap {
    fn resolve(headers: &StringRecord) -> Result<Self, LoadError> {
        let find = |name: &str| headers.iter().position(|h| h.eq_ignore_ascii_case(name));

        Ok(Self {
            product_id: find("product_id").ok_or(LoadError::MissingColumn("product_id"))?,
            name: find("name").ok_or(LoadError::MissingColumn("name"))?,
            description: find("description"),
            price: find("price"),
            category: find("category"),
            brand: find("brand"),
            color: find("color"),
            size: find("size"),
            material: find("material"),
            weight: find("weight"),
            in_stock: find("in_stock"),
            rating: find("rating"),
        })
    }

    /// Map one record to a Product, or None when the id cell is empty.
    fn parse_row(&self, record: &StringRecord) -> Option<Product> {
        let id = text(record, Some(self.product_id))?;

        Some(Product {
            id,
            name: text(record, Some(self.name)).unwrap_or_default(),
            description: text(record, self.description).unwrap_or_default(),
            price: number(record, self.price).unwrap_or(0.0),
            category: text(record, self.category),
            brand: text(record, self.brand),
            color: text(record, self.color),
            size: text(record, self.size),
            material: text(record, self.material),
            weight: number(record, self.weight),
            in_stock: text(record, self.in_stock)
                .map(|v| truthy(&v))
                .unwrap_or(false),
            rating: number(record, self.rating).map(|r| r.clamp(0.0, 5.0)),
        })
    }
}

/// Non-empty cell value, if the column exists and the row reaches it.
fn text(record: &StringRecord, index: Option<usize>) -> Option<String> {
    let value = record.get(index?)?.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Finite numeric cell value; anything else counts as absent.
fn number(record: &StringRecord, index: Option<usize>) -> Option<f64> {
    text(record, index)?
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Truthy-string convention for the in_stock column.
fn truthy(value: &str) -> bool {
    matches!(
        value.to_ascii_lowercase().as_str(),
        "true" | "yes" | "1" | "y"
    )
}
