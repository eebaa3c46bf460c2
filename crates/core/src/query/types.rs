//! Types for the catalog query engine.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::Product;

/// Sort key for search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Price,
    Rating,
    Name,
}

impl SortKey {
    /// Parse a sort key, None for anything unrecognized.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "price" => Some(Self::Price),
            "rating" => Some(Self::Rating),
            "name" => Some(Self::Name),
            _ => None,
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    /// Parse a direction, None for anything unrecognized.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "ascending" | "asc" => Some(Self::Ascending),
            "descending" | "desc" => Some(Self::Descending),
            _ => None,
        }
    }
}

/// Structured filter/sort criteria for catalog searches.
///
/// Every field is optional; absence means no constraint. The values come
/// from natural-language-derived agent output, so decoding is lenient:
/// unknown sort keys and directions fall back to defaults instead of
/// failing the call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchCriteria {
    /// Case-insensitive substring matched against name, description,
    /// category, and brand.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    /// Exact category match (case-insensitive).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Exact brand match (case-insensitive).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    /// Inclusive lower price bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    /// Inclusive upper price bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
    /// Inclusive minimum rating; unrated products never satisfy it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_rating: Option<f64>,
    /// When true, out-of-stock products are excluded.
    #[serde(default)]
    pub in_stock_only: bool,
    /// Sort key; results keep catalog load order when absent.
    #[serde(
        default,
        deserialize_with = "lenient_sort_key",
        skip_serializing_if = "Option::is_none"
    )]
    pub sort_by: Option<SortKey>,
    /// Sort direction, ascending by default.
    #[serde(default, deserialize_with = "lenient_sort_order")]
    pub order: SortOrder,
    /// Maximum products to return; the engine default cap applies when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

fn lenient_sort_key<'de, D>(deserializer: D) -> Result<Option<SortKey>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.as_deref().and_then(SortKey::parse))
}

fn lenient_sort_order<'de, D>(deserializer: D) -> Result<SortOrder, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value
        .as_deref()
        .and_then(SortOrder::parse)
        .unwrap_or_default())
}

/// Lightweight product projection for result sets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSummary {
    /// Product identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Unit price.
    pub price: f64,
    /// Category label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Brand label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    /// Average rating in [0, 5].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    /// Whether the product is in stock.
    pub in_stock: bool,
}

impl From<&Product> for ProductSummary {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            category: product.category.clone(),
            brand: product.brand.clone(),
            rating: product.rating,
            in_stock: product.in_stock,
        }
    }
}

/// An ordered result set with match accounting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    /// Products after sorting and truncation.
    pub products: Vec<ProductSummary>,
    /// Matches before the limit was applied.
    pub total_matches: u64,
    /// Products actually returned.
    pub count: u64,
}

/// Stock lookup outcome for one product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockStatus {
    /// Product identifier.
    pub product_id: String,
    /// Display name.
    pub name: String,
    /// Current stock flag from the snapshot.
    pub in_stock: bool,
}

/// Errors for query operations.
///
/// Not-found is an expected outcome here: the caller relays it to the end
/// user as a normal answer, so it must stay distinguishable from faults.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("Product not found: {0}")]
    ProductNotFound(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_criteria_defaults() {
        let criteria: SearchCriteria = serde_json::from_str("{}").unwrap();
        assert!(criteria.keyword.is_none());
        assert!(criteria.sort_by.is_none());
        assert_eq!(criteria.order, SortOrder::Ascending);
        assert!(!criteria.in_stock_only);
        assert!(criteria.limit.is_none());
    }

    #[test]
    fn test_criteria_full_decode() {
        let json = r#"{
            "keyword": "shoe",
            "category": "Footwear",
            "min_price": 10,
            "max_price": 100.5,
            "min_rating": 4,
            "in_stock_only": true,
            "sort_by": "price",
            "order": "descending",
            "limit": 5
        }"#;
        let criteria: SearchCriteria = serde_json::from_str(json).unwrap();
        assert_eq!(criteria.keyword.as_deref(), Some("shoe"));
        assert_eq!(criteria.sort_by, Some(SortKey::Price));
        assert_eq!(criteria.order, SortOrder::Descending);
        assert_eq!(criteria.limit, Some(5));
    }

    #[test]
    fn test_unknown_sort_key_is_ignored() {
        let json = r#"{"sort_by": "popularity", "order": "sideways"}"#;
        let criteria: SearchCriteria = serde_json::from_str(json).unwrap();
        assert!(criteria.sort_by.is_none());
        assert_eq!(criteria.order, SortOrder::Ascending);
    }

    #[test]
    fn test_sort_order_shorthands() {
        assert_eq!(SortOrder::parse("desc"), Some(SortOrder::Descending));
        assert_eq!(SortOrder::parse("ASC"), Some(SortOrder::Ascending));
        assert_eq!(SortOrder::parse("random"), None);
    }

    #[test]
    fn test_sort_key_parse() {
        assert_eq!(SortKey::parse("Price"), Some(SortKey::Price));
        assert_eq!(SortKey::parse(" rating "), Some(SortKey::Rating));
        assert_eq!(SortKey::parse("newest"), None);
    }

    #[test]
    fn test_product_summary_from_product() {
        let product = Product {
            id: "P1".to_string(),
            name: "Desk".to_string(),
            description: "A desk".to_string(),
            price: 150.0,
            category: Some("Office".to_string()),
            brand: Some("Acme".to_string()),
            color: Some("Oak".to_string()),
            size: None,
            material: Some("Wood".to_string()),
            weight: Some(22.5),
            in_stock: true,
            rating: Some(4.2),
        };

        let summary = ProductSummary::from(&product);
        assert_eq!(summary.id, "P1");
        assert_eq!(summary.price, 150.0);
        assert_eq!(summary.rating, Some(4.2));

        let json = serde_json::to_string(&summary).unwrap();
        assert!(!json.contains("description"));
        assert!(!json.contains("material"));
    }
}
