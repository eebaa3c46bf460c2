//! Wire types for the tool-call boundary.

use serde::{Deserialize, Serialize};

use crate::catalog::{CategoryCount, Product};
use crate::query::{ProductSummary, SearchCriteria};

/// One invocation of a catalog tool, decoded from agent output.
///
/// The set is closed: the model picks among these variants and nothing
/// else. Decoding doubles as argument validation, so a payload that does
/// not match a variant's schema is rejected before any dispatch happens.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "tool", rename_all = "snake_case")]
pub enum ToolRequest {
    /// Filtered catalog search.
    SearchProducts {
        #[serde(flatten)]
        criteria: SearchCriteria,
    },

    /// Full record for one product.
    GetProductDetails {
        /// Product identifier to look up.
        product_id: String,
    },

    /// Stock flag for one product.
    CheckStock {
        /// Product identifier to look up.
        product_id: String,
    },

    /// All categories with product counts.
    ListCategories,

    /// Products within one category.
    GetCategoryProducts {
        /// Category label (case-insensitive exact match).
        category: String,
        /// Maximum products to return.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        limit: Option<usize>,
    },

    /// Best-effort ranked suggestions.
    RecommendProducts {
        /// Free-text interest to narrow the candidate set.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        keyword: Option<String>,
        /// Restrict suggestions to one category.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        category: Option<String>,
        /// Upper price bound; cheaper products rank higher under it.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        budget: Option<f64>,
        /// Minimum acceptable rating.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min_rating: Option<f64>,
        /// Maximum suggestions to return.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        limit: Option<usize>,
    },
}

impl ToolRequest {
    /// Wire name of the requested tool.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SearchProducts { .. } => "search_products",
            Self::GetProductDetails { .. } => "get_product_details",
            Self::CheckStock { .. } => "check_stock",
            Self::ListCategories => "list_categories",
            Self::GetCategoryProducts { .. } => "get_category_products",
            Self::RecommendProducts { .. } => "recommend_products",
        }
    }
}

/// Result payload for one tool invocation.
///
/// Every request variant maps onto one of these. Not-found is a payload,
/// not an error: the agent must always have something to relay.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum ToolResponse {
    /// Result set from search-like operations.
    Products {
        products: Vec<ProductSummary>,
        total_matches: u64,
        count: u64,
    },

    /// Single full product record.
    Product { product: Product },

    /// Stock flag for one product.
    Stock {
        product_id: String,
        name: String,
        in_stock: bool,
    },

    /// Category listing.
    Categories {
        categories: Vec<CategoryCount>,
        total: u64,
    },

    /// Id lookup that matched nothing.
    NotFound { product_id: String, message: String },
}

impl ToolResponse {
    /// Coarse outcome label for metrics.
    pub fn outcome(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "not_found",
            _ => "ok",
        }
    }
}

/// Describes one callable tool to the agent layer.
#[derive(Debug, Clone, Serialize)]
pub struct ToolDescriptor {
    /// Wire name the agent sends in `tool`.
    pub name: &'static str,
    /// Human/model readable summary of what the tool answers.
    pub description: &'static str,
    /// Accepted argument names.
    pub parameters: &'static [&'static str],
}
