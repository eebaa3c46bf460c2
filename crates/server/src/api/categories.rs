//! Category and brand API handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use shopsight_core::{CategoryCount, QueryResult};

use crate::state::AppState;

// ============================================================================
// Payload types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CategoryProductsParams {
    #[serde(default)]
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub categories: Vec<CategoryCount>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct BrandsResponse {
    pub brands: Vec<String>,
    pub total: usize,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/v1/categories
///
/// Distinct categories with product counts, sorted by name.
pub async fn list_categories(State(state): State<Arc<AppState>>) -> Json<CategoriesResponse> {
    let categories = state.engine().list_categories();
    let total = categories.len();
    Json(CategoriesResponse { categories, total })
}

/// GET /api/v1/categories/{name}/products
///
/// Products in one category; an unknown category yields an empty result,
/// not an error.
pub async fn category_products(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    Query(params): Query<CategoryProductsParams>,
) -> Json<QueryResult> {
    Json(state.engine().category_products(&name, params.limit))
}

/// GET /api/v1/brands
///
/// Distinct brands, sorted by name.
pub async fn list_brands(State(state): State<Arc<AppState>>) -> Json<BrandsResponse> {
    let brands = state.catalog().brands();
    let total = brands.len();
    Json(BrandsResponse { brands, total })
}
