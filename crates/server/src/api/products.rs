//! Product API handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};

use shopsight_core::{Product, QueryResult, SearchCriteria, StockStatus};

use crate::state::AppState;

// ============================================================================
// Payload types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct FeaturedParams {
    #[serde(default)]
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/v1/products
///
/// Search the catalog with optional filter/sort criteria.
pub async fn search_products(
    State(state): State<Arc<AppState>>,
    Query(criteria): Query<SearchCriteria>,
) -> Json<QueryResult> {
    Json(state.engine().search(&criteria))
}

/// GET /api/v1/products/featured
///
/// A stable sample of the catalog for browse surfaces.
pub async fn featured_products(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FeaturedParams>,
) -> Json<QueryResult> {
    Json(state.engine().featured(params.limit))
}

/// GET /api/v1/products/{id}
///
/// Full record for one product.
pub async fn get_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Product>, impl IntoResponse> {
    match state.engine().product_details(&id) {
        Ok(product) => Ok(Json(product)),
        Err(e) => Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )),
    }
}

/// GET /api/v1/products/{id}/stock
///
/// Availability for one product.
pub async fn get_stock(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<StockStatus>, impl IntoResponse> {
    match state.engine().check_stock(&id) {
        Ok(status) => Ok(Json(status)),
        Err(e) => Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )),
    }
}

/// POST /api/v1/recommendations
///
/// Rank matching products by rating blended with budget savings.
pub async fn recommend_products(
    State(state): State<Arc<AppState>>,
    Json(criteria): Json<SearchCriteria>,
) -> Json<QueryResult> {
    Json(state.engine().recommend(&criteria))
}
