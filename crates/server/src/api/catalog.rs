//! Catalog statistics endpoint.

use std::sync::Arc;

use axum::{extract::State, Json};

use shopsight_core::CatalogStats;

use crate::state::AppState;

/// GET /api/v1/catalog/stats
///
/// Statistics computed once at load time.
pub async fn get_stats(State(state): State<Arc<AppState>>) -> Json<CatalogStats> {
    Json(state.catalog().stats().clone())
}
