use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::{catalog, categories, handlers, products, tools};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    // API routes
    let api_routes = Router::new()
        // Service introspection
        .route("/health", get(handlers::health))
        .route("/config", get(handlers::get_config))
        // Catalog
        .route("/catalog/stats", get(catalog::get_stats))
        // Products
        .route("/products", get(products::search_products))
        .route("/products/featured", get(products::featured_products))
        .route("/products/{id}", get(products::get_product))
        .route("/products/{id}/stock", get(products::get_stock))
        // Categories and brands
        .route("/categories", get(categories::list_categories))
        .route(
            "/categories/{name}/products",
            get(categories::category_products),
        )
        .route("/brands", get(categories::list_brands))
        // Recommendations
        .route("/recommendations", post(products::recommend_products))
        // Tool dispatch
        .route("/tools", get(tools::list_tools))
        .route("/tools/invoke", post(tools::invoke_tool))
        .with_state(Arc::clone(&state));

    // Prometheus scrape endpoint lives outside the API prefix
    let metrics_route = Router::new()
        .route("/metrics", get(handlers::metrics))
        .with_state(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .merge(metrics_route)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(middleware::from_fn(super::middleware::metrics_middleware)),
        )
}
