//! Router assembly for the sales API

pub mod handlers;

pub use handlers::AppState;

use anyhow::{Context, Result};
use axum::Router;
use axum::http::{HeaderValue, Method, header};
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Build the API router
///
/// Routes:
/// - GET /                  - liveness document
/// - GET /api/sales         - filtered, paginated transaction listing
/// - GET /api/sales/filters - distinct filter vocabulary
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::health))
        .route("/api/sales", get(handlers::list_sales))
        .route("/api/sales/filters", get(handlers::filter_options))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS layer restricted to the frontend origin
pub fn cors_layer(frontend_url: &str) -> Result<CorsLayer> {
    let origin: HeaderValue = frontend_url
        .parse()
        .with_context(|| format!("invalid frontend origin '{frontend_url}'"))?;
    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true))
}
