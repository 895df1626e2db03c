//! HTTP handlers for the sales API
//!
//! Requests flow: query pairs → filter normalization → service call → JSON
//! envelope. Date validation happens before any store access; store failures
//! surface as the generic 500 via [`ApiError`].

use axum::Json;
use axum::extract::{Query, State};
use serde::Serialize;
use serde_json::{Value, json};
use std::sync::Arc;

use crate::core::error::ApiError;
use crate::core::filter::SalesFilter;
use crate::core::query::PaginationMeta;
use crate::core::sales::{FilterOptions, SalesTransaction};
use crate::core::service::SalesService;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub sales: Arc<dyn SalesService>,
}

/// Response for the sales listing endpoint
#[derive(Debug, Serialize)]
pub struct SalesListResponse {
    pub success: bool,
    pub data: Vec<SalesTransaction>,
    pub pagination: PaginationMeta,
}

/// Response for the filter options endpoint
#[derive(Debug, Serialize)]
pub struct FilterOptionsResponse {
    pub success: bool,
    pub data: FilterOptions,
}

/// GET /api/sales
///
/// Query parameters: `search`, `regions`, `gender`, `categories`, `tags`,
/// `paymentMethods` (repeated keys and/or comma-separated), `ageMin`,
/// `ageMax`, `dateFrom`, `dateTo`, `sortBy`, `sortOrder`, `page`, `limit`.
///
/// The raw pairs are extracted as a list so repeated keys survive; a plain
/// struct extractor would reject them.
pub async fn list_sales(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<SalesListResponse>, ApiError> {
    let filter = SalesFilter::from_query_pairs(&params)?;
    let page = state.sales.get_sales(&filter).await?;
    Ok(Json(SalesListResponse {
        success: true,
        data: page.data,
        pagination: page.pagination,
    }))
}

/// GET /api/sales/filters
pub async fn filter_options(
    State(state): State<AppState>,
) -> Result<Json<FilterOptionsResponse>, ApiError> {
    let options = state.sales.get_filter_options().await?;
    Ok(Json(FilterOptionsResponse {
        success: true,
        data: options,
    }))
}

/// GET / — liveness document
pub async fn health() -> Json<Value> {
    Json(json!({
        "success": true,
        "message": "Sales Management API is running",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
