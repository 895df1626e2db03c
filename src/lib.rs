//! # Sales Explorer
//!
//! A read-only, filtered, paginated REST API over a PostgreSQL table of retail
//! sales transactions.
//!
//! ## Features
//!
//! - **Filter Normalization**: raw query parameters are clamped, swapped and
//!   defaulted into a canonical [`core::filter::SalesFilter`]
//! - **Dynamic Query Building**: optional filter dimensions compose into a
//!   parameterized statement via `sqlx::QueryBuilder`; the fetch and count
//!   statements share one predicate routine
//! - **Allow-Listed Sorting**: sortable columns are a closed enum, so no user
//!   identifier ever reaches the generated SQL
//! - **Filter Vocabulary**: a second endpoint reports the distinct values of
//!   every categorical dimension to drive UI filter controls
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use sales_explorer::prelude::*;
//!
//! let pool = sqlx::PgPool::connect(&database_url).await?;
//! let state = AppState {
//!     sales: Arc::new(PostgresSalesService::new(pool)),
//! };
//! let app = build_router(state);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod core;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        error::ApiError,
        filter::{SalesFilter, SortColumn, SortOrder},
        query::{PaginationMeta, SalesPage},
        sales::{AgeRange, DateRange, FilterOptions, SalesTransaction},
        service::SalesService,
    };

    // === Config ===
    pub use crate::config::AppConfig;

    // === Server ===
    pub use crate::server::{AppState, build_router, cors_layer};

    // === Storage ===
    pub use crate::storage::PostgresSalesService;

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::NaiveDate;
    pub use serde::{Deserialize, Serialize};
}
