//! Core module containing the filter, query and error types

pub mod error;
pub mod filter;
pub mod query;
pub mod sales;
pub mod service;

pub use error::ApiError;
pub use filter::{SalesFilter, SortColumn, SortOrder};
pub use query::{PaginationMeta, SalesPage};
pub use sales::{AgeRange, DateRange, FilterOptions, SalesTransaction};
pub use service::SalesService;
