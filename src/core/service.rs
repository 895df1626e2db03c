//! Service trait for sales queries
//!
//! The HTTP layer depends on this trait rather than on a concrete store, so
//! handlers can be tested against a mock and the Postgres implementation
//! stays isolated in `storage`.

use anyhow::Result;
use async_trait::async_trait;

use crate::core::filter::SalesFilter;
use crate::core::query::SalesPage;
use crate::core::sales::FilterOptions;

/// Read-only query surface over the sales transaction store
#[async_trait]
pub trait SalesService: Send + Sync {
    /// Fetch one page of transactions matching the filter, plus the total
    /// match count
    async fn get_sales(&self, filter: &SalesFilter) -> Result<SalesPage>;

    /// Fetch the distinct filterable vocabulary of the whole table
    async fn get_filter_options(&self) -> Result<FilterOptions>;
}
