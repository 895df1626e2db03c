//! PostgreSQL-backed implementation of [`SalesService`]
//!
//! Executes the statements produced by `core::query` against a pooled
//! connection set. The fetch/count pair of one page request has no mutual
//! ordering requirement and runs concurrently, as do the five vocabulary
//! queries; each acquires its own connection from the pool.

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use tracing::error;

use crate::core::filter::SalesFilter;
use crate::core::query::{PaginationMeta, SalesPage, count_query, fetch_query};
use crate::core::sales::{AgeRange, DateRange, FilterOptions, SalesTransaction};
use crate::core::service::SalesService;

/// Lower bound of the date range advertised to the UI; the table holds no
/// earlier transactions.
const DATE_RANGE_MIN: &str = "2020-01-01";

/// Fixed age range advertised to the UI. Intentionally narrower than the
/// normalizer's 150 ceiling; it is a rendering hint, not a server-side bound.
const AGE_RANGE: AgeRange = AgeRange { min: 0, max: 100 };

/// Sales query service backed by PostgreSQL
#[derive(Clone, Debug)]
pub struct PostgresSalesService {
    pool: PgPool,
}

impl PostgresSalesService {
    /// Create a new `PostgresSalesService` with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SalesService for PostgresSalesService {
    async fn get_sales(&self, filter: &SalesFilter) -> Result<SalesPage> {
        let mut fetch = fetch_query(filter);
        let mut count = count_query(filter);

        let (data, total) = tokio::try_join!(
            fetch
                .build_query_as::<SalesTransaction>()
                .fetch_all(&self.pool),
            count.build_query_scalar::<i64>().fetch_one(&self.pool),
        )
        .inspect_err(|e| error!(error = %e, "sales page query failed"))?;

        Ok(SalesPage {
            pagination: PaginationMeta::new(filter.page, filter.limit, total),
            data,
        })
    }

    async fn get_filter_options(&self) -> Result<FilterOptions> {
        let (regions, genders, categories, payment_methods, tags) = tokio::try_join!(
            distinct_column(&self.pool, "customer_region"),
            distinct_column(&self.pool, "gender"),
            distinct_column(&self.pool, "product_category"),
            distinct_column(&self.pool, "payment_method"),
            distinct_tags(&self.pool),
        )
        .inspect_err(|e| error!(error = %e, "filter options query failed"))?;

        Ok(FilterOptions {
            regions,
            genders,
            categories,
            payment_methods,
            tags,
            age_range: AGE_RANGE,
            date_range: DateRange {
                min: DATE_RANGE_MIN.to_string(),
                max: Utc::now().date_naive().to_string(),
            },
        })
    }
}

/// Distinct non-null values of one categorical column, sorted ascending
///
/// The column name is a compile-time constant supplied by the caller, never
/// user input.
async fn distinct_column(pool: &PgPool, column: &'static str) -> sqlx::Result<Vec<String>> {
    let sql = format!(
        "SELECT DISTINCT {column} FROM sales_transactions \
         WHERE {column} IS NOT NULL ORDER BY {column}"
    );
    sqlx::query_scalar(&sql).fetch_all(pool).await
}

/// Distinct elements across all tag sets, flattened before distincting
///
/// NULL array elements are dropped; the batch load keeps dirty rows and a
/// NULL tag would otherwise fail the string decode.
const DISTINCT_TAGS_SQL: &str = "SELECT DISTINCT tag FROM \
     (SELECT UNNEST(tags) AS tag FROM sales_transactions) AS flattened \
     WHERE tag IS NOT NULL ORDER BY tag";

async fn distinct_tags(pool: &PgPool) -> sqlx::Result<Vec<String>> {
    sqlx::query_scalar(DISTINCT_TAGS_SQL).fetch_all(pool).await
}
