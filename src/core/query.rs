//! Dynamic statement building and pagination types
//!
//! One request produces two statements over `sales_transactions`: a fetch
//! carrying `ORDER BY` plus bound `LIMIT`/`OFFSET`, and a bare `COUNT(*)`.
//! Both are assembled through [`push_predicates`], so their predicate text
//! and bind ordering can never drift apart, and pagination binds exist only
//! on the fetch statement.
//!
//! Every user value goes through `push_bind`. The only interpolated
//! identifiers are the sort column and direction, which come from the closed
//! [`SortColumn`]/[`SortOrder`] enums.

use serde::Serialize;
use sqlx::{Postgres, QueryBuilder};

use crate::core::filter::SalesFilter;
use crate::core::sales::SalesTransaction;

/// Fixed projection; no column list is user-controllable.
const SELECT_SQL: &str = "SELECT \
     id, transaction_id, date, customer_id, customer_name, phone_number, \
     gender, age, customer_region, customer_type, product_id, product_name, \
     brand, product_category, tags, quantity, price_per_unit, \
     discount_percentage, total_amount, final_amount, payment_method, \
     order_status, delivery_type, store_id, store_location, salesperson_id, \
     employee_name, created_at \
     FROM sales_transactions";

const COUNT_SQL: &str = "SELECT COUNT(*) FROM sales_transactions";

/// Build the row-fetching statement for a filter
pub fn fetch_query(filter: &SalesFilter) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(SELECT_SQL);
    push_predicates(&mut qb, filter);
    qb.push(" ORDER BY ");
    qb.push(filter.sort_by.column());
    qb.push(" ");
    qb.push(filter.sort_order.sql());
    qb.push(" LIMIT ");
    qb.push_bind(filter.limit);
    qb.push(" OFFSET ");
    qb.push_bind(filter.offset());
    qb
}

/// Build the matching-row count statement for the same filter
pub fn count_query(filter: &SalesFilter) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(COUNT_SQL);
    push_predicates(&mut qb, filter);
    qb
}

/// Append the `WHERE` clause for every supplied filter dimension
///
/// Dimensions combine with `AND`. Within a dimension, set membership uses
/// `= ANY`, tags use array overlap (`&&`), and range bounds are inclusive and
/// independently applicable. Bind declaration order: search, regions, gender,
/// ageMin, ageMax, categories, tags, paymentMethods, dateFrom, dateTo.
fn push_predicates(qb: &mut QueryBuilder<'static, Postgres>, filter: &SalesFilter) {
    let mut first = true;

    if let Some(search) = &filter.search {
        // QueryBuilder assigns a fresh placeholder per push_bind, so the
        // pattern is bound once per column.
        let pattern = format!("%{}%", search);
        push_separator(qb, &mut first);
        qb.push("(customer_name ILIKE ");
        qb.push_bind(pattern.clone());
        qb.push(" OR phone_number ILIKE ");
        qb.push_bind(pattern);
        qb.push(")");
    }

    if let Some(regions) = &filter.regions {
        push_separator(qb, &mut first);
        qb.push("customer_region = ANY(");
        qb.push_bind(regions.clone());
        qb.push(")");
    }

    if let Some(gender) = &filter.gender {
        push_separator(qb, &mut first);
        qb.push("gender = ANY(");
        qb.push_bind(gender.clone());
        qb.push(")");
    }

    if let Some(age_min) = filter.age_min {
        push_separator(qb, &mut first);
        qb.push("age >= ");
        qb.push_bind(age_min);
    }

    if let Some(age_max) = filter.age_max {
        push_separator(qb, &mut first);
        qb.push("age <= ");
        qb.push_bind(age_max);
    }

    if let Some(categories) = &filter.categories {
        push_separator(qb, &mut first);
        qb.push("product_category = ANY(");
        qb.push_bind(categories.clone());
        qb.push(")");
    }

    if let Some(tags) = &filter.tags {
        // Overlap: any supplied tag present in the row's tag set suffices.
        push_separator(qb, &mut first);
        qb.push("tags && ");
        qb.push_bind(tags.clone());
    }

    if let Some(payment_methods) = &filter.payment_methods {
        push_separator(qb, &mut first);
        qb.push("payment_method = ANY(");
        qb.push_bind(payment_methods.clone());
        qb.push(")");
    }

    if let Some(date_from) = filter.date_from {
        push_separator(qb, &mut first);
        qb.push("date >= ");
        qb.push_bind(date_from);
    }

    if let Some(date_to) = filter.date_to {
        push_separator(qb, &mut first);
        qb.push("date <= ");
        qb.push_bind(date_to);
    }
}

fn push_separator(qb: &mut QueryBuilder<'static, Postgres>, first: &mut bool) {
    if *first {
        qb.push(" WHERE ");
        *first = false;
    } else {
        qb.push(" AND ");
    }
}

/// Pagination metadata returned alongside every page
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    /// Current page number (starts at 1)
    pub page: i64,

    /// Number of rows per page
    pub limit: i64,

    /// Total number of matching rows
    pub total: i64,

    /// Total number of pages; zero when nothing matches
    pub total_pages: i64,
}

impl PaginationMeta {
    pub fn new(page: i64, limit: i64, total: i64) -> Self {
        // Guard against division by zero; the normalizer already enforces
        // limit >= 1.
        let limit = limit.max(1);
        let total_pages = if total == 0 { 0 } else { (total + limit - 1) / limit };
        Self {
            page,
            limit,
            total,
            total_pages,
        }
    }
}

/// One page of matching transactions plus its metadata
#[derive(Debug, Clone, Serialize)]
pub struct SalesPage {
    pub data: Vec<SalesTransaction>,
    pub pagination: PaginationMeta,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::filter::{SortColumn, SortOrder};
    use sqlx::Execute;

    fn sql_of(mut qb: QueryBuilder<'static, Postgres>) -> String {
        qb.build().sql().to_string()
    }

    #[test]
    fn test_unfiltered_fetch_has_no_where_clause() {
        let filter = SalesFilter::default();
        let sql = sql_of(fetch_query(&filter));
        assert!(!sql.contains("WHERE"));
        assert!(sql.contains("ORDER BY date DESC"));
        assert!(sql.ends_with("LIMIT $1 OFFSET $2"));
    }

    #[test]
    fn test_unfiltered_count_has_no_binds() {
        let filter = SalesFilter::default();
        let sql = sql_of(count_query(&filter));
        assert_eq!(sql, "SELECT COUNT(*) FROM sales_transactions");
    }

    #[test]
    fn test_search_binds_both_columns() {
        let filter = SalesFilter {
            search: Some("alice".to_string()),
            ..Default::default()
        };
        let sql = sql_of(count_query(&filter));
        assert!(sql.contains("(customer_name ILIKE $1 OR phone_number ILIKE $2)"));
    }

    #[test]
    fn test_set_membership_and_overlap_operators() {
        let filter = SalesFilter {
            regions: Some(vec!["North".to_string()]),
            tags: Some(vec!["sale".to_string(), "new".to_string()]),
            ..Default::default()
        };
        let sql = sql_of(count_query(&filter));
        assert!(sql.contains("customer_region = ANY($1)"));
        assert!(sql.contains("tags && $2"));
    }

    #[test]
    fn test_dimensions_joined_with_and() {
        let filter = SalesFilter {
            gender: Some(vec!["Female".to_string()]),
            age_min: Some(25),
            age_max: Some(45),
            ..Default::default()
        };
        let sql = sql_of(count_query(&filter));
        assert!(
            sql.contains("WHERE gender = ANY($1) AND age >= $2 AND age <= $3"),
            "unexpected sql: {sql}"
        );
    }

    #[test]
    fn test_single_sided_bounds() {
        let lower_only = SalesFilter {
            age_min: Some(30),
            ..Default::default()
        };
        let sql = sql_of(count_query(&lower_only));
        assert!(sql.contains("age >= $1"));
        assert!(!sql.contains("age <="));

        let upper_only = SalesFilter {
            date_to: chrono::NaiveDate::from_ymd_opt(2024, 6, 1),
            ..Default::default()
        };
        let sql = sql_of(count_query(&upper_only));
        assert!(sql.contains("date <= $1"));
        assert!(!sql.contains("date >="));
    }

    #[test]
    fn test_bind_declaration_order_with_all_dimensions() {
        let filter = SalesFilter {
            search: Some("alice".to_string()),
            regions: Some(vec!["North".to_string()]),
            gender: Some(vec!["Female".to_string()]),
            age_min: Some(25),
            age_max: Some(45),
            categories: Some(vec!["Electronics".to_string()]),
            tags: Some(vec!["sale".to_string()]),
            payment_methods: Some(vec!["Card".to_string()]),
            date_from: chrono::NaiveDate::from_ymd_opt(2024, 1, 1),
            date_to: chrono::NaiveDate::from_ymd_opt(2024, 6, 30),
            ..Default::default()
        };

        let count_sql = sql_of(count_query(&filter));
        let expected = "SELECT COUNT(*) FROM sales_transactions WHERE \
             (customer_name ILIKE $1 OR phone_number ILIKE $2) \
             AND customer_region = ANY($3) \
             AND gender = ANY($4) \
             AND age >= $5 \
             AND age <= $6 \
             AND product_category = ANY($7) \
             AND tags && $8 \
             AND payment_method = ANY($9) \
             AND date >= $10 \
             AND date <= $11";
        assert_eq!(count_sql, expected);

        // The fetch statement shares the predicate text and appends exactly
        // two pagination binds.
        let fetch_sql = sql_of(fetch_query(&filter));
        assert!(fetch_sql.contains("date <= $11"));
        assert!(fetch_sql.ends_with("LIMIT $12 OFFSET $13"));
    }

    #[test]
    fn test_sort_selection_reaches_order_by() {
        let filter = SalesFilter {
            sort_by: SortColumn::Quantity,
            sort_order: SortOrder::Asc,
            ..Default::default()
        };
        let sql = sql_of(fetch_query(&filter));
        assert!(sql.contains("ORDER BY quantity ASC"));
    }

    #[test]
    fn test_projection_is_fixed() {
        let sql = sql_of(fetch_query(&SalesFilter::default()));
        for column in ["transaction_id", "tags", "final_amount", "created_at"] {
            assert!(sql.contains(column), "missing column {column}");
        }
    }

    #[test]
    fn test_pagination_meta_ceiling() {
        let meta = PaginationMeta::new(1, 10, 101);
        assert_eq!(meta.total_pages, 11);

        let meta = PaginationMeta::new(1, 10, 100);
        assert_eq!(meta.total_pages, 10);

        let meta = PaginationMeta::new(2, 5, 12);
        assert_eq!(meta.total_pages, 3);
    }

    #[test]
    fn test_pagination_meta_empty_result() {
        let meta = PaginationMeta::new(1, 10, 0);
        assert_eq!(meta.total_pages, 0);
        assert_eq!(meta.total, 0);
    }

    #[test]
    fn test_pagination_meta_serializes_camel_case() {
        let meta = PaginationMeta::new(2, 5, 12);
        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(json["totalPages"], 3);
        assert_eq!(json["page"], 2);
    }
}
