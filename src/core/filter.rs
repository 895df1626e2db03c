//! Filter normalization for the sales listing endpoint
//!
//! Raw query parameters arrive as an ordered list of key/value pairs (a key
//! may repeat, and multi-value fields also accept a single comma-separated
//! string). [`SalesFilter::from_query_pairs`] turns them into a canonical
//! filter, applying the clamping, swapping and defaulting rules. The only
//! fallible rule is date validation; everything else degrades to a default.

use chrono::NaiveDate;

use crate::core::error::ApiError;

const DEFAULT_PAGE: i64 = 1;
const DEFAULT_LIMIT: i64 = 10;
const MAX_LIMIT: i64 = 100;
const AGE_FLOOR: i32 = 0;
const AGE_CEILING: i32 = 150;

/// Sortable columns, as a closed enum
///
/// User-supplied `sortBy` values are translated through this allow-list
/// before the column name is interpolated into the generated statement, so
/// an unsanitized identifier can never reach the SQL text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortColumn {
    #[default]
    Date,
    Quantity,
    CustomerName,
}

impl SortColumn {
    /// Resolve a raw `sortBy` value; anything unrecognized falls back to date
    pub fn from_param(raw: &str) -> Self {
        match raw {
            "date" => SortColumn::Date,
            "quantity" => SortColumn::Quantity,
            "customer_name" => SortColumn::CustomerName,
            _ => SortColumn::Date,
        }
    }

    /// The column identifier, safe to interpolate
    pub fn column(&self) -> &'static str {
        match self {
            SortColumn::Date => "date",
            SortColumn::Quantity => "quantity",
            SortColumn::CustomerName => "customer_name",
        }
    }
}

/// Sort direction; anything other than the literal `"asc"` means descending
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn from_param(raw: &str) -> Self {
        if raw == "asc" {
            SortOrder::Asc
        } else {
            SortOrder::Desc
        }
    }

    pub fn sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Canonical query descriptor for one sales listing request
///
/// Unset optional fields impose no constraint on that dimension. Constructed
/// per request; never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesFilter {
    pub search: Option<String>,
    pub regions: Option<Vec<String>>,
    pub gender: Option<Vec<String>>,
    pub age_min: Option<i32>,
    pub age_max: Option<i32>,
    pub categories: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    pub payment_methods: Option<Vec<String>>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub sort_by: SortColumn,
    pub sort_order: SortOrder,
    /// 1-indexed page number
    pub page: i64,
    /// Page size, between 1 and 100
    pub limit: i64,
}

impl Default for SalesFilter {
    fn default() -> Self {
        Self {
            search: None,
            regions: None,
            gender: None,
            age_min: None,
            age_max: None,
            categories: None,
            tags: None,
            payment_methods: None,
            date_from: None,
            date_to: None,
            sort_by: SortColumn::default(),
            sort_order: SortOrder::default(),
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl SalesFilter {
    /// Normalize raw query pairs into a canonical filter
    ///
    /// Pure transform; the only error is a malformed `dateFrom`/`dateTo`.
    pub fn from_query_pairs(pairs: &[(String, String)]) -> Result<Self, ApiError> {
        let search = single_value(pairs, "search")
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from);

        let mut age_min = int_value(pairs, "ageMin").map(|v| v.max(AGE_FLOOR));
        let mut age_max = int_value(pairs, "ageMax").map(|v| v.min(AGE_CEILING));
        if let (Some(lo), Some(hi)) = (age_min, age_max)
            && lo > hi
        {
            (age_min, age_max) = (age_max, age_min);
        }

        let date_from = date_value(pairs, "dateFrom")?;
        let date_to = date_value(pairs, "dateTo")?;

        let sort_by = single_value(pairs, "sortBy")
            .map(SortColumn::from_param)
            .unwrap_or_default();
        let sort_order = single_value(pairs, "sortOrder")
            .map(SortOrder::from_param)
            .unwrap_or_default();

        let page = int64_value(pairs, "page").unwrap_or(DEFAULT_PAGE).max(1);
        let mut limit = int64_value(pairs, "limit").unwrap_or(DEFAULT_LIMIT);
        if limit < 1 {
            limit = DEFAULT_LIMIT;
        }
        if limit > MAX_LIMIT {
            limit = MAX_LIMIT;
        }

        Ok(Self {
            search,
            regions: multi_values(pairs, "regions"),
            gender: multi_values(pairs, "gender"),
            age_min,
            age_max,
            categories: multi_values(pairs, "categories"),
            tags: multi_values(pairs, "tags"),
            payment_methods: multi_values(pairs, "paymentMethods"),
            date_from,
            date_to,
            sort_by,
            sort_order,
            page,
            limit,
        })
    }

    /// Row offset of the requested page
    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.limit
    }
}

/// First occurrence of a single-valued parameter
fn single_value<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

/// All occurrences of a multi-valued parameter, each split on commas,
/// trimmed, with empty tokens dropped. No surviving token means unset.
fn multi_values(pairs: &[(String, String)], key: &str) -> Option<Vec<String>> {
    let values: Vec<String> = pairs
        .iter()
        .filter(|(k, _)| k == key)
        .flat_map(|(_, v)| v.split(','))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect();
    if values.is_empty() { None } else { Some(values) }
}

fn int_value(pairs: &[(String, String)], key: &str) -> Option<i32> {
    single_value(pairs, key).and_then(|s| s.trim().parse().ok())
}

fn int64_value(pairs: &[(String, String)], key: &str) -> Option<i64> {
    single_value(pairs, key).and_then(|s| s.trim().parse().ok())
}

/// Parse a date parameter, requiring the literal `YYYY-MM-DD` shape and a
/// valid calendar date. Absent or empty means unset; anything else malformed
/// fails the whole request.
fn date_value(
    pairs: &[(String, String)],
    key: &'static str,
) -> Result<Option<NaiveDate>, ApiError> {
    match single_value(pairs, key) {
        None => Ok(None),
        Some("") => Ok(None),
        Some(raw) => parse_iso_date(raw)
            .map(Some)
            .ok_or(ApiError::InvalidDate { field: key }),
    }
}

fn parse_iso_date(raw: &str) -> Option<NaiveDate> {
    let bytes = raw.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }
    let digits_ok = bytes
        .iter()
        .enumerate()
        .all(|(i, b)| matches!(i, 4 | 7) || b.is_ascii_digit());
    if !digits_ok {
        return None;
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}
