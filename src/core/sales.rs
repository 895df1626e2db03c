//! Row and vocabulary types for the sales transaction table

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

/// One retail transaction record
///
/// Immutable once seeded; there is no update or delete path. Every non-key
/// column is nullable because the offline batch load keeps rows with missing
/// fields.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct SalesTransaction {
    pub id: i32,
    pub transaction_id: Option<String>,
    pub date: Option<NaiveDate>,
    pub customer_id: Option<String>,
    pub customer_name: Option<String>,
    pub phone_number: Option<String>,
    pub gender: Option<String>,
    pub age: Option<i32>,
    pub customer_region: Option<String>,
    pub customer_type: Option<String>,
    pub product_id: Option<String>,
    pub product_name: Option<String>,
    pub brand: Option<String>,
    pub product_category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub quantity: Option<i32>,
    pub price_per_unit: Option<Decimal>,
    pub discount_percentage: Option<Decimal>,
    pub total_amount: Option<Decimal>,
    pub final_amount: Option<Decimal>,
    pub payment_method: Option<String>,
    pub order_status: Option<String>,
    pub delivery_type: Option<String>,
    pub store_id: Option<String>,
    pub store_location: Option<String>,
    pub salesperson_id: Option<String>,
    pub employee_name: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Inclusive numeric range reported to the UI
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgeRange {
    pub min: i32,
    pub max: i32,
}

/// Inclusive date range reported to the UI, as `YYYY-MM-DD` strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub min: String,
    pub max: String,
}

/// The distinct filterable vocabulary of the whole table
///
/// Used only to render UI filter choices; apart from age these are not
/// authoritative bounds enforced server-side.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    pub regions: Vec<String>,
    pub genders: Vec<String>,
    pub categories: Vec<String>,
    pub payment_methods: Vec<String>,
    pub tags: Vec<String>,
    pub age_range: AgeRange,
    pub date_range: DateRange,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_options_serialize_camel_case() {
        let options = FilterOptions {
            regions: vec!["North".to_string()],
            genders: vec![],
            categories: vec![],
            payment_methods: vec!["Card".to_string()],
            tags: vec![],
            age_range: AgeRange { min: 0, max: 100 },
            date_range: DateRange {
                min: "2020-01-01".to_string(),
                max: "2026-08-29".to_string(),
            },
        };
        let json = serde_json::to_value(&options).unwrap();
        assert_eq!(json["paymentMethods"][0], "Card");
        assert_eq!(json["ageRange"]["max"], 100);
        assert_eq!(json["dateRange"]["min"], "2020-01-01");
    }

    #[test]
    fn test_transaction_serializes_null_fields() {
        let row = SalesTransaction {
            id: 1,
            transaction_id: Some("TXN-001".to_string()),
            date: NaiveDate::from_ymd_opt(2024, 3, 5),
            customer_id: None,
            customer_name: Some("Alice".to_string()),
            phone_number: None,
            gender: None,
            age: Some(34),
            customer_region: Some("North".to_string()),
            customer_type: None,
            product_id: None,
            product_name: None,
            brand: None,
            product_category: None,
            tags: Some(vec!["sale".to_string()]),
            quantity: Some(2),
            price_per_unit: None,
            discount_percentage: None,
            total_amount: None,
            final_amount: None,
            payment_method: None,
            order_status: None,
            delivery_type: None,
            store_id: None,
            store_location: None,
            salesperson_id: None,
            employee_name: None,
            created_at: None,
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["date"], "2024-03-05");
        assert!(json["customer_id"].is_null());
        assert_eq!(json["tags"][0], "sale");
    }
}
