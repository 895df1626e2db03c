//! Storage implementation for the sales transaction table

pub mod postgres;

pub use postgres::PostgresSalesService;
