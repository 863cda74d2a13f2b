//! Data models shared by extraction, forecasting and the CLI.

pub mod config;
pub mod fields;
pub mod forecast;
pub mod sales;
