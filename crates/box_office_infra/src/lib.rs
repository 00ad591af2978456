#![forbid(unsafe_code)]

pub mod config;
pub mod discounts;
pub mod store;
pub mod telemetry;
