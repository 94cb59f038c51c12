//! HTTP adapters (axum).

pub mod ussd;
