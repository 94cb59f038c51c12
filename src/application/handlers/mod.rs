//! Command handlers.

pub mod ussd;
