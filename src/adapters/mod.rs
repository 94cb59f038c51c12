//! Adapters - implementations of ports against real infrastructure.

pub mod http;
pub mod position;
pub mod postgres;
