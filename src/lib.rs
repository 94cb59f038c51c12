//! Tuza USSD - Session-menu backend for mortuary pickup bookings
//!
//! Answers successive USSD gateway callbacks for one subscriber session,
//! replying each time with the next menu prompt or a terminal message while
//! tracking the subscriber's position in the menu tree.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
