//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `subscriber` - Subscriber registration and temporary PIN issuance
//! - `claim` - Pickup bookings, deceased subjects, facilities, storage fees
//! - `menu` - The USSD menu state machine (trail, states, flows, texts)

pub mod claim;
pub mod foundation;
pub mod menu;
pub mod subscriber;
