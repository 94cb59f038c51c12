//! Shared domain primitives.
//!
//! Value objects, identifiers, and error types used across the domain.

mod errors;
mod ids;
mod msisdn;
mod state_machine;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{ClaimId, NationalId, SessionId, SubscriberId};
pub use msisdn::Msisdn;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
