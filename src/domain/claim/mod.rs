//! Pickup booking (claim) domain.
//!
//! A claim is a member's booking to collect a deceased subject from a
//! hospital facility. Storage fees accrue per day between the subject's
//! registration at the facility and the moment of booking.

mod billing;
mod claim;
mod facility;
mod subject;

pub use billing::storage_fee;
pub use claim::{Claim, ClaimStatus, NewClaim, PaymentMethod, Relationship};
pub use facility::Facility;
pub use subject::{Subject, SubjectStatus};
