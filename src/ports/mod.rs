//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the menu state machine and the outside world. Adapters implement them.
//!
//! - `SessionStore` / `SessionPosition` - where the session level lives
//! - `SubscriberRepository` - subscriber lookup and registration
//! - `FacilityReader` / `SubjectReader` - read-only booking lookups
//! - `ClaimRepository` / `ClaimReader` - booking writes and owner-scoped reads

mod claim_reader;
mod claim_repository;
mod facility_reader;
mod session_position;
mod session_store;
mod subject_reader;
mod subscriber_repository;

pub use claim_reader::ClaimReader;
pub use claim_repository::ClaimRepository;
pub use facility_reader::FacilityReader;
pub use session_position::SessionPosition;
pub use session_store::SessionStore;
pub use subject_reader::SubjectReader;
pub use subscriber_repository::SubscriberRepository;
