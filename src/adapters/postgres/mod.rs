//! PostgreSQL adapter implementations.

mod claim_reader;
mod claim_repository;
mod facility_reader;
mod session_store;
mod subject_reader;
mod subscriber_repository;

pub use claim_reader::PostgresClaimReader;
pub use claim_repository::PostgresClaimRepository;
pub use facility_reader::PostgresFacilityReader;
pub use session_store::PostgresSessionStore;
pub use subject_reader::PostgresSubjectReader;
pub use subscriber_repository::PostgresSubscriberRepository;
