//! Facility reader port (read side).

use async_trait::async_trait;

use crate::domain::claim::Facility;
use crate::domain::foundation::DomainError;

/// Read-only access to the hospital facility list.
///
/// The list order is the menu order; the booking flow resolves the chosen
/// digit against the same ordering the prompt displayed.
#[async_trait]
pub trait FacilityReader: Send + Sync {
    /// All facilities, in stable menu order.
    async fn list(&self) -> Result<Vec<Facility>, DomainError>;
}
