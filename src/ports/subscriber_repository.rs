//! Subscriber repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, Msisdn};
use crate::domain::subscriber::{NewSubscriber, Subscriber};

/// Persistence contract for subscriber registration and lookup.
#[async_trait]
pub trait SubscriberRepository: Send + Sync {
    /// Finds a subscriber by the phone number's last-nine-digit key.
    ///
    /// Returns `None` when the phone is not registered; this lookup runs
    /// once per turn and selects the active menu tree.
    async fn find_by_msisdn(&self, msisdn: &Msisdn) -> Result<Option<Subscriber>, DomainError>;

    /// Persists a new registration and returns the stored subscriber.
    ///
    /// # Errors
    ///
    /// - `DuplicateRegistration` when the phone key is already on file
    /// - `DatabaseError` on persistence failure
    async fn create(&self, new: &NewSubscriber) -> Result<Subscriber, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscriber_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn SubscriberRepository) {}
    }
}
