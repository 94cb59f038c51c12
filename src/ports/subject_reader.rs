//! Subject reader port (read side).

use async_trait::async_trait;

use crate::domain::claim::Subject;
use crate::domain::foundation::{DomainError, NationalId};

/// Read-only lookup of deceased subjects held at facilities.
#[async_trait]
pub trait SubjectReader: Send + Sync {
    /// Finds a subject by national id; `None` when no record exists.
    async fn find_by_national_id(
        &self,
        national_id: &NationalId,
    ) -> Result<Option<Subject>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subject_reader_is_object_safe() {
        fn _accepts_dyn(_reader: &dyn SubjectReader) {}
    }
}
