//! Deceased subject held at a facility.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{NationalId, StateMachine, Timestamp};

/// Claim status of a subject record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubjectStatus {
    Unclaimed,
    Claimed,
}

impl StateMachine for SubjectStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        matches!((self, target), (SubjectStatus::Unclaimed, SubjectStatus::Claimed))
    }

    fn valid_transitions(&self) -> Vec<Self> {
        match self {
            SubjectStatus::Unclaimed => vec![SubjectStatus::Claimed],
            SubjectStatus::Claimed => vec![],
        }
    }
}

/// A deceased person registered at a hospital facility.
///
/// Read-only lookup target for the booking flow; the only mutation is the
/// unclaimed to claimed flip performed together with the claim insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject {
    national_id: NationalId,
    full_name: String,
    facility_id: i64,
    registered_on: Timestamp,
    status: SubjectStatus,
}

impl Subject {
    /// Reconstitutes a subject from persistence.
    pub fn reconstitute(
        national_id: NationalId,
        full_name: String,
        facility_id: i64,
        registered_on: Timestamp,
        status: SubjectStatus,
    ) -> Self {
        Self {
            national_id,
            full_name,
            facility_id,
            registered_on,
            status,
        }
    }

    pub fn national_id(&self) -> &NationalId {
        &self.national_id
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn facility_id(&self) -> i64 {
        self.facility_id
    }

    /// When the subject was registered at the facility; storage fees accrue
    /// from this instant.
    pub fn registered_on(&self) -> &Timestamp {
        &self.registered_on
    }

    pub fn status(&self) -> SubjectStatus {
        self.status
    }

    pub fn is_unclaimed(&self) -> bool {
        self.status == SubjectStatus::Unclaimed
    }
}
