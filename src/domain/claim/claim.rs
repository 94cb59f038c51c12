//! Claim aggregate - a member's booking to collect a subject.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ClaimId, NationalId, StateMachine, SubscriberId, Timestamp};

/// Lifecycle status of a claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClaimStatus {
    Scheduled,
    Completed,
    Cancelled,
}

impl ClaimStatus {
    /// Subscriber-facing label.
    pub fn label(&self) -> &'static str {
        match self {
            ClaimStatus::Scheduled => "Scheduled",
            ClaimStatus::Completed => "Completed",
            ClaimStatus::Cancelled => "Cancelled",
        }
    }
}

impl StateMachine for ClaimStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        matches!(
            (self, target),
            (ClaimStatus::Scheduled, ClaimStatus::Completed)
                | (ClaimStatus::Scheduled, ClaimStatus::Cancelled)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        match self {
            ClaimStatus::Scheduled => vec![ClaimStatus::Completed, ClaimStatus::Cancelled],
            ClaimStatus::Completed | ClaimStatus::Cancelled => vec![],
        }
    }
}

/// How the relative is related to the deceased.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Relationship {
    Parent,
    Spouse,
    Child,
    Other,
}

impl Relationship {
    /// Maps the menu digit to a relationship.
    pub fn from_option_digit(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Relationship::Parent),
            "2" => Some(Relationship::Spouse),
            "3" => Some(Relationship::Child),
            "4" => Some(Relationship::Other),
            _ => None,
        }
    }

    /// Stable storage tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Relationship::Parent => "parent",
            Relationship::Spouse => "spouse",
            Relationship::Child => "child",
            Relationship::Other => "other",
        }
    }

    /// Parses the storage tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "parent" => Some(Relationship::Parent),
            "spouse" => Some(Relationship::Spouse),
            "child" => Some(Relationship::Child),
            "other" => Some(Relationship::Other),
            _ => None,
        }
    }
}

/// How the storage fee will be settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    MobileMoney,
    Insurance,
}

impl PaymentMethod {
    /// Maps the menu digit to a payment method.
    pub fn from_option_digit(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(PaymentMethod::MobileMoney),
            "2" => Some(PaymentMethod::Insurance),
            _ => None,
        }
    }

    /// Stable storage tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::MobileMoney => "mobile_money",
            PaymentMethod::Insurance => "insurance",
        }
    }

    /// Parses the storage tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "mobile_money" => Some(PaymentMethod::MobileMoney),
            "insurance" => Some(PaymentMethod::Insurance),
            _ => None,
        }
    }
}

/// A booking ready to be persisted; the amount is already assessed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewClaim {
    pub owner: SubscriberId,
    pub subject_national_id: NationalId,
    pub facility_id: i64,
    pub relationship: Relationship,
    pub payment_method: PaymentMethod,
    pub pickup_at: Timestamp,
    pub amount: i64,
}

/// Persisted claim, always read back scoped to its owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Claim {
    id: ClaimId,
    owner: SubscriberId,
    subject_national_id: NationalId,
    facility_id: i64,
    relationship: Relationship,
    payment_method: PaymentMethod,
    pickup_at: Timestamp,
    amount: i64,
    status: ClaimStatus,
}

impl Claim {
    /// Reconstitutes a claim from persistence.
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: ClaimId,
        owner: SubscriberId,
        subject_national_id: NationalId,
        facility_id: i64,
        relationship: Relationship,
        payment_method: PaymentMethod,
        pickup_at: Timestamp,
        amount: i64,
        status: ClaimStatus,
    ) -> Self {
        Self {
            id,
            owner,
            subject_national_id,
            facility_id,
            relationship,
            payment_method,
            pickup_at,
            amount,
            status,
        }
    }

    pub fn id(&self) -> ClaimId {
        self.id
    }

    pub fn owner(&self) -> SubscriberId {
        self.owner
    }

    pub fn subject_national_id(&self) -> &NationalId {
        &self.subject_national_id
    }

    pub fn facility_id(&self) -> i64 {
        self.facility_id
    }

    pub fn relationship(&self) -> Relationship {
        self.relationship
    }

    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    pub fn pickup_at(&self) -> &Timestamp {
        &self.pickup_at
    }

    pub fn amount(&self) -> i64 {
        self.amount
    }

    pub fn status(&self) -> ClaimStatus {
        self.status
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scheduled_can_complete_or_cancel() {
        assert!(ClaimStatus::Scheduled.can_transition_to(&ClaimStatus::Completed));
        assert!(ClaimStatus::Scheduled.can_transition_to(&ClaimStatus::Cancelled));
    }

    #[test]
    fn completed_and_cancelled_are_terminal() {
        assert!(ClaimStatus::Completed.is_terminal());
        assert!(ClaimStatus::Cancelled.is_terminal());
        assert!(!ClaimStatus::Cancelled.can_transition_to(&ClaimStatus::Scheduled));
    }

    #[test]
    fn relationship_digit_mapping_covers_menu() {
        assert_eq!(Relationship::from_option_digit("1"), Some(Relationship::Parent));
        assert_eq!(Relationship::from_option_digit("4"), Some(Relationship::Other));
        assert_eq!(Relationship::from_option_digit("5"), None);
        assert_eq!(Relationship::from_option_digit(""), None);
    }

    #[test]
    fn payment_method_digit_mapping_covers_menu() {
        assert_eq!(
            PaymentMethod::from_option_digit("1"),
            Some(PaymentMethod::MobileMoney)
        );
        assert_eq!(
            PaymentMethod::from_option_digit("2"),
            Some(PaymentMethod::Insurance)
        );
        assert_eq!(PaymentMethod::from_option_digit("9"), None);
    }

    #[test]
    fn storage_tags_round_trip() {
        for r in [
            Relationship::Parent,
            Relationship::Spouse,
            Relationship::Child,
            Relationship::Other,
        ] {
            assert_eq!(Relationship::from_tag(r.as_str()), Some(r));
        }
        for p in [PaymentMethod::MobileMoney, PaymentMethod::Insurance] {
            assert_eq!(PaymentMethod::from_tag(p.as_str()), Some(p));
        }
    }
}
