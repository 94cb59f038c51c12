//! Terminal-flow input extraction.
//!
//! When a flow finishes, the collected fields live spread across the
//! accumulated trail, possibly interleaved with re-prompted inputs the
//! graph never accepted. The extractors here replay the trail, keep only
//! the accepted input per state, and assemble the validated value the
//! terminal effect needs.

use chrono::{NaiveDate, NaiveTime};

use crate::domain::claim::{Facility, PaymentMethod, Relationship};
use crate::domain::foundation::{DomainError, ErrorCode, NationalId, Timestamp};
use crate::domain::subscriber::Language;

use super::state::{MenuState, MenuTree, RejectPolicy, StepDecision, DATE_FORMAT, TIME_FORMAT};
use super::InputTrail;

/// Replays the full trail and returns the accepted `(state, input)` pairs.
///
/// The final segment must land on the flow's terminal step; anything after
/// a finish or terminal rejection means the trail belongs to a dead session.
fn collect_accepted(
    tree: MenuTree,
    trail: &InputTrail,
) -> Result<Vec<(MenuState, String)>, DomainError> {
    let mut state = tree.root();
    let mut accepted = Vec::new();
    let last_index = trail.turns().saturating_sub(1);

    for (i, input) in trail.segments().iter().enumerate() {
        match state.accept(input) {
            StepDecision::Next(next) => {
                accepted.push((state, input.trim().to_string()));
                state = next;
            }
            StepDecision::Reject {
                policy: RejectPolicy::Reprompt,
                ..
            } => {}
            StepDecision::Finish(_) if i == last_index => {
                accepted.push((state, input.trim().to_string()));
            }
            StepDecision::Finish(_)
            | StepDecision::Reject {
                policy: RejectPolicy::End,
                ..
            } => {
                return Err(DomainError::new(
                    ErrorCode::StaleSession,
                    "trail continues past a terminal turn",
                ));
            }
        }
    }

    Ok(accepted)
}

fn accepted_at(pairs: &[(MenuState, String)], state: MenuState) -> Result<&str, DomainError> {
    pairs
        .iter()
        .find(|(s, _)| *s == state)
        .map(|(_, input)| input.as_str())
        .ok_or_else(|| {
            DomainError::new(
                ErrorCode::StaleSession,
                format!("trail is missing the {:?} input", state),
            )
        })
}

/// Registration fields collected over the visitor tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationInput {
    pub language: Language,
    pub full_name: String,
    pub email: String,
    pub national_id: NationalId,
    pub city: String,
}

impl RegistrationInput {
    /// Extracts registration fields from a trail that finished the flow.
    ///
    /// # Errors
    ///
    /// - `StaleSession` when the trail does not walk the registration flow
    pub fn from_trail(trail: &InputTrail) -> Result<Self, DomainError> {
        let pairs = collect_accepted(MenuTree::Visitor, trail)?;

        let language = Language::from_option_digit(accepted_at(&pairs, MenuState::RegisterLanguage)?)
            .ok_or_else(|| DomainError::new(ErrorCode::StaleSession, "invalid language digit"))?;
        let full_name = accepted_at(&pairs, MenuState::RegisterName)?.to_string();
        let email = accepted_at(&pairs, MenuState::RegisterEmail)?.to_string();
        let national_id = NationalId::parse(accepted_at(&pairs, MenuState::RegisterNationalId)?)?;
        let city = accepted_at(&pairs, MenuState::RegisterCity)?.to_string();

        Ok(Self {
            language,
            full_name,
            email,
            national_id,
            city,
        })
    }
}

/// Booking fields collected over the member tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingInput {
    pub facility_id: i64,
    pub subject_national_id: NationalId,
    pub relationship: Relationship,
    pub payment_method: PaymentMethod,
    pub pickup_at: Timestamp,
}

impl BookingInput {
    /// Extracts booking fields from a trail that finished the flow.
    ///
    /// The facility digit is resolved against `facilities` in menu order,
    /// the same list the prompt displayed.
    ///
    /// # Errors
    ///
    /// - `FacilityNotFound` when the digit no longer indexes the list
    /// - `StaleSession` when the trail does not walk the booking flow
    pub fn from_trail(trail: &InputTrail, facilities: &[Facility]) -> Result<Self, DomainError> {
        let pairs = collect_accepted(MenuTree::Member, trail)?;

        let choice: usize = accepted_at(&pairs, MenuState::BookFacility)?
            .parse()
            .map_err(|_| DomainError::new(ErrorCode::StaleSession, "invalid facility digit"))?;
        let facility = facilities
            .get(choice.saturating_sub(1))
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::FacilityNotFound,
                    format!("facility choice {} is out of range", choice),
                )
            })?;

        let subject_national_id =
            NationalId::parse(accepted_at(&pairs, MenuState::BookSubject)?)?;
        let relationship =
            Relationship::from_option_digit(accepted_at(&pairs, MenuState::BookRelationship)?)
                .ok_or_else(|| {
                    DomainError::new(ErrorCode::StaleSession, "invalid relationship digit")
                })?;
        let payment_method =
            PaymentMethod::from_option_digit(accepted_at(&pairs, MenuState::BookPaymentMethod)?)
                .ok_or_else(|| {
                    DomainError::new(ErrorCode::StaleSession, "invalid payment digit")
                })?;

        let date = NaiveDate::parse_from_str(
            accepted_at(&pairs, MenuState::BookPickupDate)?,
            DATE_FORMAT,
        )
        .map_err(|e| DomainError::new(ErrorCode::ValidationFailed, e.to_string()))?;
        let time = NaiveTime::parse_from_str(
            accepted_at(&pairs, MenuState::BookPickupTime)?,
            TIME_FORMAT,
        )
        .map_err(|e| DomainError::new(ErrorCode::ValidationFailed, e.to_string()))?;

        Ok(Self {
            facility_id: facility.id(),
            subject_national_id,
            relationship,
            payment_method,
            pickup_at: Timestamp::from_date_time(date, time),
        })
    }
}
