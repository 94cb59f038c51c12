//! Explicit menu state graph.
//!
//! Two trees, one per caller role: `Visitor` (phone not registered) and
//! `Member` (registered). Each state declares how it validates the input
//! it prompted for, where it transitions, which guard the application must
//! evaluate before advancing, and which terminal action it finishes with.
//!
//! The rejection policy per state is pinned deliberately: option-selection
//! steps re-prompt and keep the level, free-text field steps reject with a
//! field-specific message and end the session. No state falls through to
//! an empty reply.

use chrono::{NaiveDate, NaiveTime};

use crate::domain::claim::{Facility, PaymentMethod, Relationship};
use crate::domain::foundation::{ClaimId, NationalId};
use crate::domain::subscriber::Language;

use super::texts;

/// Date format collected by the booking flow.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Time format collected by the booking flow.
pub const TIME_FORMAT: &str = "%H:%M";

/// Which menu tree is active for the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuTree {
    Visitor,
    Member,
}

impl MenuTree {
    /// Entry state of the tree.
    pub fn root(&self) -> MenuState {
        match self {
            MenuTree::Visitor => MenuState::VisitorRoot,
            MenuTree::Member => MenuState::MemberRoot,
        }
    }
}

/// One node of the menu graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    // Visitor tree
    VisitorRoot,
    RegisterLanguage,
    RegisterName,
    RegisterEmail,
    RegisterNationalId,
    RegisterCity,

    // Member tree
    MemberRoot,
    BookFacility,
    BookSubject,
    BookRelationship,
    BookPaymentMethod,
    BookPickupDate,
    BookPickupTime,
    CancelBooking,
    StatusBooking,
}

/// What to do with rejected input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectPolicy {
    /// Keep the session open at the same level.
    Reprompt,
    /// Close the session; the subscriber redials to retry.
    End,
}

/// Terminal action a flow finishes with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalAction {
    Exit,
    Register,
    Book,
    Cancel,
    Status,
    History,
}

/// Side condition the application evaluates before advancing past a state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    /// The chosen digit must index the current facility list.
    FacilityChoice,
    /// The entered national id must match an unclaimed subject.
    SubjectAvailable,
}

/// Outcome of feeding one input to a state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepDecision {
    /// Input accepted; prompt for the given state next.
    Next(MenuState),
    /// Input accepted; run the terminal action and close the session.
    Finish(TerminalAction),
    /// Input rejected.
    Reject {
        message: String,
        policy: RejectPolicy,
    },
}

/// Data needed to render prompts that embed live values.
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptContext<'a> {
    pub subscriber_name: Option<&'a str>,
    pub facilities: &'a [Facility],
}

impl MenuState {
    /// Validates `input` against this state and decides the transition.
    ///
    /// Pure with respect to storage: guards that need domain reads are
    /// declared via [`MenuState::guard`] and evaluated by the caller.
    pub fn accept(&self, input: &str) -> StepDecision {
        let input = input.trim();
        match self {
            MenuState::VisitorRoot => match input {
                "1" => StepDecision::Next(MenuState::RegisterLanguage),
                "2" => StepDecision::Finish(TerminalAction::Exit),
                _ => reject_reprompt(),
            },

            MenuState::RegisterLanguage => match Language::from_option_digit(input) {
                Some(_) => StepDecision::Next(MenuState::RegisterName),
                None => reject_reprompt(),
            },

            MenuState::RegisterName => {
                if input.is_empty() || input.len() > 100 {
                    reject_end(texts::invalid_full_name())
                } else {
                    StepDecision::Next(MenuState::RegisterEmail)
                }
            }

            MenuState::RegisterEmail => {
                let well_formed = match input.split_once('@') {
                    Some((local, domain)) => !local.is_empty() && domain.contains('.'),
                    None => false,
                };
                if well_formed {
                    StepDecision::Next(MenuState::RegisterNationalId)
                } else {
                    reject_end(texts::invalid_email())
                }
            }

            MenuState::RegisterNationalId => match NationalId::parse(input) {
                Ok(_) => StepDecision::Next(MenuState::RegisterCity),
                Err(_) => reject_end(texts::invalid_national_id()),
            },

            MenuState::RegisterCity => {
                if input.is_empty() {
                    reject_end(texts::invalid_city())
                } else {
                    StepDecision::Finish(TerminalAction::Register)
                }
            }

            MenuState::MemberRoot => match input {
                "1" => StepDecision::Next(MenuState::BookFacility),
                "2" => StepDecision::Next(MenuState::CancelBooking),
                "3" => StepDecision::Next(MenuState::StatusBooking),
                "4" => StepDecision::Finish(TerminalAction::History),
                "5" => StepDecision::Finish(TerminalAction::Exit),
                _ => reject_reprompt(),
            },

            MenuState::BookFacility => {
                // Range check against the live list is the FacilityChoice guard.
                if input.parse::<usize>().map(|n| n >= 1).unwrap_or(false) {
                    StepDecision::Next(MenuState::BookSubject)
                } else {
                    reject_reprompt()
                }
            }

            MenuState::BookSubject => match NationalId::parse(input) {
                Ok(_) => StepDecision::Next(MenuState::BookRelationship),
                Err(_) => reject_end(texts::invalid_national_id()),
            },

            MenuState::BookRelationship => match Relationship::from_option_digit(input) {
                Some(_) => StepDecision::Next(MenuState::BookPaymentMethod),
                None => reject_reprompt(),
            },

            MenuState::BookPaymentMethod => match PaymentMethod::from_option_digit(input) {
                Some(_) => StepDecision::Next(MenuState::BookPickupDate),
                None => reject_reprompt(),
            },

            MenuState::BookPickupDate => {
                match NaiveDate::parse_from_str(input, DATE_FORMAT) {
                    Ok(_) => StepDecision::Next(MenuState::BookPickupTime),
                    Err(_) => reject_end(texts::invalid_pickup_date()),
                }
            }

            MenuState::BookPickupTime => {
                match NaiveTime::parse_from_str(input, TIME_FORMAT) {
                    Ok(_) => StepDecision::Finish(TerminalAction::Book),
                    Err(_) => reject_end(texts::invalid_pickup_time()),
                }
            }

            MenuState::CancelBooking => match ClaimId::parse(input) {
                Ok(_) => StepDecision::Finish(TerminalAction::Cancel),
                Err(_) => reject_end(texts::invalid_booking_id()),
            },

            MenuState::StatusBooking => match ClaimId::parse(input) {
                Ok(_) => StepDecision::Finish(TerminalAction::Status),
                Err(_) => reject_end(texts::invalid_booking_id()),
            },
        }
    }

    /// Guard the application must evaluate after this state accepts input.
    pub fn guard(&self) -> Option<Guard> {
        match self {
            MenuState::BookFacility => Some(Guard::FacilityChoice),
            MenuState::BookSubject => Some(Guard::SubjectAvailable),
            _ => None,
        }
    }

    /// Renders the prompt shown when entering this state.
    pub fn prompt(&self, ctx: &PromptContext<'_>) -> String {
        match self {
            MenuState::VisitorRoot => texts::visitor_root(),
            MenuState::RegisterLanguage => texts::prompt_language(),
            MenuState::RegisterName => texts::prompt_full_name(),
            MenuState::RegisterEmail => texts::prompt_email(),
            MenuState::RegisterNationalId => texts::prompt_national_id(),
            MenuState::RegisterCity => texts::prompt_city(),
            MenuState::MemberRoot => {
                texts::member_root(ctx.subscriber_name.unwrap_or("member"))
            }
            MenuState::BookFacility => texts::facility_menu(ctx.facilities),
            MenuState::BookSubject => texts::prompt_subject_national_id(),
            MenuState::BookRelationship => texts::relationship_menu(),
            MenuState::BookPaymentMethod => texts::payment_menu(),
            MenuState::BookPickupDate => texts::prompt_pickup_date(),
            MenuState::BookPickupTime => texts::prompt_pickup_time(),
            MenuState::CancelBooking => texts::prompt_cancel_id(),
            MenuState::StatusBooking => texts::prompt_status_id(),
        }
    }
}

fn reject_reprompt() -> StepDecision {
    StepDecision::Reject {
        message: texts::invalid_option(),
        policy: RejectPolicy::Reprompt,
    }
}

fn reject_end(message: String) -> StepDecision {
    StepDecision::Reject {
        message,
        policy: RejectPolicy::End,
    }
}

/// Result of replaying a trail's history through the graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplaySummary {
    /// State awaiting the newest input.
    pub state: MenuState,
    /// Inputs the graph accepted along the way; the session level is
    /// `1 + accepted`, which anchors the store's compare-and-set.
    pub accepted: u32,
}

/// Replay cannot reach a live state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplayError {
    /// A historical input already finished or terminally rejected the flow;
    /// anything after it belongs to a dead session.
    SessionEnded,
}

/// Replays historical inputs from the tree root to recover the state the
/// newest input is answering.
///
/// Re-prompted rejections stay in place, mirroring the live behavior;
/// guards are not re-evaluated because they passed when the inputs were
/// first accepted.
pub fn replay(tree: MenuTree, history: &[String]) -> Result<ReplaySummary, ReplayError> {
    let mut state = tree.root();
    let mut accepted = 0u32;

    for input in history {
        match state.accept(input) {
            StepDecision::Next(next) => {
                state = next;
                accepted += 1;
            }
            StepDecision::Reject {
                policy: RejectPolicy::Reprompt,
                ..
            } => {}
            StepDecision::Finish(_)
            | StepDecision::Reject {
                policy: RejectPolicy::End,
                ..
            } => return Err(ReplayError::SessionEnded),
        }
    }

    Ok(ReplaySummary { state, accepted })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(inputs: &[&str]) -> Vec<String> {
        inputs.iter().map(|s| s.to_string()).collect()
    }

    // ── Level-1 dispatch ────────────────────────────────────────────────

    #[test]
    fn visitor_root_dispatches_each_digit_deterministically() {
        assert_eq!(
            MenuState::VisitorRoot.accept("1"),
            StepDecision::Next(MenuState::RegisterLanguage)
        );
        assert_eq!(
            MenuState::VisitorRoot.accept("2"),
            StepDecision::Finish(TerminalAction::Exit)
        );
    }

    #[test]
    fn member_root_dispatches_each_digit_deterministically() {
        assert_eq!(
            MenuState::MemberRoot.accept("1"),
            StepDecision::Next(MenuState::BookFacility)
        );
        assert_eq!(
            MenuState::MemberRoot.accept("2"),
            StepDecision::Next(MenuState::CancelBooking)
        );
        assert_eq!(
            MenuState::MemberRoot.accept("3"),
            StepDecision::Next(MenuState::StatusBooking)
        );
        assert_eq!(
            MenuState::MemberRoot.accept("4"),
            StepDecision::Finish(TerminalAction::History)
        );
        assert_eq!(
            MenuState::MemberRoot.accept("5"),
            StepDecision::Finish(TerminalAction::Exit)
        );
    }

    #[test]
    fn unknown_root_digit_reprompts_without_ending() {
        for input in ["0", "6", "9", "x", ""] {
            match MenuState::MemberRoot.accept(input) {
                StepDecision::Reject { policy, message } => {
                    assert_eq!(policy, RejectPolicy::Reprompt);
                    assert!(!message.is_empty());
                }
                other => panic!("expected reprompt for {:?}, got {:?}", input, other),
            }
        }
    }

    // ── Field validation policies ───────────────────────────────────────

    #[test]
    fn option_steps_reprompt_on_bad_digit() {
        for state in [
            MenuState::RegisterLanguage,
            MenuState::BookRelationship,
            MenuState::BookPaymentMethod,
            MenuState::BookFacility,
        ] {
            match state.accept("99x") {
                StepDecision::Reject { policy, .. } => assert_eq!(policy, RejectPolicy::Reprompt),
                other => panic!("expected reprompt from {:?}, got {:?}", state, other),
            }
        }
    }

    #[test]
    fn free_text_steps_end_on_invalid_input() {
        let cases = [
            (MenuState::RegisterName, ""),
            (MenuState::RegisterEmail, "nope"),
            (MenuState::RegisterNationalId, "12ab"),
            (MenuState::RegisterCity, ""),
            (MenuState::BookSubject, "abc"),
            (MenuState::BookPickupDate, "14-09-2026"),
            (MenuState::BookPickupTime, "9pm"),
            (MenuState::CancelBooking, "abc"),
            (MenuState::StatusBooking, "-1"),
        ];
        for (state, input) in cases {
            match state.accept(input) {
                StepDecision::Reject { policy, message } => {
                    assert_eq!(policy, RejectPolicy::End, "state {:?}", state);
                    assert!(!message.is_empty(), "state {:?} must not reply empty", state);
                }
                other => panic!("expected terminal reject from {:?}, got {:?}", state, other),
            }
        }
    }

    #[test]
    fn date_and_time_validators_accept_real_values() {
        assert_eq!(
            MenuState::BookPickupDate.accept("2026-09-14"),
            StepDecision::Next(MenuState::BookPickupTime)
        );
        assert_eq!(
            MenuState::BookPickupTime.accept("14:30"),
            StepDecision::Finish(TerminalAction::Book)
        );
    }

    #[test]
    fn impossible_calendar_dates_are_rejected() {
        match MenuState::BookPickupDate.accept("2026-02-30") {
            StepDecision::Reject { policy, .. } => assert_eq!(policy, RejectPolicy::End),
            other => panic!("expected reject, got {:?}", other),
        }
    }

    #[test]
    fn guards_declared_only_where_domain_reads_are_needed() {
        assert_eq!(MenuState::BookFacility.guard(), Some(Guard::FacilityChoice));
        assert_eq!(MenuState::BookSubject.guard(), Some(Guard::SubjectAvailable));
        assert_eq!(MenuState::MemberRoot.guard(), None);
        assert_eq!(MenuState::RegisterName.guard(), None);
    }

    // ── Replay ──────────────────────────────────────────────────────────

    #[test]
    fn replay_of_empty_history_sits_at_root() {
        let summary = replay(MenuTree::Visitor, &[]).unwrap();
        assert_eq!(summary.state, MenuState::VisitorRoot);
        assert_eq!(summary.accepted, 0);
    }

    #[test]
    fn replay_walks_the_registration_flow() {
        let history = strings(&["1", "1", "Jane Doe", "jane@x.com", "1234567"]);
        let summary = replay(MenuTree::Visitor, &history).unwrap();
        assert_eq!(summary.state, MenuState::RegisterCity);
        assert_eq!(summary.accepted, 5);
    }

    #[test]
    fn replay_walks_the_booking_flow() {
        let history = strings(&["1", "1", "7654321", "2", "1", "2026-09-14"]);
        let summary = replay(MenuTree::Member, &history).unwrap();
        assert_eq!(summary.state, MenuState::BookPickupTime);
        assert_eq!(summary.accepted, 6);
    }

    #[test]
    fn replay_skips_reprompted_inputs_without_counting_them() {
        // "9" and "x" were re-prompted at their levels; only "1" advanced.
        let history = strings(&["9", "1", "x"]);
        let summary = replay(MenuTree::Member, &history).unwrap();
        assert_eq!(summary.state, MenuState::BookFacility);
        assert_eq!(summary.accepted, 1);
    }

    #[test]
    fn any_positive_facility_digit_advances_pending_the_guard() {
        // The range check against the live list happens at the
        // FacilityChoice guard, not here.
        assert_eq!(
            MenuState::BookFacility.accept("8"),
            StepDecision::Next(MenuState::BookSubject)
        );
        match MenuState::BookFacility.accept("0") {
            StepDecision::Reject { policy, .. } => assert_eq!(policy, RejectPolicy::Reprompt),
            other => panic!("expected reprompt, got {:?}", other),
        }
    }

    #[test]
    fn replay_fails_past_a_terminal_turn() {
        let history = strings(&["5", "1"]);
        assert_eq!(
            replay(MenuTree::Member, &history),
            Err(ReplayError::SessionEnded)
        );
    }

    #[test]
    fn replay_fails_past_a_terminally_rejected_turn() {
        let history = strings(&["1", "1", "not-a-nid", "2"]);
        assert_eq!(
            replay(MenuTree::Member, &history),
            Err(ReplayError::SessionEnded)
        );
    }

    // ── Prompt rendering ────────────────────────────────────────────────

    #[test]
    fn member_root_prompt_greets_by_name() {
        let ctx = PromptContext {
            subscriber_name: Some("Jane Doe"),
            facilities: &[],
        };
        assert!(MenuState::MemberRoot.prompt(&ctx).contains("Jane Doe"));
    }

    #[test]
    fn facility_prompt_numbers_the_list() {
        use crate::domain::claim::Facility;
        let facilities = vec![Facility::new(10, "CHUK"), Facility::new(11, "King Faisal")];
        let ctx = PromptContext {
            subscriber_name: None,
            facilities: &facilities,
        };
        let prompt = MenuState::BookFacility.prompt(&ctx);
        assert!(prompt.contains("1. CHUK"));
        assert!(prompt.contains("2. King Faisal"));
    }

    #[test]
    fn every_state_renders_a_nonempty_prompt() {
        let states = [
            MenuState::VisitorRoot,
            MenuState::RegisterLanguage,
            MenuState::RegisterName,
            MenuState::RegisterEmail,
            MenuState::RegisterNationalId,
            MenuState::RegisterCity,
            MenuState::MemberRoot,
            MenuState::BookFacility,
            MenuState::BookSubject,
            MenuState::BookRelationship,
            MenuState::BookPaymentMethod,
            MenuState::BookPickupDate,
            MenuState::BookPickupTime,
            MenuState::CancelBooking,
            MenuState::StatusBooking,
        ];
        let ctx = PromptContext::default();
        for state in states {
            assert!(!state.prompt(&ctx).is_empty(), "empty prompt for {:?}", state);
        }
    }
}
