//! The USSD menu state machine.
//!
//! This is the core of the service: given the accumulated input trail and
//! the caller's identity, decide the next prompt, whether the session
//! continues, and which domain effect (if any) the turn performs.
//!
//! The menu is an explicit state graph ([`MenuState`]): each state declares
//! how it validates input, where it transitions, and which terminal action
//! it finishes with. The current state is recovered by replaying the trail
//! from the tree root, so the machine works identically whether the session
//! level is persisted or derived from the trail length.

mod flows;
mod reply;
mod state;
pub mod texts;
mod trail;

pub use flows::{BookingInput, RegistrationInput};
pub use reply::{Disposition, MenuReply};
pub use state::{
    replay, Guard, MenuState, MenuTree, PromptContext, RejectPolicy, ReplayError, ReplaySummary,
    StepDecision, TerminalAction,
};
pub use trail::InputTrail;
