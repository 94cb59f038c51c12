//! USSD turn handling.

mod handle_turn;

pub use handle_turn::{HandleUssdTurn, MenuSettings, UssdTurn};
