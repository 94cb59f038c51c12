//! State machine trait for status enums.
//!
//! Gives lifecycle enums (claim status, subject status) validated
//! transition methods from a single transition table.

use super::ValidationError;

/// Trait for status enums that represent state machines.
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Returns all valid target states from the current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Performs the transition with validation.
    ///
    /// # Errors
    ///
    /// - `InvalidFormat` when the transition table forbids the move
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(ValidationError::invalid_format(
                "status",
                format!("cannot transition from {:?} to {:?}", self, target),
            ))
        }
    }

    /// Checks if the current state is terminal.
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}
