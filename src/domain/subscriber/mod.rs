//! Subscriber registration domain.

mod pin;
mod subscriber;

pub use pin::TemporaryPin;
pub use subscriber::{Language, NewSubscriber, Subscriber};
