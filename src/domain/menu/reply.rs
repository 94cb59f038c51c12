//! Menu reply value object.

use serde::{Deserialize, Serialize};

/// Whether the gateway should keep the session open after this reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Disposition {
    /// Keep the session open and prompt for more input.
    Continue,
    /// Close the session.
    End,
}

/// One turn's answer: the text to display and the continuation flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuReply {
    text: String,
    disposition: Disposition,
}

impl MenuReply {
    /// A prompt expecting further input.
    pub fn prompt(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            disposition: Disposition::Continue,
        }
    }

    /// A terminal message closing the session.
    pub fn terminal(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            disposition: Disposition::End,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn disposition(&self) -> Disposition {
        self.disposition
    }

    pub fn continues(&self) -> bool {
        self.disposition == Disposition::Continue
    }
}
