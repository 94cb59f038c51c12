//! Accumulated input trail.
//!
//! Gateways resubmit everything the subscriber has typed this session as a
//! single `*`-delimited string; the newest entry is the last segment. The
//! reset dial code itself contains `*`, so it is located in the raw text
//! before any splitting: the code and everything before it are dropped,
//! leaving only the inputs typed since the subscriber last returned to the
//! root menu.

/// Parsed `*`-delimited input trail for one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputTrail {
    segments: Vec<String>,
}

impl InputTrail {
    /// Parses the gateway `text` field.
    ///
    /// An empty or whitespace-only body yields an empty trail (first
    /// dial). A body that is, or ends with, the reset code also parses
    /// empty: the subscriber is back at the root with nothing typed since.
    /// Inputs after the code replay from the root, so the menu stays
    /// usable on the turns that follow a mid-session reset.
    pub fn parse(raw: &str, reset_code: &str) -> Self {
        let mut trimmed = raw.trim();
        if !reset_code.is_empty() {
            if let Some(idx) = trimmed.rfind(reset_code) {
                trimmed = trimmed[idx + reset_code.len()..]
                    .trim_start_matches('*')
                    .trim();
            }
        }
        let segments = if trimmed.is_empty() {
            Vec::new()
        } else {
            trimmed.split('*').map(|s| s.trim().to_string()).collect()
        };
        Self { segments }
    }

    /// True on the first callback of a session, or right after a reset.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of inputs submitted so far.
    pub fn turns(&self) -> usize {
        self.segments.len()
    }

    /// All segments, oldest first.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Everything before the newest input, for state replay.
    pub fn history(&self) -> &[String] {
        match self.segments.len() {
            0 => &[],
            n => &self.segments[..n - 1],
        }
    }

    /// The newest input, empty string when the trail is empty.
    pub fn last(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or("")
    }

    /// Segment at `index`, oldest first.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.segments.get(index).map(String::as_str)
    }
}
