//! Hospital facility read model.

use serde::{Deserialize, Serialize};

/// A hospital holding deceased subjects, offered as a menu choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Facility {
    id: i64,
    name: String,
}

impl Facility {
    /// Reconstitutes a facility from persistence.
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}
