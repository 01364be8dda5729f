//! Opaque identifiers for timeline entities.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stable 128-bit identifier.
///
/// Generated once at entity creation and never reissued, even after the
/// entity is deleted. Serializes as a plain UUID string so project files
/// stay diffable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id(Uuid);

impl Id {
    /// Generate a fresh identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for Id {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Id {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
