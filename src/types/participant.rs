//! Participant identity
//!
//! A participant is one member of a split. The ledger only ever reasons about
//! the opaque id; the name exists for display and roster uniqueness.

use serde::{Deserialize, Serialize};

/// Participant identifier, unique within one split
pub type ParticipantId = u32;

/// A member of a split
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Stable identifier
    pub id: ParticipantId,

    /// Display name (unique within a roster, enforced by `Roster`)
    pub name: String,
}

impl Participant {
    /// Create a participant
    pub fn new(id: ParticipantId, name: impl Into<String>) -> Self {
        Participant {
            id,
            name: name.into(),
        }
    }
}
