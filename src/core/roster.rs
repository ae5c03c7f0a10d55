//! Participant roster
//!
//! This module provides the `Roster` struct which keeps the members of one split.
//!
//! The Roster is responsible for:
//! - Assigning ids to newly added participants
//! - Enforcing non-empty, unique names
//! - Resolving display names, falling back to the raw id for removed members
//! - Providing name-sorted listings for output

use crate::types::{LedgerError, Participant, ParticipantId};
use std::collections::BTreeMap;

/// Members of one split, keyed by participant id
#[derive(Debug, Clone, Default)]
pub struct Roster {
    /// Map of participant IDs to participants
    participants: BTreeMap<ParticipantId, Participant>,

    /// Highest id ever held, so removed ids are never handed out again
    last_id: ParticipantId,
}

impl Roster {
    /// Create an empty roster
    pub fn new() -> Self {
        Roster {
            participants: BTreeMap::new(),
            last_id: 0,
        }
    }

    /// Add a participant by name, assigning the next free id
    ///
    /// The name is trimmed before it is checked and stored. Ids start at 1 and
    /// continue from the highest id ever inserted into this roster.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The trimmed name is empty
    /// - Another participant already has that name
    pub fn add(&mut self, name: &str) -> Result<ParticipantId, LedgerError> {
        let name = self.check_name(name)?;
        let id = self.last_id + 1;
        self.participants.insert(id, Participant::new(id, name));
        self.last_id = id;
        Ok(id)
    }

    /// Insert a participant with a known id (e.g. loaded from storage)
    ///
    /// # Errors
    ///
    /// Returns an error if the id is taken, or the name is empty or taken.
    pub fn insert(&mut self, participant: Participant) -> Result<(), LedgerError> {
        if self.participants.contains_key(&participant.id) {
            return Err(LedgerError::duplicate_participant(participant.id));
        }
        let name = self.check_name(&participant.name)?;
        self.participants
            .insert(participant.id, Participant::new(participant.id, name));
        self.last_id = self.last_id.max(participant.id);
        Ok(())
    }

    /// Remove a participant from the roster
    ///
    /// # Errors
    ///
    /// Returns an error if the participant does not exist.
    pub fn remove(&mut self, id: ParticipantId) -> Result<Participant, LedgerError> {
        self.participants
            .remove(&id)
            .ok_or_else(|| LedgerError::participant_not_found(id))
    }

    pub fn get(&self, id: ParticipantId) -> Option<&Participant> {
        self.participants.get(&id)
    }

    pub fn contains(&self, id: ParticipantId) -> bool {
        self.participants.contains_key(&id)
    }

    /// Name to show for a participant id
    ///
    /// Ids that are no longer on the roster show as the raw id.
    pub fn display_name(&self, id: ParticipantId) -> String {
        self.participants
            .get(&id)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| id.to_string())
    }

    /// All participants sorted by name, then id
    pub fn participants(&self) -> Vec<&Participant> {
        let mut participants: Vec<&Participant> = self.participants.values().collect();
        participants.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        participants
    }

    /// Iterate participants in id order
    pub fn iter(&self) -> impl Iterator<Item = &Participant> {
        self.participants.values()
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    fn check_name(&self, name: &str) -> Result<String, LedgerError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LedgerError::EmptyName);
        }
        if self.participants.values().any(|p| p.name == name) {
            return Err(LedgerError::duplicate_participant_name(name));
        }
        Ok(name.to_string())
    }
}
