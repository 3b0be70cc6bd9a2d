use std::collections::HashMap;
use std::time::Instant;

use tandem_core::{ParticipantId, RoomId};

/// Where a registered participant currently stands with the lobby.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Idle,
    Queued,
    Paired(RoomId),
}

#[derive(Debug, Clone)]
pub struct Participant {
    pub id: ParticipantId,
    pub presence: Presence,
    /// Partner of the most recently closed session.
    pub last_partner: Option<ParticipantId>,
    pub connected_at: Instant,
}

/// Every participant with a live signaling connection.
///
/// Removing an entry does not unwind queue or session membership; the
/// lobby's deregister path does that before it calls [`ConnectionRegistry::remove`].
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    participants: HashMap<ParticipantId, Participant>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self) -> ParticipantId {
        let mut id = ParticipantId::new();
        while self.participants.contains_key(&id) {
            id = ParticipantId::new();
        }

        self.participants.insert(
            id,
            Participant {
                id,
                presence: Presence::Idle,
                last_partner: None,
                connected_at: Instant::now(),
            },
        );
        id
    }

    pub fn remove(&mut self, id: &ParticipantId) -> Option<Participant> {
        self.participants.remove(id)
    }

    pub fn get(&self, id: &ParticipantId) -> Option<&Participant> {
        self.participants.get(id)
    }

    pub fn presence(&self, id: &ParticipantId) -> Option<Presence> {
        self.participants.get(id).map(|p| p.presence)
    }

    /// Returns false when `id` is not registered.
    pub fn set_presence(&mut self, id: &ParticipantId, presence: Presence) -> bool {
        match self.participants.get_mut(id) {
            Some(participant) => {
                participant.presence = presence;
                true
            }
            None => false,
        }
    }

    pub fn set_last_partner(&mut self, id: &ParticipantId, partner: Option<ParticipantId>) {
        if let Some(participant) = self.participants.get_mut(id) {
            participant.last_partner = partner;
        }
    }

    pub fn contains(&self, id: &ParticipantId) -> bool {
        self.participants.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }
}
