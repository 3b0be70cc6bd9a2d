use std::collections::HashMap;
use std::time::Instant;

use tandem_core::{ParticipantId, RoomId};

/// One matched pair. The initiator sends the offer.
#[derive(Debug, Clone)]
pub struct PairingSession {
    pub room_id: RoomId,
    pub initiator: ParticipantId,
    pub responder: ParticipantId,
    pub created_at: Instant,
}

impl PairingSession {
    pub fn members(&self) -> [ParticipantId; 2] {
        [self.initiator, self.responder]
    }

    pub fn contains(&self, id: &ParticipantId) -> bool {
        self.initiator == *id || self.responder == *id
    }

    pub fn partner_of(&self, id: &ParticipantId) -> Option<ParticipantId> {
        if self.initiator == *id {
            Some(self.responder)
        } else if self.responder == *id {
            Some(self.initiator)
        } else {
            None
        }
    }
}

#[derive(Debug, Default)]
pub struct SessionTable {
    sessions: HashMap<RoomId, PairingSession>,
}

impl SessionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&mut self, initiator: ParticipantId, responder: ParticipantId) -> PairingSession {
        debug_assert_ne!(initiator, responder, "a participant cannot pair with itself");

        let mut room_id = RoomId::new();
        while self.sessions.contains_key(&room_id) {
            room_id = RoomId::new();
        }

        let session = PairingSession {
            room_id,
            initiator,
            responder,
            created_at: Instant::now(),
        };
        self.sessions.insert(room_id, session.clone());
        session
    }

    pub fn get(&self, room_id: &RoomId) -> Option<&PairingSession> {
        self.sessions.get(room_id)
    }

    /// Returns `None` once the session is gone, so repeated teardown is harmless.
    pub fn remove(&mut self, room_id: &RoomId) -> Option<PairingSession> {
        self.sessions.remove(room_id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
