use std::collections::VecDeque;

use tandem_core::ParticipantId;

/// Participants waiting for a partner, earliest first.
#[derive(Debug, Default)]
pub struct MatchQueue {
    waiting: VecDeque<ParticipantId>,
}

impl MatchQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `id` unless it is already waiting.
    pub fn enqueue(&mut self, id: ParticipantId) -> bool {
        if self.waiting.contains(&id) {
            return false;
        }
        self.waiting.push_back(id);
        true
    }

    pub fn remove(&mut self, id: &ParticipantId) -> bool {
        let Some(pos) = self.waiting.iter().position(|w| w == id) else {
            return false;
        };
        self.waiting.remove(pos);
        true
    }

    /// Pops the earliest waiting participant that is neither `joiner` nor `avoid`.
    pub fn pop_partner(
        &mut self,
        joiner: &ParticipantId,
        avoid: Option<&ParticipantId>,
    ) -> Option<ParticipantId> {
        let pos = self
            .waiting
            .iter()
            .position(|w| w != joiner && Some(w) != avoid)?;
        self.waiting.remove(pos)
    }

    pub fn contains(&self, id: &ParticipantId) -> bool {
        self.waiting.contains(id)
    }

    pub fn len(&self) -> usize {
        self.waiting.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waiting.is_empty()
    }
}
