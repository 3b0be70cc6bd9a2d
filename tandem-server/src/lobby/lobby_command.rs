use serde::Serialize;
use tandem_core::{ClientSignal, ParticipantId};
use tokio::sync::oneshot;

/// Commands the signaling front door feeds into the lobby, processed one at a time.
#[derive(Debug)]
pub enum LobbyCommand {
    /// A new connection; the lobby answers with the minted id.
    Register {
        reply: oneshot::Sender<ParticipantId>,
    },

    JoinQueue { participant_id: ParticipantId },

    LeaveQueue { participant_id: ParticipantId },

    /// Leave the current session and go straight back into the queue.
    Skip { participant_id: ParticipantId },

    /// offer, answer or ice-candidate addressed to the sender's partner.
    Relay {
        sender: ParticipantId,
        signal: ClientSignal,
    },

    /// The connection is gone. `done` fires once nothing references the id.
    Deregister {
        participant_id: ParticipantId,
        done: Option<oneshot::Sender<()>>,
    },

    Stats { reply: oneshot::Sender<LobbyStats> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LobbyStats {
    pub connected: usize,
    pub waiting: usize,
    pub sessions: usize,
}
