use async_trait::async_trait;
use tandem_core::{ParticipantId, ServerSignal};

/// Outbound side of the signaling channel, as seen by the lobby.
#[async_trait]
pub trait SignalingOutput: Send + Sync {
    /// Delivers `signal` to one participant. Unknown ids are dropped.
    async fn deliver(&self, participant_id: ParticipantId, signal: ServerSignal);
}
