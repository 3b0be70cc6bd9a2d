use crate::engine::EngineEvent;
use tandem_core::IceCandidate;
use tokio::sync::mpsc;

/// Connection state changes reported by the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connectivity {
    Connected,
    Disconnected,
    Failed,
}

/// Events a transport raises for the negotiation engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    /// Trickle ICE: a local candidate to forward to the partner.
    LocalCandidate(IceCandidate),

    Connectivity(Connectivity),

    /// The partner's media arrived on the connection.
    RemoteTrack { stream_id: String, track_id: String },
}

/// Feeds transport callbacks into the engine queue, tagged with the context
/// epoch they belong to.
#[derive(Clone)]
pub struct TransportEventSender {
    epoch: u64,
    tx: mpsc::Sender<EngineEvent>,
}

impl TransportEventSender {
    pub(crate) fn new(epoch: u64, tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { epoch, tx }
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Returns `false` once the engine has stopped.
    pub async fn send(&self, event: TransportEvent) -> bool {
        self.tx
            .send(EngineEvent::Transport {
                epoch: self.epoch,
                event,
            })
            .await
            .is_ok()
    }
}
