use crate::error::LobbyError;
use crate::lobby::LobbyHandle;
use crate::signaling::SignalingOutput;
use async_trait::async_trait;
use axum::extract::ws::Message;
use dashmap::DashMap;
use std::sync::Arc;
use tandem_core::{IceServerConfig, ParticipantId, ServerSignal};
use tokio::sync::mpsc;
use tracing::{debug, error, warn};

struct SignalingInner {
    peers: DashMap<ParticipantId, mpsc::UnboundedSender<Message>>,
    ice_servers: Vec<IceServerConfig>,
}

/// WebSocket front door: owns each connection's outbound channel and forwards
/// inbound frames to the lobby.
#[derive(Clone)]
pub struct SignalingService {
    inner: Arc<SignalingInner>,
    pub(crate) lobby: LobbyHandle,
}

impl SignalingService {
    pub fn new(lobby: LobbyHandle, ice_servers: Vec<IceServerConfig>) -> Self {
        Self {
            inner: Arc::new(SignalingInner {
                peers: DashMap::new(),
                ice_servers,
            }),
            lobby,
        }
    }

    pub fn lobby(&self) -> &LobbyHandle {
        &self.lobby
    }

    pub fn get_ice_servers(&self) -> Vec<IceServerConfig> {
        self.inner.ice_servers.clone()
    }

    /// Registers a fresh connection and greets it with its id and ICE servers.
    pub async fn connect(
        &self,
        tx: mpsc::UnboundedSender<Message>,
    ) -> Result<ParticipantId, LobbyError> {
        let participant_id = self.lobby.register().await?;
        self.inner.peers.insert(participant_id, tx);

        self.send_signal(participant_id, ServerSignal::Welcome { participant_id });
        self.send_signal(
            participant_id,
            ServerSignal::IceConfig {
                ice_servers: self.get_ice_servers(),
            },
        );
        Ok(participant_id)
    }

    /// Unwinds the participant in the lobby first so its partner is still
    /// reachable for `partner-left`, then drops the outbound channel.
    pub async fn disconnect(&self, participant_id: &ParticipantId) {
        if let Err(e) = self.lobby.deregister(*participant_id).await {
            error!("Failed to deregister {}: {}", participant_id, e);
        }
        self.inner.peers.remove(participant_id);
    }

    pub fn is_connected(&self, participant_id: &ParticipantId) -> bool {
        self.inner.peers.contains_key(participant_id)
    }

    pub fn send_signal(&self, participant_id: ParticipantId, msg: ServerSignal) {
        if let Some(peer) = self.inner.peers.get(&participant_id) {
            match serde_json::to_string(&msg) {
                Ok(json) => {
                    if let Err(e) = peer.send(Message::Text(json.into())) {
                        error!("Failed to send WS message to {}: {:?}", participant_id, e);
                    }
                }
                Err(e) => error!("Failed to serialize signal message: {}", e),
            }
        } else {
            warn!(
                "Attempted to send signal to disconnected participant {}",
                participant_id
            );
        }
    }
}

#[async_trait]
impl SignalingOutput for SignalingService {
    async fn deliver(&self, participant_id: ParticipantId, signal: ServerSignal) {
        debug!("-> {}: {:?}", participant_id, signal);
        self.send_signal(participant_id, signal);
    }
}
