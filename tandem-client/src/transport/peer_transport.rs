use crate::transport::{LocalTrack, TransportEventSender};
use anyhow::Result;
use async_trait::async_trait;
use tandem_core::{IceCandidate, IceServerConfig};

/// One peer connection, owned by a single negotiation context.
#[async_trait]
pub trait PeerTransport: Send + Sync {
    /// Creates an offer and sets it as the local description.
    async fn create_offer(&self) -> Result<String>;

    /// Creates an answer and sets it as the local description.
    async fn create_answer(&self) -> Result<String>;

    async fn set_remote_offer(&self, sdp: String) -> Result<()>;

    async fn set_remote_answer(&self, sdp: String) -> Result<()>;

    async fn add_ice_candidate(&self, candidate: IceCandidate) -> Result<()>;

    async fn close(&self) -> Result<()>;
}

/// Builds a fresh transport for every pairing session.
#[async_trait]
pub trait TransportFactory: Send + Sync {
    async fn create(
        &self,
        ice_servers: &[IceServerConfig],
        local_tracks: Vec<LocalTrack>,
        events: TransportEventSender,
    ) -> Result<Box<dyn PeerTransport>>;
}
