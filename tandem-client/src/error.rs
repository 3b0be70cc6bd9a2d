use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("could not reach signaling server: {0}")]
    Connect(#[from] tokio_tungstenite::tungstenite::Error),

    #[error("negotiation engine is no longer running")]
    EngineClosed,
}

impl<T> From<tokio::sync::mpsc::error::SendError<T>> for ClientError {
    fn from(_: tokio::sync::mpsc::error::SendError<T>) -> Self {
        ClientError::EngineClosed
    }
}

/// A session-local failure. The engine recovers by skipping to a new partner.
#[derive(Debug, Error)]
pub enum NegotiationFault {
    #[error("failed to create peer transport: {0:#}")]
    Transport(anyhow::Error),

    #[error("failed to produce local description: {0:#}")]
    LocalDescription(anyhow::Error),

    #[error("failed to apply remote description: {0:#}")]
    RemoteDescription(anyhow::Error),

    #[error("failed to add ICE candidate: {0:#}")]
    Candidate(anyhow::Error),

    #[error("peer connection failed")]
    ConnectivityFailed,
}
