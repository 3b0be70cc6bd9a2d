use thiserror::Error;

#[derive(Debug, Error)]
pub enum LobbyError {
    #[error("lobby is no longer running")]
    Closed,
}

impl<T> From<tokio::sync::mpsc::error::SendError<T>> for LobbyError {
    fn from(_: tokio::sync::mpsc::error::SendError<T>) -> Self {
        LobbyError::Closed
    }
}

impl From<tokio::sync::oneshot::error::RecvError> for LobbyError {
    fn from(_: tokio::sync::oneshot::error::RecvError) -> Self {
        LobbyError::Closed
    }
}
