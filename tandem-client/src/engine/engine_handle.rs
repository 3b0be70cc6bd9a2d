use crate::engine::{EngineEvent, EngineStatus, RemoteMedia};
use crate::error::ClientError;
use tandem_core::ServerSignal;
use tokio::sync::{mpsc, watch};

/// Cloneable front end of a running [`NegotiationEngine`](crate::NegotiationEngine).
#[derive(Clone)]
pub struct EngineHandle {
    events_tx: mpsc::Sender<EngineEvent>,
    status_rx: watch::Receiver<EngineStatus>,
    remote_media_rx: watch::Receiver<Option<RemoteMedia>>,
}

impl EngineHandle {
    pub(crate) fn new(
        events_tx: mpsc::Sender<EngineEvent>,
        status_rx: watch::Receiver<EngineStatus>,
        remote_media_rx: watch::Receiver<Option<RemoteMedia>>,
    ) -> Self {
        Self {
            events_tx,
            status_rx,
            remote_media_rx,
        }
    }

    /// Enter the matchmaking queue.
    pub async fn start(&self) -> Result<(), ClientError> {
        self.events_tx.send(EngineEvent::Start).await?;
        Ok(())
    }

    /// Drop the current partner and look for a new one.
    pub async fn skip(&self) -> Result<(), ClientError> {
        self.events_tx.send(EngineEvent::Skip).await?;
        Ok(())
    }

    pub async fn disconnect(&self) -> Result<(), ClientError> {
        self.events_tx.send(EngineEvent::Disconnect).await?;
        Ok(())
    }

    /// Feed a frame received from the signaling server.
    pub async fn signal(&self, signal: ServerSignal) -> Result<(), ClientError> {
        self.events_tx.send(EngineEvent::Signal(signal)).await?;
        Ok(())
    }

    pub async fn signaling_closed(&self) -> Result<(), ClientError> {
        self.events_tx.send(EngineEvent::SignalingClosed).await?;
        Ok(())
    }

    pub fn status(&self) -> EngineStatus {
        *self.status_rx.borrow()
    }

    pub fn watch_status(&self) -> watch::Receiver<EngineStatus> {
        self.status_rx.clone()
    }

    pub fn remote_media(&self) -> Option<RemoteMedia> {
        self.remote_media_rx.borrow().clone()
    }

    pub fn watch_remote_media(&self) -> watch::Receiver<Option<RemoteMedia>> {
        self.remote_media_rx.clone()
    }

    /// Resolves once the published status satisfies `pred`.
    pub async fn wait_for_status(
        &self,
        pred: impl FnMut(&EngineStatus) -> bool,
    ) -> Result<EngineStatus, ClientError> {
        let mut rx = self.status_rx.clone();
        let status = rx
            .wait_for(pred)
            .await
            .map_err(|_| ClientError::EngineClosed)?;
        Ok(*status)
    }
}
