use crate::error::LobbyError;
use crate::lobby::{Lobby, LobbyCommand, LobbyStats};
use crate::signaling::SignalingOutput;
use std::sync::Arc;
use tandem_core::{ClientSignal, ParticipantId};
use tokio::sync::{mpsc, oneshot};

/// Cloneable sender side of the lobby actor.
#[derive(Clone)]
pub struct LobbyHandle {
    cmd_tx: mpsc::Sender<LobbyCommand>,
}

impl LobbyHandle {
    pub fn new(cmd_tx: mpsc::Sender<LobbyCommand>) -> Self {
        Self { cmd_tx }
    }

    /// Starts a lobby task that answers through `signaling`.
    pub fn spawn(signaling: Arc<dyn SignalingOutput>, buffer: usize) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel(buffer);
        tokio::spawn(Lobby::new(cmd_rx, signaling).run());
        Self::new(cmd_tx)
    }

    pub async fn register(&self) -> Result<ParticipantId, LobbyError> {
        let (reply, rx) = oneshot::channel();
        self.cmd_tx.send(LobbyCommand::Register { reply }).await?;
        Ok(rx.await?)
    }

    pub async fn join_queue(&self, participant_id: ParticipantId) -> Result<(), LobbyError> {
        self.cmd_tx
            .send(LobbyCommand::JoinQueue { participant_id })
            .await?;
        Ok(())
    }

    pub async fn leave_queue(&self, participant_id: ParticipantId) -> Result<(), LobbyError> {
        self.cmd_tx
            .send(LobbyCommand::LeaveQueue { participant_id })
            .await?;
        Ok(())
    }

    pub async fn skip(&self, participant_id: ParticipantId) -> Result<(), LobbyError> {
        self.cmd_tx.send(LobbyCommand::Skip { participant_id }).await?;
        Ok(())
    }

    pub async fn relay(
        &self,
        sender: ParticipantId,
        signal: ClientSignal,
    ) -> Result<(), LobbyError> {
        self.cmd_tx
            .send(LobbyCommand::Relay { sender, signal })
            .await?;
        Ok(())
    }

    /// Routes one inbound frame: queue operations by kind, everything else to the relay.
    pub async fn dispatch(
        &self,
        sender: ParticipantId,
        signal: ClientSignal,
    ) -> Result<(), LobbyError> {
        match signal {
            ClientSignal::JoinQueue => self.join_queue(sender).await,
            ClientSignal::LeaveQueue => self.leave_queue(sender).await,
            ClientSignal::Skip => self.skip(sender).await,
            relayed => self.relay(sender, relayed).await,
        }
    }

    /// Resolves after the lobby has dropped every reference to `participant_id`.
    pub async fn deregister(&self, participant_id: ParticipantId) -> Result<(), LobbyError> {
        let (done, rx) = oneshot::channel();
        self.cmd_tx
            .send(LobbyCommand::Deregister {
                participant_id,
                done: Some(done),
            })
            .await?;
        Ok(rx.await?)
    }

    pub async fn stats(&self) -> Result<LobbyStats, LobbyError> {
        let (reply, rx) = oneshot::channel();
        self.cmd_tx.send(LobbyCommand::Stats { reply }).await?;
        Ok(rx.await?)
    }
}
