use crate::error::NegotiationFault;
use crate::transport::PeerTransport;
use tandem_core::{IceCandidate, ParticipantId, RoomId};
use tracing::debug;

/// Per-session negotiation resources. Replaced wholesale on every new session.
pub(crate) struct NegotiationContext {
    pub epoch: u64,
    pub room_id: RoomId,
    pub partner_id: ParticipantId,
    pub is_initiator: bool,
    pub transport: Box<dyn PeerTransport>,
    /// Remote candidates received before the remote description, in arrival order.
    pub pending_candidates: Vec<IceCandidate>,
    pub remote_description_set: bool,
    pub awaiting_answer: bool,
}

impl NegotiationContext {
    pub fn bound_to(&self, sender: &ParticipantId) -> bool {
        self.partner_id == *sender
    }
}

impl NegotiationContext {
    /// Applies a remote offer, flushes buffered candidates and returns the local answer.
    pub async fn accept_offer(&mut self, sdp: String) -> Result<String, NegotiationFault> {
        self.transport
            .set_remote_offer(sdp)
            .await
            .map_err(NegotiationFault::RemoteDescription)?;
        self.remote_description_set = true;
        self.flush_candidates().await?;

        self.transport
            .create_answer()
            .await
            .map_err(NegotiationFault::LocalDescription)
    }

    pub async fn accept_answer(&mut self, sdp: String) -> Result<(), NegotiationFault> {
        self.transport
            .set_remote_answer(sdp)
            .await
            .map_err(NegotiationFault::RemoteDescription)?;
        self.remote_description_set = true;
        self.flush_candidates().await
    }

    /// Applies `candidate` now, or buffers it until the remote description lands.
    pub async fn add_remote_candidate(
        &mut self,
        candidate: IceCandidate,
    ) -> Result<(), NegotiationFault> {
        if !self.remote_description_set {
            self.pending_candidates.push(candidate);
            debug!(
                "Buffered remote candidate ({} pending)",
                self.pending_candidates.len()
            );
            return Ok(());
        }

        self.transport
            .add_ice_candidate(candidate)
            .await
            .map_err(NegotiationFault::Candidate)
    }

    async fn flush_candidates(&mut self) -> Result<(), NegotiationFault> {
        if self.pending_candidates.is_empty() {
            return Ok(());
        }

        debug!("Flushing {} buffered candidates", self.pending_candidates.len());
        for candidate in std::mem::take(&mut self.pending_candidates) {
            self.transport
                .add_ice_candidate(candidate)
                .await
                .map_err(NegotiationFault::Candidate)?;
        }
        Ok(())
    }
}
