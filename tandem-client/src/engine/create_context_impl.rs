use crate::NegotiationEngine;
use crate::engine::context::NegotiationContext;
use crate::error::NegotiationFault;
use crate::transport::TransportEventSender;
use tandem_core::{ParticipantId, RoomId};
use tracing::info;

impl NegotiationEngine {
    pub(super) async fn create_context(
        &mut self,
        room_id: RoomId,
        partner_id: ParticipantId,
        is_initiator: bool,
    ) -> Result<(), NegotiationFault> {
        self.epoch += 1;
        let events = TransportEventSender::new(self.epoch, self.events_tx.clone());
        let tracks = self.local_media.snapshot();
        let track_count = tracks.len();

        let transport = self
            .factory
            .create(&self.ice_servers, tracks, events)
            .await
            .map_err(NegotiationFault::Transport)?;

        info!(
            "Created negotiation context {} for room {} with {} local tracks",
            self.epoch, room_id, track_count
        );

        self.context = Some(NegotiationContext {
            epoch: self.epoch,
            room_id,
            partner_id,
            is_initiator,
            transport,
            pending_candidates: Vec::new(),
            remote_description_set: false,
            awaiting_answer: false,
        });
        Ok(())
    }
}
