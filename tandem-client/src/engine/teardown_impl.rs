use crate::NegotiationEngine;
use crate::engine::{EngineEvent, NegotiationState};
use crate::error::NegotiationFault;
use tandem_core::ClientSignal;
use tracing::{debug, info, warn};

impl NegotiationEngine {
    /// Releases the current context, if any. Safe to call repeatedly.
    pub(super) async fn teardown(&mut self) {
        if let Some(ctx) = self.context.take() {
            self.epoch += 1;
            if let Err(e) = ctx.transport.close().await {
                warn!("Failed to close transport for room {}: {:#}", ctx.room_id, e);
            }
            info!("Closed negotiation context for room {}", ctx.room_id);
        }

        self.remote_media_tx.send_if_modified(|media| media.take().is_some());
    }

    pub(super) async fn skip(&mut self) {
        match self.state {
            NegotiationState::Idle | NegotiationState::Closed => {
                debug!("Ignoring skip while {:?}", self.state);
            }
            _ => {
                info!("Skipping current partner");
                self.teardown().await;
                self.set_state(NegotiationState::Skipped);
                self.enter_searching(ClientSignal::Skip);
            }
        }
    }

    /// Session-local failures end the session the same way a skip does.
    pub(super) async fn fault(&mut self, fault: NegotiationFault) {
        let room = self.context.as_ref().map(|ctx| ctx.room_id);
        match room {
            Some(room_id) => warn!("Negotiation fault in room {}: {}", room_id, fault),
            None => warn!("Negotiation fault: {}", fault),
        }
        self.skip().await;
    }

    pub(super) async fn partner_left(&mut self) {
        if self.context.is_none() && !self.state.in_session() {
            debug!("Ignoring partner-left while {:?}", self.state);
            return;
        }

        info!("Partner left");
        self.teardown().await;
        self.set_state(NegotiationState::PartnerLeft);

        let epoch = self.epoch;
        let delay = self.rejoin_delay;
        let events_tx = self.events_tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = events_tx.send(EngineEvent::Rejoin { epoch }).await;
        });
    }

    pub(super) async fn close(&mut self) {
        self.teardown().await;
        self.set_state(NegotiationState::Closed);
    }
}
