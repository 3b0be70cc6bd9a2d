use crate::NegotiationEngine;
use crate::engine::NegotiationState;
use crate::error::NegotiationFault;
use tandem_core::ClientSignal;
use tracing::info;

impl NegotiationEngine {
    /// Initiator side: produce the offer and send it to the partner.
    pub(super) async fn init_connection(&mut self) {
        self.set_state(NegotiationState::Offering);

        let Some(ctx) = self.context.as_mut() else {
            return;
        };
        let target = ctx.partner_id;

        match ctx.transport.create_offer().await {
            Ok(sdp) => {
                ctx.awaiting_answer = true;
                info!("Sending offer to {}", target);
                self.send(ClientSignal::Offer { target, sdp });
                self.set_state(NegotiationState::Negotiating);
            }
            Err(e) => self.fault(NegotiationFault::LocalDescription(e)).await,
        }
    }
}
