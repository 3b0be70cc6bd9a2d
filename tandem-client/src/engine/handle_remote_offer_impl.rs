use crate::NegotiationEngine;
use crate::engine::NegotiationState;
use tandem_core::{ClientSignal, ParticipantId};
use tracing::{debug, info, warn};

impl NegotiationEngine {
    /// Responder side: apply the partner's offer and answer it.
    pub(super) async fn handle_remote_offer(&mut self, sender: ParticipantId, sdp: String) {
        let Some(ctx) = self.context.as_mut() else {
            debug!("Dropping offer from {}: no active session", sender);
            return;
        };
        if !ctx.bound_to(&sender) {
            debug!("Dropping offer from {}: not the bound partner", sender);
            return;
        }
        if self.state != NegotiationState::Answering {
            warn!(
                "Ignoring offer from {} while {:?}",
                sender, self.state
            );
            return;
        }

        info!("Received offer from {}", sender);
        match ctx.accept_offer(sdp).await {
            Ok(answer) => {
                info!("Sending answer to {}", sender);
                self.send(ClientSignal::Answer {
                    target: sender,
                    sdp: answer,
                });
                self.set_state(NegotiationState::Negotiating);
            }
            Err(fault) => self.fault(fault).await,
        }
    }
}
