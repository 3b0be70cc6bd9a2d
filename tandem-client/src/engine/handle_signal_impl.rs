use crate::NegotiationEngine;
use crate::engine::{EngineStatus, NegotiationState};
use tandem_core::ServerSignal;
use tracing::{debug, info, warn};

impl NegotiationEngine {
    pub(super) async fn handle_signal(&mut self, signal: ServerSignal) {
        match signal {
            ServerSignal::Welcome { participant_id } => {
                info!("Connected to signaling server as {}", participant_id);
                self.participant_id = Some(participant_id);
            }

            ServerSignal::IceConfig { ice_servers } => {
                info!("Received ICE config: {} servers", ice_servers.len());
                if !ice_servers.is_empty() {
                    self.ice_servers = ice_servers;
                }
            }

            ServerSignal::Waiting => {
                if self.state == NegotiationState::Searching {
                    self.publish(EngineStatus::Waiting);
                } else if self.state.in_session() {
                    // the server closed that room before our skip reached it
                    warn!("Server says waiting while {:?}, dropping session", self.state);
                    self.teardown().await;
                    self.set_state(NegotiationState::Searching);
                    self.publish(EngineStatus::Waiting);
                } else {
                    debug!("Ignoring waiting while {:?}", self.state);
                }
            }

            ServerSignal::Matched {
                room_id,
                partner_id,
                is_initiator,
            } => {
                if self.context.is_some() {
                    warn!("Matched into room {} while still bound, dropping old session", room_id);
                    self.teardown().await;
                }

                info!(
                    "Matched with {} in room {} (initiator: {})",
                    partner_id, room_id, is_initiator
                );
                self.set_state(NegotiationState::Matched);

                if let Err(fault) = self.create_context(room_id, partner_id, is_initiator).await {
                    self.fault(fault).await;
                    return;
                }

                if is_initiator {
                    self.init_connection().await;
                } else {
                    self.set_state(NegotiationState::Answering);
                }
            }

            ServerSignal::Offer { sender, sdp } => {
                self.handle_remote_offer(sender, sdp).await;
            }

            ServerSignal::Answer { sender, sdp } => {
                let Some(ctx) = self.context.as_mut() else {
                    debug!("Dropping answer from {}: no active session", sender);
                    return;
                };
                if !ctx.bound_to(&sender) {
                    debug!("Dropping answer from {}: not the bound partner", sender);
                    return;
                }
                if !ctx.awaiting_answer {
                    warn!("Ignoring unexpected answer from {}", sender);
                    return;
                }

                ctx.awaiting_answer = false;
                info!("Received answer from {}", sender);
                if let Err(fault) = ctx.accept_answer(sdp).await {
                    self.fault(fault).await;
                }
            }

            ServerSignal::IceCandidate { sender, candidate } => {
                let Some(ctx) = self.context.as_mut() else {
                    debug!("Dropping candidate from {}: no active session", sender);
                    return;
                };
                if !ctx.bound_to(&sender) {
                    debug!("Dropping candidate from {}: not the bound partner", sender);
                    return;
                }

                if let Err(fault) = ctx.add_remote_candidate(candidate).await {
                    self.fault(fault).await;
                }
            }

            ServerSignal::PartnerLeft => self.partner_left().await,
        }
    }
}
