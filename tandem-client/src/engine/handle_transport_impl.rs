use crate::NegotiationEngine;
use crate::engine::{NegotiationState, RemoteMedia};
use crate::error::NegotiationFault;
use crate::transport::{Connectivity, TransportEvent};
use tandem_core::ClientSignal;
use tracing::{debug, info, warn};

impl NegotiationEngine {
    /// Only called for events from the current context.
    pub(super) async fn handle_transport(&mut self, event: TransportEvent) {
        let Some(ctx) = self.context.as_ref() else {
            return;
        };
        let partner_id = ctx.partner_id;

        match event {
            TransportEvent::LocalCandidate(candidate) => {
                debug!("Sending local candidate to {}", partner_id);
                self.send(ClientSignal::IceCandidate {
                    target: partner_id,
                    candidate,
                });
            }

            TransportEvent::Connectivity(Connectivity::Connected) => {
                if self.state != NegotiationState::Connected {
                    info!("Connected to {}", partner_id);
                    self.set_state(NegotiationState::Connected);
                }
            }

            TransportEvent::Connectivity(Connectivity::Disconnected) => {
                warn!("Connection to {} interrupted", partner_id);
            }

            TransportEvent::Connectivity(Connectivity::Failed) => {
                self.fault(NegotiationFault::ConnectivityFailed).await;
            }

            TransportEvent::RemoteTrack {
                stream_id,
                track_id,
            } => {
                info!("Remote track {} on stream {}", track_id, stream_id);
                self.remote_media_tx.send_modify(|media| match media {
                    Some(current) if current.stream_id == stream_id => {
                        current.track_ids.push(track_id);
                    }
                    _ => {
                        *media = Some(RemoteMedia {
                            stream_id,
                            track_ids: vec![track_id],
                        });
                    }
                });
            }
        }
    }
}
