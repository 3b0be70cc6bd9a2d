mod context;
mod create_context_impl;
mod engine_event;
mod engine_handle;
mod handle_remote_offer_impl;
mod handle_signal_impl;
mod handle_transport_impl;
mod init_connection_impl;
mod status;
mod teardown_impl;
mod ws_setup_impl;

pub use engine_event::EngineEvent;
pub use engine_handle::EngineHandle;
pub use status::{EngineStatus, NegotiationState, RemoteMedia};

use crate::config::ClientConfig;
use crate::transport::{LocalMedia, TransportFactory};
use context::NegotiationContext;
use std::sync::Arc;
use std::time::Duration;
use tandem_core::{ClientSignal, IceServerConfig, ParticipantId};
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

/// Per-participant negotiation state machine.
///
/// All inputs arrive as [`EngineEvent`]s on a single queue and are handled one
/// at a time by [`NegotiationEngine::run`]. The engine exclusively owns the
/// current [`NegotiationContext`]; stale transport callbacks and timers are
/// recognised by their epoch and dropped.
pub struct NegotiationEngine {
    state: NegotiationState,
    participant_id: Option<ParticipantId>,
    ice_servers: Vec<IceServerConfig>,
    rejoin_delay: Duration,
    context: Option<NegotiationContext>,
    epoch: u64,
    factory: Arc<dyn TransportFactory>,
    local_media: LocalMedia,
    outbound: mpsc::UnboundedSender<ClientSignal>,
    events_tx: mpsc::Sender<EngineEvent>,
    events_rx: mpsc::Receiver<EngineEvent>,
    status_tx: watch::Sender<EngineStatus>,
    remote_media_tx: watch::Sender<Option<RemoteMedia>>,
}

impl NegotiationEngine {
    /// Builds an engine that writes its signaling frames to `outbound`.
    pub fn new(
        config: &ClientConfig,
        factory: Arc<dyn TransportFactory>,
        local_media: LocalMedia,
        outbound: mpsc::UnboundedSender<ClientSignal>,
    ) -> (Self, EngineHandle) {
        let (events_tx, events_rx) = mpsc::channel(config.event_buffer);
        let (status_tx, status_rx) = watch::channel(EngineStatus::Idle);
        let (remote_media_tx, remote_media_rx) = watch::channel(None);

        let handle = EngineHandle::new(events_tx.clone(), status_rx, remote_media_rx);
        let engine = Self {
            state: NegotiationState::Idle,
            participant_id: None,
            ice_servers: config.ice_servers.clone(),
            rejoin_delay: config.rejoin_delay,
            context: None,
            epoch: 0,
            factory,
            local_media,
            outbound,
            events_tx,
            events_rx,
            status_tx,
            remote_media_tx,
        };
        (engine, handle)
    }

    pub async fn run(mut self) {
        info!("Negotiation engine started");

        while let Some(event) = self.events_rx.recv().await {
            self.handle_event(event).await;
            if self.state == NegotiationState::Closed {
                break;
            }
        }

        info!("Negotiation engine stopped");
    }

    async fn handle_event(&mut self, event: EngineEvent) {
        match event {
            EngineEvent::Start => self.start(),
            EngineEvent::Skip => self.skip().await,
            EngineEvent::Disconnect => {
                info!("Disconnect requested");
                self.close().await;
            }
            EngineEvent::Signal(signal) => self.handle_signal(signal).await,
            EngineEvent::SignalingClosed => {
                warn!("Signaling channel closed");
                self.close().await;
            }
            EngineEvent::Transport { epoch, event } => {
                match &self.context {
                    Some(ctx) if ctx.epoch == epoch => self.handle_transport(event).await,
                    _ => debug!("Ignoring transport event from stale context {}", epoch),
                }
            }
            EngineEvent::Rejoin { epoch } => {
                if self.state == NegotiationState::PartnerLeft && self.epoch == epoch {
                    info!("Rejoining the queue");
                    self.enter_searching(ClientSignal::JoinQueue);
                } else {
                    debug!("Ignoring stale rejoin timer {}", epoch);
                }
            }
        }
    }

    fn start(&mut self) {
        match self.state {
            NegotiationState::Idle | NegotiationState::PartnerLeft => {
                self.enter_searching(ClientSignal::JoinQueue);
            }
            state => debug!("Ignoring start while {:?}", state),
        }
    }

    /// Sends `request` to the queue and publishes `searching`.
    fn enter_searching(&mut self, request: ClientSignal) {
        self.send(request);
        self.set_state(NegotiationState::Searching);
    }

    fn send(&self, signal: ClientSignal) {
        if self.outbound.send(signal).is_err() {
            warn!("Signaling writer is gone, dropping outbound frame");
        }
    }

    fn set_state(&mut self, state: NegotiationState) {
        debug!("State {:?} -> {:?}", self.state, state);
        self.state = state;

        let status = match state {
            NegotiationState::Idle => EngineStatus::Idle,
            NegotiationState::Searching | NegotiationState::Skipped => EngineStatus::Searching,
            NegotiationState::Matched
            | NegotiationState::Offering
            | NegotiationState::Answering
            | NegotiationState::Negotiating => EngineStatus::Matched,
            NegotiationState::Connected => EngineStatus::Connected,
            NegotiationState::PartnerLeft => EngineStatus::PartnerLeft,
            NegotiationState::Closed => EngineStatus::Closed,
        };
        self.publish(status);
    }

    fn publish(&self, status: EngineStatus) {
        self.status_tx.send_if_modified(|current| {
            let changed = *current != status;
            *current = status;
            changed
        });
    }

    pub fn state(&self) -> NegotiationState {
        self.state
    }

    pub fn participant_id(&self) -> Option<ParticipantId> {
        self.participant_id
    }
}
