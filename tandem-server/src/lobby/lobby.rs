use crate::lobby::lobby_command::{LobbyCommand, LobbyStats};
use crate::lobby::match_queue::MatchQueue;
use crate::lobby::registry::{ConnectionRegistry, Presence};
use crate::lobby::session_table::SessionTable;
use crate::signaling::SignalingOutput;
use std::sync::Arc;
use tandem_core::{ClientSignal, ParticipantId, RoomId, ServerSignal};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// Owns the registry, the waiting queue and the session table.
///
/// Every mutation happens inside [`Lobby::run`], one command at a time, so
/// pairing, relay validity checks and teardown never interleave.
pub struct Lobby {
    registry: ConnectionRegistry,
    queue: MatchQueue,
    sessions: SessionTable,
    command_rx: mpsc::Receiver<LobbyCommand>,
    signaling: Arc<dyn SignalingOutput>,
}

impl Lobby {
    pub fn new(
        command_rx: mpsc::Receiver<LobbyCommand>,
        signaling: Arc<dyn SignalingOutput>,
    ) -> Self {
        Self {
            registry: ConnectionRegistry::new(),
            queue: MatchQueue::new(),
            sessions: SessionTable::new(),
            command_rx,
            signaling,
        }
    }

    pub async fn run(mut self) {
        info!("Lobby event loop started");

        while let Some(cmd) = self.command_rx.recv().await {
            self.handle_command(cmd).await;
        }

        info!("Command channel closed. Shutting down lobby.");
    }

    async fn handle_command(&mut self, cmd: LobbyCommand) {
        match cmd {
            LobbyCommand::Register { reply } => {
                let id = self.registry.register();
                info!("Registered participant {}", id);
                if reply.send(id).is_err() {
                    // connection vanished before it learned its id
                    self.deregister(id).await;
                }
            }

            LobbyCommand::JoinQueue { participant_id } => {
                self.join(participant_id).await;
            }

            LobbyCommand::LeaveQueue { participant_id } => {
                self.leave(participant_id);
            }

            LobbyCommand::Skip { participant_id } => {
                self.skip(participant_id).await;
            }

            LobbyCommand::Relay { sender, signal } => {
                self.relay(sender, signal).await;
            }

            LobbyCommand::Deregister {
                participant_id,
                done,
            } => {
                self.deregister(participant_id).await;
                if let Some(done) = done {
                    let _ = done.send(());
                }
            }

            LobbyCommand::Stats { reply } => {
                let _ = reply.send(self.stats());
            }
        }
    }

    fn stats(&self) -> LobbyStats {
        LobbyStats {
            connected: self.registry.len(),
            waiting: self.queue.len(),
            sessions: self.sessions.len(),
        }
    }

    async fn join(&mut self, id: ParticipantId) {
        let Some(presence) = self.registry.presence(&id) else {
            debug!("Ignoring join-queue from unregistered {}", id);
            return;
        };

        match presence {
            Presence::Queued => {
                debug!("{} is already waiting", id);
                self.signaling.deliver(id, ServerSignal::Waiting).await;
            }
            Presence::Paired(room_id) => {
                info!("{} joined while in room {}, treating as skip", id, room_id);
                let previous = self.teardown(room_id, Some(id)).await;
                self.enqueue_or_pair(id, previous).await;
            }
            Presence::Idle => self.enqueue_or_pair(id, None).await,
        }
    }

    async fn skip(&mut self, id: ParticipantId) {
        let Some(presence) = self.registry.presence(&id) else {
            debug!("Ignoring skip from unregistered {}", id);
            return;
        };

        match presence {
            Presence::Paired(room_id) => {
                info!("{} skipped room {}", id, room_id);
                let previous = self.teardown(room_id, Some(id)).await;
                self.enqueue_or_pair(id, previous).await;
            }
            Presence::Queued => {
                self.signaling.deliver(id, ServerSignal::Waiting).await;
            }
            Presence::Idle => {
                // the session may already be gone if the partner skipped first
                let previous = self.registry.get(&id).and_then(|p| p.last_partner);
                self.enqueue_or_pair(id, previous).await;
            }
        }
    }

    fn leave(&mut self, id: ParticipantId) {
        if self.queue.remove(&id) {
            self.registry.set_presence(&id, Presence::Idle);
            info!("{} left the queue", id);
        }
    }

    /// Pairs `id` with the earliest waiting participant other than `avoid`,
    /// or parks it in the queue.
    async fn enqueue_or_pair(&mut self, id: ParticipantId, avoid: Option<ParticipantId>) {
        while let Some(waiting) = self.queue.pop_partner(&id, avoid.as_ref()) {
            if self.registry.presence(&waiting) == Some(Presence::Queued) {
                self.pair(waiting, id).await;
                return;
            }
            self.inconsistency(format_args!(
                "queue held {} whose presence is {:?}",
                waiting,
                self.registry.presence(&waiting)
            ));
        }

        self.queue.enqueue(id);
        self.registry.set_presence(&id, Presence::Queued);
        debug!("{} is waiting ({} in queue)", id, self.queue.len());
        self.signaling.deliver(id, ServerSignal::Waiting).await;
    }

    /// The earlier-queued participant becomes the initiator.
    async fn pair(&mut self, initiator: ParticipantId, responder: ParticipantId) {
        let session = self.sessions.create(initiator, responder);
        let room_id = session.room_id;

        self.registry.set_presence(&initiator, Presence::Paired(room_id));
        self.registry.set_presence(&responder, Presence::Paired(room_id));

        info!(
            "Room {} created: initiator {}, responder {}",
            room_id, initiator, responder
        );

        self.signaling
            .deliver(
                initiator,
                ServerSignal::Matched {
                    room_id,
                    partner_id: responder,
                    is_initiator: true,
                },
            )
            .await;
        self.signaling
            .deliver(
                responder,
                ServerSignal::Matched {
                    room_id,
                    partner_id: initiator,
                    is_initiator: false,
                },
            )
            .await;
    }

    /// Destroys `room_id` and tells every member except `left` that its partner is gone.
    ///
    /// Returns the partner of `left`. A second call for the same room is a no-op.
    async fn teardown(
        &mut self,
        room_id: RoomId,
        left: Option<ParticipantId>,
    ) -> Option<ParticipantId> {
        let Some(session) = self.sessions.remove(&room_id) else {
            debug!("Room {} already torn down", room_id);
            return None;
        };

        for member in session.members() {
            match self.registry.presence(&member) {
                Some(Presence::Paired(current)) if current == room_id => {
                    self.registry.set_presence(&member, Presence::Idle);
                    self.registry
                        .set_last_partner(&member, session.partner_of(&member));
                }
                other => {
                    self.inconsistency(format_args!(
                        "room {} member {} has presence {:?}",
                        room_id, member, other
                    ));
                    continue;
                }
            }

            if Some(member) != left {
                self.signaling
                    .deliver(member, ServerSignal::PartnerLeft)
                    .await;
            }
        }

        info!(
            "Room {} closed after {:?}",
            room_id,
            session.created_at.elapsed()
        );

        left.and_then(|id| session.partner_of(&id))
    }

    async fn relay(&mut self, sender: ParticipantId, signal: ClientSignal) {
        let Some(target) = signal.target() else {
            warn!("Refusing to relay queue operation from {}", sender);
            return;
        };

        let Some(Presence::Paired(room_id)) = self.registry.presence(&sender) else {
            debug!(
                "Dropping stale signal from {} to {}: sender not paired",
                sender, target
            );
            return;
        };

        let Some(session) = self.sessions.get(&room_id) else {
            self.inconsistency(format_args!(
                "{} points at missing room {}",
                sender, room_id
            ));
            self.registry.set_presence(&sender, Presence::Idle);
            return;
        };

        if session.partner_of(&sender) != Some(target) {
            debug!(
                "Dropping stale signal from {} to {}: not partners in room {}",
                sender, target, room_id
            );
            return;
        }

        if self.registry.presence(&target) != Some(Presence::Paired(room_id)) {
            self.inconsistency(format_args!(
                "room {} partner {} is not bound to it",
                room_id, target
            ));
            self.teardown(room_id, None).await;
            return;
        }

        let Some(delivery) = signal.into_delivery(sender) else {
            return;
        };
        debug!("Relaying {} from {} to {}", op_name(&delivery), sender, target);
        self.signaling.deliver(target, delivery).await;
    }

    /// Unwinds queue membership and any active session, then forgets `id`.
    async fn deregister(&mut self, id: ParticipantId) {
        let Some(presence) = self.registry.presence(&id) else {
            debug!("{} already deregistered", id);
            return;
        };

        if let Presence::Paired(room_id) = presence {
            self.teardown(room_id, Some(id)).await;
        }
        self.queue.remove(&id);
        self.registry.remove(&id);

        info!("Deregistered participant {}", id);
    }

    /// Invariant violations are bugs; release builds log and keep going.
    fn inconsistency(&self, what: std::fmt::Arguments<'_>) {
        error!("Registry inconsistency: {}", what);
        debug_assert!(false, "registry inconsistency: {}", what);
    }
}

fn op_name(signal: &ServerSignal) -> &'static str {
    match signal {
        ServerSignal::Offer { .. } => "offer",
        ServerSignal::Answer { .. } => "answer",
        ServerSignal::IceCandidate { .. } => "ice-candidate",
        _ => "control",
    }
}
