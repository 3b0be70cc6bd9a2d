//! Integration tests for tandem-server.
//!
//! Tests are organized by functionality:
//! - `matchmaking_tests` - queue ordering and pairing
//! - `relay_tests` - offer/answer/candidate routing
//! - `lifecycle_tests` - skip, leave and disconnect unwinding
//! - `websocket_tests` - the full server over real sockets


use std::sync::Arc;
use tracing::Level;

use tandem_core::ParticipantId;
use tandem_server::LobbyHandle;

use crate::utils::MockSignalingOutput;

/// Initialize tracing for tests (call once per test).
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// Spawn a lobby that answers through a recording signaling mock.
pub fn create_test_lobby() -> (LobbyHandle, MockSignalingOutput) {
    let signaling = MockSignalingOutput::new();
    let lobby = LobbyHandle::spawn(Arc::new(signaling.clone()), 100);
    (lobby, signaling)
}

/// Register `n` participants in order.
pub async fn register_many(lobby: &LobbyHandle, n: usize) -> Vec<ParticipantId> {
    let mut ids = Vec::with_capacity(n);
    for _ in 0..n {
        ids.push(lobby.register().await.expect("register failed"));
    }
    ids
}

/// The lobby handles commands in order; a stats round trip means everything
/// sent before it has been processed.
pub async fn settle(lobby: &LobbyHandle) {
    lobby.stats().await.expect("lobby stopped");
}
