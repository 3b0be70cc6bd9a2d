//! Random one-to-one WebRTC pairing.
//!
//! [`model`] is always available. The `server` feature exposes the lobby and
//! signaling server, `client` the negotiation engine, and `full` (the default)
//! both.

pub use tandem_core::{ParticipantId, RoomId};

pub mod model {
    pub use tandem_core::*;
}

#[cfg(feature = "server")]
pub mod server {
    pub use tandem_server::*;
}

#[cfg(feature = "client")]
pub mod client {
    pub use tandem_client::*;
}
