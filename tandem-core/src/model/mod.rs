mod ice;
mod participant;
mod room;
mod signaling;

pub use ice::{IceCandidate, IceServerConfig};
pub use participant::ParticipantId;
pub use room::RoomId;
pub use signaling::{ClientSignal, ServerSignal};
