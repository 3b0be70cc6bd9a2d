use crate::transport::TransportEvent;
use tandem_core::ServerSignal;

/// Everything the engine reacts to, funneled through one ordered queue.
#[derive(Debug)]
pub enum EngineEvent {
    Start,
    Skip,
    Disconnect,
    Signal(ServerSignal),
    SignalingClosed,
    /// Raised by the transport of the context created at `epoch`.
    Transport { epoch: u64, event: TransportEvent },
    /// Fires `rejoin_delay` after a partner left.
    Rejoin { epoch: u64 },
}
