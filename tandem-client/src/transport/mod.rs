mod local_media;
mod peer_transport;
mod rtc_transport;
mod transport_event;

pub use local_media::*;
pub use peer_transport::*;
pub use rtc_transport::*;
pub use transport_event::*;
