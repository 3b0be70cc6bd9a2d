pub mod config;
pub mod engine;
pub mod error;
pub mod transport;

pub use config::ClientConfig;
pub use engine::*;
pub use error::{ClientError, NegotiationFault};
pub use transport::*;
