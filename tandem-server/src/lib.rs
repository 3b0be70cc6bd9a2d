mod config;
mod error;
mod lobby;
mod server;
mod signaling;

pub use config::ServerConfig;
pub use error::LobbyError;
pub use lobby::*;
pub use server::{app, router, serve};
pub use signaling::*;
