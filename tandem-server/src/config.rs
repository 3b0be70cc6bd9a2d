use std::env;
use std::net::SocketAddr;

use tandem_core::IceServerConfig;

/// Signaling server settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Handed to every participant in `ice-config` right after `welcome`.
    pub ice_servers: Vec<IceServerConfig>,
    /// Capacity of the lobby command channel.
    pub command_buffer: usize,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            bind_addr: env::var("TANDEM_BIND")
                .ok()
                .and_then(|addr| addr.parse().ok())
                .unwrap_or(defaults.bind_addr),
            ice_servers: env::var("TANDEM_ICE_SERVERS")
                .ok()
                .map(|urls| IceServerConfig::parse_list(&urls))
                .filter(|servers| !servers.is_empty())
                .unwrap_or(defaults.ice_servers),
            command_buffer: env::var("TANDEM_COMMAND_BUFFER")
                .ok()
                .and_then(|n| n.parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or(defaults.command_buffer),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 5000)),
            ice_servers: vec![
                IceServerConfig::stun("stun:stun.l.google.com:19302"),
                IceServerConfig::stun("stun:stun1.l.google.com:19302"),
            ],
            command_buffer: 1024,
        }
    }
}
