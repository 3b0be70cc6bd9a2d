use std::env;
use std::time::Duration;

use tandem_core::IceServerConfig;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// WebSocket endpoint of the signaling server, e.g. `ws://127.0.0.1:5000/ws`.
    pub url: String,
    /// Used until the server sends `ice-config`.
    pub ice_servers: Vec<IceServerConfig>,
    /// Pause between `partner-left` and the automatic `join-queue`.
    pub rejoin_delay: Duration,
    pub event_buffer: usize,
}

impl ClientConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            url: env::var("TANDEM_URL").unwrap_or(defaults.url),
            ice_servers: env::var("TANDEM_ICE_SERVERS")
                .ok()
                .map(|urls| IceServerConfig::parse_list(&urls))
                .filter(|servers| !servers.is_empty())
                .unwrap_or(defaults.ice_servers),
            rejoin_delay: env::var("TANDEM_REJOIN_DELAY_MS")
                .ok()
                .and_then(|ms| ms.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.rejoin_delay),
            event_buffer: defaults.event_buffer,
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            url: "ws://127.0.0.1:5000/ws".to_owned(),
            ice_servers: vec![IceServerConfig::stun("stun:stun.l.google.com:19302")],
            rejoin_delay: Duration::from_secs(2),
            event_buffer: 256,
        }
    }
}
