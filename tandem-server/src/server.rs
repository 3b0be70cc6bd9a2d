use crate::config::ServerConfig;
use crate::lobby::{Lobby, LobbyHandle, LobbyStats};
use crate::signaling::{SignalingService, ws_handler};
use anyhow::{Context, Result};
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tracing::{error, info};

#[derive(Serialize)]
struct HealthStatus {
    status: &'static str,
    #[serde(flatten)]
    lobby: LobbyStats,
}

async fn health_check(
    State(service): State<SignalingService>,
) -> Result<Json<HealthStatus>, StatusCode> {
    match service.lobby().stats().await {
        Ok(lobby) => Ok(Json(HealthStatus {
            status: "ok",
            lobby,
        })),
        Err(e) => {
            error!("Health check failed: {}", e);
            Err(StatusCode::SERVICE_UNAVAILABLE)
        }
    }
}

pub fn router(service: SignalingService) -> Router {
    Router::new()
        .route("/ws", get(ws_handler))
        .route("/health", get(health_check))
        .with_state(service)
}

/// Spawns the lobby task and wires it to a fresh signaling service.
pub fn app(config: &ServerConfig) -> Router {
    let (cmd_tx, cmd_rx) = mpsc::channel(config.command_buffer);
    let signaling = SignalingService::new(LobbyHandle::new(cmd_tx), config.ice_servers.clone());

    let lobby = Lobby::new(cmd_rx, Arc::new(signaling.clone()));
    tokio::spawn(lobby.run());

    router(signaling)
}

pub async fn serve(listener: TcpListener, config: ServerConfig) -> Result<()> {
    let addr = listener.local_addr().context("listener has no local address")?;
    let app = app(&config);

    info!("Signaling server listening on ws://{}/ws", addr);
    axum::serve(listener, app)
        .await
        .context("signaling server stopped")?;
    Ok(())
}
