use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tandem::client::{
    ClientConfig, EngineHandle, EngineStatus, LocalMedia, NegotiationEngine, RtcTransportFactory,
};
use tandem::model::IceServerConfig;
use tandem::server::ServerConfig;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tandem", version, about = "Random one-to-one WebRTC pairing")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the signaling server.
    Serve {
        /// Address to listen on.
        #[arg(long, env = "TANDEM_BIND")]
        bind: Option<SocketAddr>,

        /// ICE server URL handed to participants; repeatable.
        #[arg(long = "ice-server", env = "TANDEM_ICE_SERVERS", value_delimiter = ',')]
        ice_servers: Vec<String>,
    },

    /// Join the queue as a headless participant. Type `skip` or `quit` on stdin.
    Peer {
        /// Signaling endpoint.
        #[arg(long, env = "TANDEM_URL")]
        url: Option<String>,

        /// Pause before rejoining after the partner left.
        #[arg(long, env = "TANDEM_REJOIN_DELAY_MS")]
        rejoin_delay_ms: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match Cli::parse().command {
        Commands::Serve { bind, ice_servers } => {
            let mut config = ServerConfig::from_env();
            if let Some(bind) = bind {
                config.bind_addr = bind;
            }
            if !ice_servers.is_empty() {
                config.ice_servers = ice_servers
                    .iter()
                    .map(|url| url.trim())
                    .filter(|url| !url.is_empty())
                    .map(IceServerConfig::stun)
                    .collect();
            }
            serve(config).await
        }
        Commands::Peer {
            url,
            rejoin_delay_ms,
        } => {
            let mut config = ClientConfig::from_env();
            if let Some(url) = url {
                config.url = url;
            }
            if let Some(ms) = rejoin_delay_ms {
                config.rejoin_delay = Duration::from_millis(ms);
            }
            peer(config).await
        }
    }
}

async fn serve(config: ServerConfig) -> Result<()> {
    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;

    println!(
        "{} {}",
        "Signaling server on".green().bold(),
        format!("ws://{}/ws", config.bind_addr).cyan()
    );
    tandem::server::serve(listener, config).await
}

async fn peer(config: ClientConfig) -> Result<()> {
    let handle = NegotiationEngine::connect(
        &config,
        Arc::new(RtcTransportFactory),
        LocalMedia::new(),
    )
    .await
    .with_context(|| format!("Failed to connect to {}", config.url))?;

    println!("{} {}", "Connected to".green().bold(), config.url.cyan());
    println!("{}", "Commands: skip, quit".dimmed());

    tokio::spawn(print_status(handle.clone()));
    handle.start().await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                match line?.as_deref().map(str::trim) {
                    Some("skip") | Some("s") => handle.skip().await?,
                    Some("quit") | Some("q") | None => break,
                    Some("") => {}
                    Some(other) => println!("{} {}", "Unknown command:".yellow(), other),
                }
            }
            _ = handle.wait_for_status(|s| *s == EngineStatus::Closed) => {
                println!("{}", "Signaling connection lost".red().bold());
                return Ok(());
            }
        }
    }

    handle.disconnect().await?;
    let _ = handle
        .wait_for_status(|s| *s == EngineStatus::Closed)
        .await;
    Ok(())
}

async fn print_status(handle: EngineHandle) {
    let mut status = handle.watch_status();
    let mut remote = handle.watch_remote_media();

    loop {
        tokio::select! {
            changed = status.changed() => {
                if changed.is_err() {
                    return;
                }
                let current = *status.borrow_and_update();
                let label = match current {
                    EngineStatus::Connected => current.as_str().green().bold(),
                    EngineStatus::PartnerLeft => current.as_str().yellow(),
                    EngineStatus::Closed => current.as_str().red(),
                    _ => current.as_str().cyan(),
                };
                println!("{} {}", "status:".dimmed(), label);
            }
            changed = remote.changed() => {
                if changed.is_err() {
                    return;
                }
                if let Some(media) = remote.borrow_and_update().clone() {
                    println!(
                        "{} stream {} ({} tracks)",
                        "remote media:".dimmed(),
                        media.stream_id,
                        media.track_ids.len()
                    );
                }
            }
        }
    }
}
