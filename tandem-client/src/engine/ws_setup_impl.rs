use crate::NegotiationEngine;
use crate::config::ClientConfig;
use crate::engine::EngineHandle;
use crate::error::ClientError;
use crate::transport::{LocalMedia, TransportFactory};
use futures::{SinkExt, StreamExt};
use std::sync::Arc;
use tandem_core::{ClientSignal, ServerSignal};
use tokio::sync::mpsc;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, info, warn};

impl NegotiationEngine {
    /// Opens the signaling socket and spawns the engine behind it.
    ///
    /// Dropping the engine (after `disconnect`) closes the socket, which is
    /// what releases the participant on the server.
    pub async fn connect(
        config: &ClientConfig,
        factory: Arc<dyn TransportFactory>,
        local_media: LocalMedia,
    ) -> Result<EngineHandle, ClientError> {
        let (ws, _) = connect_async(config.url.as_str()).await?;
        info!("Signaling socket open: {}", config.url);

        let (mut sink, mut stream) = ws.split();
        let (outbound_tx, mut outbound_rx) = mpsc::unbounded_channel::<ClientSignal>();
        let (engine, handle) = Self::new(config, factory, local_media, outbound_tx);

        tokio::spawn(async move {
            while let Some(signal) = outbound_rx.recv().await {
                let json = match serde_json::to_string(&signal) {
                    Ok(json) => json,
                    Err(e) => {
                        warn!("Failed to encode {:?}: {}", signal, e);
                        continue;
                    }
                };
                if sink.send(Message::Text(json.into())).await.is_err() {
                    break;
                }
            }
            let _ = sink.close().await;
            debug!("Signaling writer finished");
        });

        let reader = handle.clone();
        tokio::spawn(async move {
            while let Some(msg) = stream.next().await {
                match msg {
                    Ok(Message::Text(text)) => match serde_json::from_str::<ServerSignal>(&text) {
                        Ok(signal) => {
                            if reader.signal(signal).await.is_err() {
                                return;
                            }
                        }
                        Err(e) => warn!("Invalid ServerSignal: {}", e),
                    },
                    Ok(Message::Close(_)) => break,
                    Ok(_) => {}
                    Err(e) => {
                        warn!("Signaling socket error: {}", e);
                        break;
                    }
                }
            }
            let _ = reader.signaling_closed().await;
        });

        tokio::spawn(engine.run());
        Ok(handle)
    }
}
