use anyhow::{Result, bail};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tandem_client::{LocalTrack, PeerTransport, TransportEvent, TransportEventSender, TransportFactory};
use tandem_core::{IceCandidate, IceServerConfig};

/// What the engine asked a transport to do, in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportCall {
    CreateOffer,
    CreateAnswer,
    SetRemoteOffer(String),
    SetRemoteAnswer(String),
    AddCandidate(String),
    Close,
}

#[derive(Default)]
struct Behaviour {
    fail_remote_description: bool,
    fail_local_description: bool,
    fail_candidate: bool,
    fail_create: bool,
}

/// Scripted transport: records calls, never touches the network.
pub struct MockTransport {
    calls: Arc<Mutex<Vec<TransportCall>>>,
    fail_remote_description: bool,
    fail_local_description: bool,
    fail_candidate: bool,
    offers: usize,
}

impl MockTransport {
    fn record(&self, call: TransportCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl PeerTransport for MockTransport {
    async fn create_offer(&self) -> Result<String> {
        self.record(TransportCall::CreateOffer);
        if self.fail_local_description {
            bail!("offer generation failed");
        }
        Ok(format!("mock-offer-{}", self.offers))
    }

    async fn create_answer(&self) -> Result<String> {
        self.record(TransportCall::CreateAnswer);
        if self.fail_local_description {
            bail!("answer generation failed");
        }
        Ok("mock-answer".to_owned())
    }

    async fn set_remote_offer(&self, sdp: String) -> Result<()> {
        self.record(TransportCall::SetRemoteOffer(sdp));
        if self.fail_remote_description {
            bail!("malformed offer");
        }
        Ok(())
    }

    async fn set_remote_answer(&self, sdp: String) -> Result<()> {
        self.record(TransportCall::SetRemoteAnswer(sdp));
        if self.fail_remote_description {
            bail!("malformed answer");
        }
        Ok(())
    }

    async fn add_ice_candidate(&self, candidate: IceCandidate) -> Result<()> {
        self.record(TransportCall::AddCandidate(candidate.candidate));
        if self.fail_candidate {
            bail!("candidate rejected");
        }
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        self.record(TransportCall::Close);
        Ok(())
    }
}

/// Test-side view of one transport the engine created.
#[derive(Clone)]
pub struct MockTransportHandle {
    calls: Arc<Mutex<Vec<TransportCall>>>,
    events: TransportEventSender,
    pub ice_servers: Vec<IceServerConfig>,
    pub track_count: usize,
}

impl MockTransportHandle {
    pub fn calls(&self) -> Vec<TransportCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Waits until at least `n` calls were recorded.
    pub async fn wait_for_calls(&self, n: usize) -> Vec<TransportCall> {
        tokio::time::timeout(Duration::from_secs(5), async {
            loop {
                let calls = self.calls();
                if calls.len() >= n {
                    return calls;
                }
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("transport calls never arrived")
    }

    /// Raise a transport callback as webrtc would.
    pub async fn emit(&self, event: TransportEvent) {
        self.events.send(event).await;
    }
}

#[derive(Clone, Default)]
pub struct MockTransportFactory {
    behaviour: Arc<Mutex<Behaviour>>,
    created: Arc<Mutex<Vec<MockTransportHandle>>>,
}

impl MockTransportFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_remote_description(&self, fail: bool) {
        self.behaviour.lock().unwrap().fail_remote_description = fail;
    }

    pub fn fail_local_description(&self, fail: bool) {
        self.behaviour.lock().unwrap().fail_local_description = fail;
    }

    pub fn fail_candidate(&self, fail: bool) {
        self.behaviour.lock().unwrap().fail_candidate = fail;
    }

    pub fn fail_create(&self, fail: bool) {
        self.behaviour.lock().unwrap().fail_create = fail;
    }

    pub fn created(&self) -> usize {
        self.created.lock().unwrap().len()
    }

    /// Waits for the `index`-th transport (0-based) to be created.
    pub async fn transport(&self, index: usize) -> MockTransportHandle {
        tokio::time::timeout(Duration::from_secs(5), async {
            loop {
                if let Some(t) = self.created.lock().unwrap().get(index).cloned() {
                    return t;
                }
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("transport was never created")
    }
}

#[async_trait]
impl TransportFactory for MockTransportFactory {
    async fn create(
        &self,
        ice_servers: &[IceServerConfig],
        local_tracks: Vec<LocalTrack>,
        events: TransportEventSender,
    ) -> Result<Box<dyn PeerTransport>> {
        let (fail_create, fail_remote_description, fail_local_description, fail_candidate) = {
            let b = self.behaviour.lock().unwrap();
            (
                b.fail_create,
                b.fail_remote_description,
                b.fail_local_description,
                b.fail_candidate,
            )
        };
        if fail_create {
            bail!("no transport for you");
        }

        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut created = self.created.lock().unwrap();
        created.push(MockTransportHandle {
            calls: calls.clone(),
            events,
            ice_servers: ice_servers.to_vec(),
            track_count: local_tracks.len(),
        });

        Ok(Box::new(MockTransport {
            calls,
            fail_remote_description,
            fail_local_description,
            fail_candidate,
            offers: created.len(),
        }))
    }
}
