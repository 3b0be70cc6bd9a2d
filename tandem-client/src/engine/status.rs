use std::fmt;

/// Where the negotiation state machine currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NegotiationState {
    Idle,
    Searching,
    Matched,
    Offering,
    Answering,
    Negotiating,
    Connected,
    Skipped,
    PartnerLeft,
    Closed,
}

impl NegotiationState {
    /// True while a pairing session is bound.
    pub fn in_session(self) -> bool {
        matches!(
            self,
            NegotiationState::Matched
                | NegotiationState::Offering
                | NegotiationState::Answering
                | NegotiationState::Negotiating
                | NegotiationState::Connected
        )
    }
}

/// Coarse status for a UI layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineStatus {
    Idle,
    Searching,
    Waiting,
    Matched,
    PartnerLeft,
    Connected,
    Closed,
}

impl EngineStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            EngineStatus::Idle => "idle",
            EngineStatus::Searching => "searching",
            EngineStatus::Waiting => "waiting",
            EngineStatus::Matched => "matched",
            EngineStatus::PartnerLeft => "partner-left",
            EngineStatus::Connected => "connected",
            EngineStatus::Closed => "closed",
        }
    }
}

impl fmt::Display for EngineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inbound stream reference handed to the rendering side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteMedia {
    pub stream_id: String,
    pub track_ids: Vec<String>,
}
