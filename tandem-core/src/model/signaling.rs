use crate::model::ice::{IceCandidate, IceServerConfig};
use crate::model::participant::ParticipantId;
use crate::model::room::RoomId;
use serde::{Deserialize, Serialize};

/// Frames a participant sends to the signaling server.
///
/// Relayed variants name the partner they are addressed to with `target`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "op",
    content = "d",
    rename_all = "kebab-case",
    rename_all_fields = "camelCase"
)]
pub enum ClientSignal {
    JoinQueue,
    LeaveQueue,
    Skip,
    Offer {
        target: ParticipantId,
        sdp: String,
    },
    Answer {
        target: ParticipantId,
        sdp: String,
    },
    IceCandidate {
        target: ParticipantId,
        candidate: IceCandidate,
    },
}

impl ClientSignal {
    /// Partner a relayed frame is addressed to, `None` for queue operations.
    pub fn target(&self) -> Option<ParticipantId> {
        match self {
            ClientSignal::Offer { target, .. }
            | ClientSignal::Answer { target, .. }
            | ClientSignal::IceCandidate { target, .. } => Some(*target),
            ClientSignal::JoinQueue | ClientSignal::LeaveQueue | ClientSignal::Skip => None,
        }
    }

    /// Re-tags a relayed frame for delivery. Queue operations are not relayable.
    pub fn into_delivery(self, sender: ParticipantId) -> Option<ServerSignal> {
        match self {
            ClientSignal::Offer { sdp, .. } => Some(ServerSignal::Offer { sender, sdp }),
            ClientSignal::Answer { sdp, .. } => Some(ServerSignal::Answer { sender, sdp }),
            ClientSignal::IceCandidate { candidate, .. } => {
                Some(ServerSignal::IceCandidate { sender, candidate })
            }
            ClientSignal::JoinQueue | ClientSignal::LeaveQueue | ClientSignal::Skip => None,
        }
    }
}

/// Frames the signaling server sends to a participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "op",
    content = "d",
    rename_all = "kebab-case",
    rename_all_fields = "camelCase"
)]
pub enum ServerSignal {
    Welcome {
        participant_id: ParticipantId,
    },
    IceConfig {
        ice_servers: Vec<IceServerConfig>,
    },
    Waiting,
    Matched {
        room_id: RoomId,
        partner_id: ParticipantId,
        is_initiator: bool,
    },
    Offer {
        sender: ParticipantId,
        sdp: String,
    },
    Answer {
        sender: ParticipantId,
        sdp: String,
    },
    IceCandidate {
        sender: ParticipantId,
        candidate: IceCandidate,
    },
    PartnerLeft,
}
