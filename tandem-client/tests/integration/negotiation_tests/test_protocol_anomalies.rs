use std::time::Duration;
use tandem_client::EngineStatus;
use tandem_core::{ClientSignal, IceCandidate, ParticipantId, ServerSignal};

use crate::integration::init_tracing;
use crate::utils::{TestPeer, TransportCall};

#[tokio::test]
async fn test_answer_while_not_offering_is_ignored() {
    init_tracing();
    let mut peer = TestPeer::spawn();
    let partner_id = peer.match_with(false).await;

    peer.signal(ServerSignal::Answer {
        sender: partner_id,
        sdp: "stray-answer".into(),
    })
    .await;

    // the session survives and still completes normally
    peer.signal(ServerSignal::Offer {
        sender: partner_id,
        sdp: "remote-offer".into(),
    })
    .await;
    assert!(matches!(
        peer.next_outbound().await,
        ClientSignal::Answer { .. }
    ));

    let transport = peer.factory.transport(0).await;
    assert!(
        !transport
            .calls()
            .iter()
            .any(|c| matches!(c, TransportCall::SetRemoteAnswer(_)))
    );
    assert_eq!(peer.handle.status(), EngineStatus::Matched);
}

#[tokio::test]
async fn test_second_answer_is_ignored() {
    init_tracing();
    let mut peer = TestPeer::spawn();
    let partner_id = peer.match_with(true).await;
    assert!(matches!(peer.next_outbound().await, ClientSignal::Offer { .. }));

    for sdp in ["first", "second"] {
        peer.signal(ServerSignal::Answer {
            sender: partner_id,
            sdp: sdp.into(),
        })
        .await;
    }
    // a candidate afterwards acts as a barrier for the answers above
    peer.signal(ServerSignal::IceCandidate {
        sender: partner_id,
        candidate: IceCandidate::new("candidate:barrier"),
    })
    .await;

    let transport = peer.factory.transport(0).await;
    assert_eq!(
        transport.wait_for_calls(3).await,
        vec![
            TransportCall::CreateOffer,
            TransportCall::SetRemoteAnswer("first".into()),
            TransportCall::AddCandidate("candidate:barrier".into()),
        ]
    );
    assert!(peer.try_outbound().is_none(), "no skip was issued");
}

#[tokio::test]
async fn test_signals_from_strangers_are_dropped() {
    init_tracing();
    let mut peer = TestPeer::spawn();
    let partner_id = peer.match_with(false).await;
    let stranger = ParticipantId::new();

    peer.signal(ServerSignal::Offer {
        sender: stranger,
        sdp: "stranger-offer".into(),
    })
    .await;
    peer.signal(ServerSignal::IceCandidate {
        sender: stranger,
        candidate: IceCandidate::new("candidate:stranger"),
    })
    .await;
    peer.signal(ServerSignal::Offer {
        sender: partner_id,
        sdp: "remote-offer".into(),
    })
    .await;

    assert_eq!(
        peer.next_outbound().await,
        ClientSignal::Answer {
            target: partner_id,
            sdp: "mock-answer".into()
        }
    );
    let transport = peer.factory.transport(0).await;
    assert_eq!(
        transport.calls(),
        vec![
            TransportCall::SetRemoteOffer("remote-offer".into()),
            TransportCall::CreateAnswer
        ]
    );
}

#[tokio::test]
async fn test_relay_frames_without_session_are_dropped() {
    init_tracing();
    let mut peer = TestPeer::spawn();
    peer.handle.start().await.unwrap();
    assert_eq!(peer.next_outbound().await, ClientSignal::JoinQueue);

    peer.signal(ServerSignal::Offer {
        sender: ParticipantId::new(),
        sdp: "late-offer".into(),
    })
    .await;
    peer.signal(ServerSignal::PartnerLeft).await;
    peer.signal(ServerSignal::Waiting).await;
    peer.wait_status(EngineStatus::Waiting).await;

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(peer.factory.created(), 0);
    assert!(peer.try_outbound().is_none());
}
