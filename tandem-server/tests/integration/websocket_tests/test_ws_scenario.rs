use tandem_core::{ClientSignal, IceCandidate, ServerSignal};

use crate::integration::init_tracing;
use crate::integration::websocket_tests::{spawn_server, wait_for_health};
use crate::utils::WsTestClient;

#[tokio::test]
async fn test_pair_negotiate_and_disconnect() {
    init_tracing();
    let addr = spawn_server().await;

    let mut p1 = WsTestClient::connect(addr).await.unwrap();
    let mut p2 = WsTestClient::connect(addr).await.unwrap();
    assert_ne!(p1.id, p2.id);

    p1.send(&ClientSignal::JoinQueue).await.unwrap();
    assert_eq!(p1.recv().await.unwrap(), ServerSignal::Waiting);

    p2.send(&ClientSignal::JoinQueue).await.unwrap();

    let ServerSignal::Matched {
        room_id,
        partner_id,
        is_initiator,
    } = p1.recv().await.unwrap()
    else {
        panic!("p1 expected matched");
    };
    assert_eq!(partner_id, p2.id);
    assert!(is_initiator);

    let ServerSignal::Matched {
        room_id: room_2,
        partner_id,
        is_initiator,
    } = p2.recv().await.unwrap()
    else {
        panic!("p2 expected matched");
    };
    assert_eq!(room_2, room_id);
    assert_eq!(partner_id, p1.id);
    assert!(!is_initiator);

    p1.send(&ClientSignal::Offer {
        target: p2.id,
        sdp: "offer-sdp".into(),
    })
    .await
    .unwrap();
    assert_eq!(
        p2.recv().await.unwrap(),
        ServerSignal::Offer {
            sender: p1.id,
            sdp: "offer-sdp".into()
        }
    );

    p2.send(&ClientSignal::Answer {
        target: p1.id,
        sdp: "answer-sdp".into(),
    })
    .await
    .unwrap();
    assert_eq!(
        p1.recv().await.unwrap(),
        ServerSignal::Answer {
            sender: p2.id,
            sdp: "answer-sdp".into()
        }
    );

    let candidate = IceCandidate::new("candidate:1 1 udp 1 10.0.0.1 9 typ host");
    p2.send(&ClientSignal::IceCandidate {
        target: p1.id,
        candidate: candidate.clone(),
    })
    .await
    .unwrap();
    assert_eq!(
        p1.recv().await.unwrap(),
        ServerSignal::IceCandidate {
            sender: p2.id,
            candidate
        }
    );

    wait_for_health(addr, |h| h["sessions"] == 1 && h["connected"] == 2).await;

    p1.close().await.unwrap();
    assert_eq!(p2.recv().await.unwrap(), ServerSignal::PartnerLeft);

    wait_for_health(addr, |h| {
        h["status"] == "ok" && h["sessions"] == 0 && h["connected"] == 1
    })
    .await;
}

#[tokio::test]
async fn test_malformed_frame_is_ignored() {
    init_tracing();
    let addr = spawn_server().await;

    let mut p1 = WsTestClient::connect(addr).await.unwrap();

    p1.send_raw("not json").await.unwrap();
    p1.send_raw(r#"{"op":"teleport"}"#).await.unwrap();
    p1.send(&ClientSignal::JoinQueue).await.unwrap();

    assert_eq!(p1.recv().await.unwrap(), ServerSignal::Waiting);
}

#[tokio::test]
async fn test_disconnect_while_waiting_leaves_queue() {
    init_tracing();
    let addr = spawn_server().await;

    let mut p1 = WsTestClient::connect(addr).await.unwrap();
    p1.send(&ClientSignal::JoinQueue).await.unwrap();
    assert_eq!(p1.recv().await.unwrap(), ServerSignal::Waiting);
    p1.close().await.unwrap();

    wait_for_health(addr, |h| h["connected"] == 0 && h["waiting"] == 0).await;

    let mut p2 = WsTestClient::connect(addr).await.unwrap();
    p2.send(&ClientSignal::JoinQueue).await.unwrap();
    assert_eq!(p2.recv().await.unwrap(), ServerSignal::Waiting);
}
