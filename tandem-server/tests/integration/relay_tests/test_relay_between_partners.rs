use tandem_core::{ClientSignal, IceCandidate, ServerSignal};

use crate::integration::{create_test_lobby, init_tracing, register_many, settle};

#[tokio::test]
async fn test_offer_answer_reach_only_the_partner() {
    init_tracing();

    let (lobby, signaling) = create_test_lobby();
    let ids = register_many(&lobby, 4).await;
    let (p1, p2, bystander_a, bystander_b) = (ids[0], ids[1], ids[2], ids[3]);

    for id in &ids {
        lobby.join_queue(*id).await.unwrap();
    }
    settle(&lobby).await;

    lobby
        .dispatch(
            p1,
            ClientSignal::Offer {
                target: p2,
                sdp: "offer-sdp".into(),
            },
        )
        .await
        .unwrap();
    lobby
        .dispatch(
            p2,
            ClientSignal::Answer {
                target: p1,
                sdp: "answer-sdp".into(),
            },
        )
        .await
        .unwrap();
    settle(&lobby).await;

    assert_eq!(
        signaling.last_for(&p2).await,
        Some(ServerSignal::Offer {
            sender: p1,
            sdp: "offer-sdp".into()
        })
    );
    assert_eq!(
        signaling.last_for(&p1).await,
        Some(ServerSignal::Answer {
            sender: p2,
            sdp: "answer-sdp".into()
        })
    );

    for bystander in [bystander_a, bystander_b] {
        let relayed = signaling
            .count_for(&bystander, |s| {
                matches!(s, ServerSignal::Offer { .. } | ServerSignal::Answer { .. })
            })
            .await;
        assert_eq!(relayed, 0);
    }
}

#[tokio::test]
async fn test_candidates_keep_sender_order() {
    init_tracing();

    let (lobby, signaling) = create_test_lobby();
    let ids = register_many(&lobby, 2).await;
    let (p1, p2) = (ids[0], ids[1]);

    lobby.join_queue(p1).await.unwrap();
    lobby.join_queue(p2).await.unwrap();

    for n in 0..20 {
        lobby
            .dispatch(
                p1,
                ClientSignal::IceCandidate {
                    target: p2,
                    candidate: IceCandidate::new(format!("candidate:{n}")),
                },
            )
            .await
            .unwrap();
    }
    settle(&lobby).await;

    let received: Vec<String> = signaling
        .signals_for(&p2)
        .await
        .into_iter()
        .filter_map(|s| match s {
            ServerSignal::IceCandidate { sender, candidate } => {
                assert_eq!(sender, p1);
                Some(candidate.candidate)
            }
            _ => None,
        })
        .collect();

    let expected: Vec<String> = (0..20).map(|n| format!("candidate:{n}")).collect();
    assert_eq!(received, expected);
}
