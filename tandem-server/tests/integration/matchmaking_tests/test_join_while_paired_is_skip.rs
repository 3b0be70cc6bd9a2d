use tandem_core::ServerSignal;

use crate::integration::{create_test_lobby, init_tracing, register_many, settle};

#[tokio::test]
async fn test_join_while_paired_is_skip() {
    init_tracing();

    let (lobby, signaling) = create_test_lobby();
    let ids = register_many(&lobby, 3).await;
    let (a, b, c) = (ids[0], ids[1], ids[2]);

    lobby.join_queue(a).await.unwrap();
    lobby.join_queue(b).await.unwrap();
    settle(&lobby).await;
    assert_eq!(signaling.matches_for(&a).await[0].1, b);

    // B asks to join again while paired with A: A loses its partner, B requeues.
    lobby.join_queue(b).await.unwrap();
    settle(&lobby).await;

    assert_eq!(signaling.last_for(&a).await, Some(ServerSignal::PartnerLeft));
    assert_eq!(signaling.last_for(&b).await, Some(ServerSignal::Waiting));

    lobby.join_queue(c).await.unwrap();
    settle(&lobby).await;

    let b_matches = signaling.matches_for(&b).await;
    assert_eq!(b_matches.len(), 2);
    assert_eq!(b_matches[1].1, c);
    assert!(b_matches[1].2, "B waited first so B initiates");
}
