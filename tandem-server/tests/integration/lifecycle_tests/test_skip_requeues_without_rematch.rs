use tandem_core::ServerSignal;

use crate::integration::{create_test_lobby, init_tracing, register_many, settle};

#[tokio::test]
async fn test_skip_notifies_partner_and_requeues() {
    init_tracing();

    let (lobby, signaling) = create_test_lobby();
    let ids = register_many(&lobby, 2).await;
    let (p1, p2) = (ids[0], ids[1]);

    lobby.join_queue(p1).await.unwrap();
    lobby.join_queue(p2).await.unwrap();
    lobby.skip(p1).await.unwrap();
    settle(&lobby).await;

    assert_eq!(signaling.last_for(&p2).await, Some(ServerSignal::PartnerLeft));
    assert_eq!(signaling.last_for(&p1).await, Some(ServerSignal::Waiting));
    assert_eq!(
        signaling
            .count_for(&p1, |s| matches!(s, ServerSignal::PartnerLeft))
            .await,
        0,
        "the skipper is not told its own partner left"
    );

    let stats = lobby.stats().await.unwrap();
    assert_eq!(stats.sessions, 0);
    assert_eq!(stats.waiting, 1);
}

#[tokio::test]
async fn test_skip_pairs_with_someone_else() {
    init_tracing();

    let (lobby, signaling) = create_test_lobby();
    let ids = register_many(&lobby, 3).await;
    let (a, b, c) = (ids[0], ids[1], ids[2]);

    lobby.join_queue(a).await.unwrap();
    lobby.join_queue(b).await.unwrap();
    lobby.join_queue(c).await.unwrap();
    lobby.skip(a).await.unwrap();
    settle(&lobby).await;

    let a_matches = signaling.matches_for(&a).await;
    assert_eq!(a_matches.len(), 2);
    assert_eq!(a_matches[1].1, c);
    assert!(!a_matches[1].2, "C waited first so C initiates");

    let c_matches = signaling.matches_for(&c).await;
    assert_eq!(c_matches[0].1, a);
    assert!(c_matches[0].2);
}

#[tokio::test]
async fn test_both_skip_does_not_rematch_the_same_pair() {
    init_tracing();

    let (lobby, signaling) = create_test_lobby();
    let ids = register_many(&lobby, 2).await;
    let (a, b) = (ids[0], ids[1]);

    lobby.join_queue(a).await.unwrap();
    lobby.join_queue(b).await.unwrap();
    lobby.skip(a).await.unwrap();
    // B skips too, racing A: its session is already gone
    lobby.skip(b).await.unwrap();
    settle(&lobby).await;

    assert_eq!(signaling.matches_for(&a).await.len(), 1);
    assert_eq!(signaling.matches_for(&b).await.len(), 1);
    assert_eq!(lobby.stats().await.unwrap().waiting, 2);
}
