//! Tests for DungeonProgressStore::bind_player.
//!
//! This module verifies reloading on identity change, ignoring rebinding of the same
//! identity, clearing on unbind, and discarding results loaded for a player that is
//! no longer bound.

use std::time::Duration;

use zdungeon_test_utils::prelude::*;

use super::{StoreTest, OTHER_PLAYER, PLAYER};

fn backend_for_both_players() -> FakeBackend {
    FakeBackend::new()
        .with_dungeon_types(vec![factory::mock_dungeon_type("crypt", "Ancient Crypt")])
        .with_progress(vec![
            factory::mock_progress(PLAYER, "crypt", 3),
            factory::mock_progress(OTHER_PLAYER, "crypt", 7),
        ])
}

/// Tests rebinding the player that is already bound.
///
/// Expected: No additional fetch
#[tokio::test]
async fn ignores_same_player() -> Result<(), TestError> {
    let test = StoreTest::new(backend_for_both_players());

    test.store.bind_player(Some(PLAYER.to_string())).await?;
    test.store.bind_player(Some(PLAYER.to_string())).await?;

    assert_eq!(test.backend.calls(Endpoint::DungeonTypes), 1);
    assert_eq!(test.store.player_id().as_deref(), Some(PLAYER));

    Ok(())
}

/// Tests switching to another player.
///
/// Expected: A reload with the new player's progress
#[tokio::test]
async fn reloads_on_player_change() -> Result<(), TestError> {
    let test = StoreTest::new(backend_for_both_players());

    test.store.bind_player(Some(PLAYER.to_string())).await?;
    assert_eq!(test.store.get_total_completions("crypt"), 3);

    test.store.bind_player(Some(OTHER_PLAYER.to_string())).await?;

    assert_eq!(test.backend.calls(Endpoint::DungeonTypes), 2);
    assert_eq!(test.store.get_total_completions("crypt"), 7);

    Ok(())
}

/// Tests unbinding the player.
///
/// Expected: Empty snapshot without contacting the backend
#[tokio::test]
async fn clears_snapshot_on_unbind() -> Result<(), TestError> {
    let test = StoreTest::new(backend_for_both_players());
    test.store.bind_player(Some(PLAYER.to_string())).await?;

    test.store.bind_player(None).await?;

    assert!(test.store.player_id().is_none());
    assert!(test.store.snapshot().dungeon_types.is_empty());
    assert!(test.store.snapshot().progress.is_empty());
    assert_eq!(test.backend.calls(Endpoint::DungeonTypes), 1);

    Ok(())
}

/// Tests unbinding while a load for the previous player is in flight.
///
/// Verifies that data fetched for a player who is no longer bound is never published.
///
/// Expected: Empty snapshot after the in-flight load completes
#[tokio::test(start_paused = true)]
async fn discards_result_for_unbound_player() -> Result<(), TestError> {
    let test = StoreTest::new(backend_for_both_players().with_latency(Duration::from_millis(100)));

    let store = test.store.clone();
    let load = tokio::spawn(async move { store.bind_player(Some(PLAYER.to_string())).await });
    tokio::time::sleep(Duration::from_millis(10)).await;

    test.store.bind_player(None).await?;
    load.await.expect("Load task panicked")?;

    assert!(test.store.snapshot().progress.is_empty());
    assert!(!test.store.is_loading());
    assert_eq!(test.notifier.error_count(), 0);

    Ok(())
}

/// Tests switching players while a load for the previous player is in flight.
///
/// Expected: The snapshot ends up holding the new player's data
#[tokio::test(start_paused = true)]
async fn ends_with_latest_player_after_switch() -> Result<(), TestError> {
    let test = StoreTest::new(backend_for_both_players().with_latency(Duration::from_millis(100)));

    let store = test.store.clone();
    let load = tokio::spawn(async move { store.bind_player(Some(PLAYER.to_string())).await });
    tokio::time::sleep(Duration::from_millis(10)).await;

    test.store.bind_player(Some(OTHER_PLAYER.to_string())).await?;
    load.await.expect("Load task panicked")?;

    let snapshot = test.store.snapshot();
    assert_eq!(snapshot.progress.len(), 1);
    assert_eq!(snapshot.progress[0].profile_id, OTHER_PLAYER);

    Ok(())
}

/// Tests unbinding concurrently with a load on a multi-threaded runtime.
///
/// Verifies that once both calls have returned with no player bound, no snapshot
/// loaded for the previous player remains published.
///
/// Expected: Empty snapshot whenever no player is bound
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn never_leaves_snapshot_for_unbound_player() -> Result<(), TestError> {
    for _ in 0..100 {
        let test = StoreTest::new(backend_for_both_players());

        let loading = test.store.clone();
        let load =
            tokio::spawn(async move { loading.bind_player(Some(PLAYER.to_string())).await });
        let unbinding = test.store.clone();
        let unbind = tokio::spawn(async move { unbinding.bind_player(None).await });

        load.await.expect("Load task panicked")?;
        unbind.await.expect("Unbind task panicked")?;

        if test.store.player_id().is_none() {
            assert!(test.store.snapshot().progress.is_empty());
        }
    }

    Ok(())
}
