//! Tests for the REST implementation of DungeonBackend.
//!
//! This module verifies the table queries issued for the dungeon catalog, per-player
//! progress and recent history, including the filters, ordering and limit sent to
//! the backend and decoding of the embedded dungeon type summary.

use mockito::Matcher;
use zdungeon::client::data::DungeonBackend;
use zdungeon_test_utils::prelude::*;

/// Tests fetching the active dungeon catalog.
///
/// Verifies that the catalog is requested with the active filter and ordered by
/// name, and that the returned rows are decoded in order.
///
/// Expected: Ok with both dungeon types, one request matching the filters
#[tokio::test]
async fn fetches_active_dungeon_types_ordered_by_name() -> Result<(), TestError> {
    let mut test = RestTest::new().await;
    let rows = vec![
        factory::mock_dungeon_type("crypt", "Ancient Crypt"),
        factory::mock_dungeon_type("tower", "Shadow Tower"),
    ];
    let body = serde_json::to_string(&rows)?;

    let mock = test
        .with_select_response(
            "dungeon_types",
            Matcher::AllOf(vec![
                Matcher::UrlEncoded("select".into(), "*".into()),
                Matcher::UrlEncoded("is_active".into(), "eq.true".into()),
                Matcher::UrlEncoded("order".into(), "name.asc".into()),
            ]),
            200,
            &body,
            1,
        )
        .await;

    let dungeon_types = test.client.fetch_active_dungeon_types().await?;

    assert_eq!(dungeon_types, rows);
    mock.assert_async().await;

    Ok(())
}

/// Tests fetching progress rows for a player.
///
/// Verifies that the progress query filters on the player's profile ID.
///
/// Expected: Ok with the player's progress rows
#[tokio::test]
async fn fetches_progress_for_player() -> Result<(), TestError> {
    let mut test = RestTest::new().await;
    let rows = vec![
        factory::mock_progress("player-1", "crypt", 4),
        factory::mock_progress("player-1", "tower", 12),
    ];
    let body = serde_json::to_string(&rows)?;

    let mock = test
        .with_select_response(
            "dungeon_progress",
            Matcher::UrlEncoded("profile_id".into(), "eq.player-1".into()),
            200,
            &body,
            1,
        )
        .await;

    let progress = test.client.fetch_dungeon_progress("player-1").await?;

    assert_eq!(progress, rows);
    mock.assert_async().await;

    Ok(())
}

/// Tests fetching recent history with the embedded dungeon type summary.
///
/// Verifies that the history query requests the joined dungeon type name & image,
/// orders by completion time descending and forwards the limit.
///
/// Expected: Ok with entries carrying their dungeon type summary
#[tokio::test]
async fn fetches_recent_history_with_dungeon_type() -> Result<(), TestError> {
    let mut test = RestTest::new().await;
    let rows = vec![
        factory::mock_history_entry("player-1", "crypt", true, 1),
        factory::mock_history_entry("player-1", "tower", false, 5),
    ];
    let body = serde_json::to_string(&rows)?;

    let mock = test
        .with_select_response(
            "dungeon_history",
            Matcher::AllOf(vec![
                Matcher::UrlEncoded(
                    "select".into(),
                    "*,dungeon_type:dungeon_types(name,image_url)".into(),
                ),
                Matcher::UrlEncoded("profile_id".into(), "eq.player-1".into()),
                Matcher::UrlEncoded("order".into(), "completed_at.desc".into()),
                Matcher::UrlEncoded("limit".into(), "20".into()),
            ]),
            200,
            &body,
            1,
        )
        .await;

    let history = test.client.fetch_dungeon_history("player-1", 20).await?;

    assert_eq!(history.len(), 2);
    assert_eq!(
        history[0].dungeon_type.as_ref().map(|t| t.name.as_str()),
        Some("crypt")
    );
    assert!(history[0].is_victory);
    mock.assert_async().await;

    Ok(())
}

/// Tests decoding a history row without the embedded summary.
///
/// Verifies that a row whose dungeon type join is null still decodes.
///
/// Expected: Ok with `dungeon_type` set to None
#[tokio::test]
async fn decodes_history_without_dungeon_type() -> Result<(), TestError> {
    let mut test = RestTest::new().await;
    let body = r#"[{
        "id": "h1",
        "profile_id": "player-1",
        "dungeon_type_id": "crypt",
        "rounds_completed": 2,
        "is_victory": false,
        "exp_gained": 10,
        "zcoin_gained": 0,
        "ztoken_gained": 0,
        "master_title_earned": null,
        "completed_at": "2024-01-15T11:00:00Z",
        "dungeon_type": null
    }]"#;

    let mock = test
        .with_select_response("dungeon_history", Matcher::Any, 200, body, 1)
        .await;

    let history = test.client.fetch_dungeon_history("player-1", 20).await?;

    assert_eq!(history.len(), 1);
    assert!(history[0].dungeon_type.is_none());
    mock.assert_async().await;

    Ok(())
}
