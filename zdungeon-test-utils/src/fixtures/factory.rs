//! Factories for model values with standard test data.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use zdungeon::{
    client::util::time::WIB,
    model::{
        dungeon::{DungeonHistoryEntry, DungeonProgress, DungeonType, DungeonTypeSummary},
        ztoken::{ResetResult, ResetStatus},
    },
};

/// Timestamp all fixtures are relative to (2024-01-15 12:00:00 UTC)
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap()
}

/// Create an active dungeon type.
///
/// # Arguments
/// - `id` - Dungeon type ID
/// - `name` - Display name, also used to derive the master title
pub fn mock_dungeon_type(id: &str, name: &str) -> DungeonType {
    DungeonType {
        id: id.to_string(),
        name: name.to_string(),
        description: format!("The {} awaits", name),
        image_url: Some(format!("https://cdn.example.com/dungeons/{}.png", id)),
        ztoken_cost: 10,
        exp_reward: 100,
        zcoin_reward: 50,
        ztoken_reward: 2,
        master_title: format!("{} Master", name),
        master_requirement: 10,
        is_active: true,
    }
}

/// Create a progress row for `profile_id` in dungeon type `dungeon_type_id`
pub fn mock_progress(profile_id: &str, dungeon_type_id: &str, total_completions: i64) -> DungeonProgress {
    DungeonProgress {
        id: format!("progress-{}-{}", profile_id, dungeon_type_id),
        profile_id: profile_id.to_string(),
        dungeon_type_id: dungeon_type_id.to_string(),
        total_completions,
        last_completed_at: Some(base_time()),
    }
}

/// Create a history entry; `minutes_ago` orders entries relative to [`base_time`]
pub fn mock_history_entry(
    profile_id: &str,
    dungeon_type_id: &str,
    is_victory: bool,
    minutes_ago: i64,
) -> DungeonHistoryEntry {
    DungeonHistoryEntry {
        id: format!("history-{}-{}-{}", profile_id, dungeon_type_id, minutes_ago),
        profile_id: profile_id.to_string(),
        dungeon_type_id: dungeon_type_id.to_string(),
        rounds_completed: if is_victory { 5 } else { 3 },
        is_victory,
        exp_gained: if is_victory { 100 } else { 20 },
        zcoin_gained: if is_victory { 50 } else { 0 },
        ztoken_gained: if is_victory { 2 } else { 0 },
        master_title_earned: None,
        completed_at: base_time() - Duration::minutes(minutes_ago),
        dungeon_type: Some(DungeonTypeSummary {
            name: dungeon_type_id.to_string(),
            image_url: None,
        }),
    }
}

/// Create a reset status for 2024-01-15 with the given flag
pub fn mock_reset_status(reset_needed: bool) -> ResetStatus {
    ResetStatus {
        current_wib_time: WIB.with_ymd_and_hms(2024, 1, 15, 18, 5, 0).unwrap(),
        current_wib_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        last_reset_date: NaiveDate::from_ymd_opt(2024, 1, 14),
        next_reset_time: WIB.with_ymd_and_hms(2024, 1, 16, 18, 0, 0).unwrap(),
        profiles_below_threshold: 42,
        reset_needed,
        hours_until_reset: 23.9,
    }
}

/// Create a successful reset result
pub fn mock_reset_result(profiles_affected: i64) -> ResetResult {
    ResetResult {
        success: true,
        message: "ZToken reset completed".to_string(),
        profiles_affected: Some(profiles_affected),
        total_profiles_checked: Some(100),
        reset_date: NaiveDate::from_ymd_opt(2024, 1, 15),
        wib_time: Some("18:00:05".to_string()),
    }
}
