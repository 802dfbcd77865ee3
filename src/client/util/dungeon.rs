//! Pure statistics over fetched dungeon history.
//!
//! None of these functions perform remote calls; they operate on a history
//! collection already held by the dungeon store.

use chrono::{DateTime, Utc};

use crate::{client::util::time::WIB, model::dungeon::DungeonHistoryEntry};

/// Summed rewards and outcomes across a history collection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TotalRewards {
    pub exp: i64,
    pub zcoin: i64,
    pub ztoken: i64,
    pub victories: usize,
    pub defeats: usize,
}

/// Outcome statistics for a single dungeon type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DungeonStats {
    pub total: usize,
    pub victories: usize,
    pub defeats: usize,
    /// Percentage of victories rounded to the nearest integer
    pub win_rate: u32,
}

/// Sums experience & currency rewards and counts victories/defeats.
///
/// Every entry counts as exactly one victory or one defeat, so
/// `victories + defeats == history.len()`.
pub fn calculate_total_rewards(history: &[DungeonHistoryEntry]) -> TotalRewards {
    history
        .iter()
        .fold(TotalRewards::default(), |mut totals, entry| {
            totals.exp += entry.exp_gained;
            totals.zcoin += entry.zcoin_gained;
            totals.ztoken += entry.ztoken_gained;

            if entry.is_victory {
                totals.victories += 1;
            } else {
                totals.defeats += 1;
            }

            totals
        })
}

/// Computes total/victories/defeats/win rate for entries of `dungeon_type_id`.
///
/// # Returns
/// - `DungeonStats` with `win_rate == 0` when no entry matches
pub fn get_dungeon_stats(history: &[DungeonHistoryEntry], dungeon_type_id: &str) -> DungeonStats {
    let (total, victories) = history
        .iter()
        .filter(|entry| entry.dungeon_type_id == dungeon_type_id)
        .fold((0usize, 0usize), |(total, victories), entry| {
            (total + 1, victories + usize::from(entry.is_victory))
        });

    let win_rate = if total == 0 {
        0
    } else {
        (victories as f64 / total as f64 * 100.0).round() as u32
    };

    DungeonStats {
        total,
        victories,
        defeats: total - victories,
        win_rate,
    }
}

/// Formats a completion timestamp for display in WIB, e.g. `15 Jan 2024, 18:30 WIB`
pub fn format_completion_time(timestamp: DateTime<Utc>) -> String {
    timestamp
        .with_timezone(&WIB)
        .format("%d %b %Y, %H:%M WIB")
        .to_string()
}

/// Whether a player holding `balance` ZToken can pay a dungeon's entry `cost`
pub fn can_enter_dungeon(balance: i64, cost: i64) -> bool {
    balance >= cost
}
