use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Dungeon catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DungeonType {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub image_url: Option<String>,
    /// ZToken amount required to enter the dungeon
    pub ztoken_cost: i64,
    pub exp_reward: i64,
    pub zcoin_reward: i64,
    pub ztoken_reward: i64,
    /// Title granted once a player reaches `master_requirement` completions
    pub master_title: String,
    pub master_requirement: i64,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

/// Per-player completion counter for a single dungeon type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DungeonProgress {
    pub id: String,
    pub profile_id: String,
    pub dungeon_type_id: String,
    pub total_completions: i64,
    #[serde(default)]
    pub last_completed_at: Option<DateTime<Utc>>,
}

/// Dungeon type name & image embedded in a history row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DungeonTypeSummary {
    pub name: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// A single dungeon attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DungeonHistoryEntry {
    pub id: String,
    pub profile_id: String,
    pub dungeon_type_id: String,
    pub rounds_completed: i32,
    pub is_victory: bool,
    pub exp_gained: i64,
    pub zcoin_gained: i64,
    pub ztoken_gained: i64,
    #[serde(default)]
    pub master_title_earned: Option<String>,
    pub completed_at: DateTime<Utc>,
    #[serde(default)]
    pub dungeon_type: Option<DungeonTypeSummary>,
}
