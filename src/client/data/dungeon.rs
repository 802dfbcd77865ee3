use async_trait::async_trait;

use crate::{
    client::{
        data::{DungeonBackend, RestClient},
        error::Error,
    },
    model::dungeon::{DungeonHistoryEntry, DungeonProgress, DungeonType},
};

const DUNGEON_TYPES_TABLE: &str = "dungeon_types";
const DUNGEON_PROGRESS_TABLE: &str = "dungeon_progress";
const DUNGEON_HISTORY_TABLE: &str = "dungeon_history";

/// Embeds the dungeon type's name & image under the `dungeon_type` key
const HISTORY_SELECT: &str = "*,dungeon_type:dungeon_types(name,image_url)";

#[async_trait]
impl DungeonBackend for RestClient {
    async fn fetch_active_dungeon_types(&self) -> Result<Vec<DungeonType>, Error> {
        self.select(
            DUNGEON_TYPES_TABLE,
            &[
                ("select", "*".to_string()),
                ("is_active", "eq.true".to_string()),
                ("order", "name.asc".to_string()),
            ],
        )
        .await
    }

    async fn fetch_dungeon_progress(
        &self,
        player_id: &str,
    ) -> Result<Vec<DungeonProgress>, Error> {
        self.select(
            DUNGEON_PROGRESS_TABLE,
            &[
                ("select", "*".to_string()),
                ("profile_id", format!("eq.{}", player_id)),
            ],
        )
        .await
    }

    async fn fetch_dungeon_history(
        &self,
        player_id: &str,
        limit: usize,
    ) -> Result<Vec<DungeonHistoryEntry>, Error> {
        self.select(
            DUNGEON_HISTORY_TABLE,
            &[
                ("select", HISTORY_SELECT.to_string()),
                ("profile_id", format!("eq.{}", player_id)),
                ("order", "completed_at.desc".to_string()),
                ("limit", limit.to_string()),
            ],
        )
        .await
    }
}
