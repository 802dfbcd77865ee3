//! Backend data access.
//!
//! The store and services never talk to HTTP directly; they depend on the
//! [`DungeonBackend`] and [`ZTokenBackend`] traits so that a fake backend can be
//! substituted in tests. [`RestClient`] is the production implementation of both.

pub mod dungeon;
pub mod rest;
pub mod ztoken;

pub use rest::RestClient;

use async_trait::async_trait;

use crate::{
    client::error::Error,
    model::{
        dungeon::{DungeonHistoryEntry, DungeonProgress, DungeonType},
        ztoken::{ResetResult, ResetStatus},
    },
};

/// Read access to dungeon catalog, progress and history records
#[async_trait]
pub trait DungeonBackend: Send + Sync {
    /// Active dungeon types ordered by name ascending
    async fn fetch_active_dungeon_types(&self) -> Result<Vec<DungeonType>, Error>;

    /// Progress rows belonging to `player_id`
    async fn fetch_dungeon_progress(&self, player_id: &str)
        -> Result<Vec<DungeonProgress>, Error>;

    /// Most recent `limit` history rows of `player_id`, newest first, each with
    /// its dungeon type name & image attached
    async fn fetch_dungeon_history(
        &self,
        player_id: &str,
        limit: usize,
    ) -> Result<Vec<DungeonHistoryEntry>, Error>;
}

/// Remote procedures computing and executing the daily ZToken reset
#[async_trait]
pub trait ZTokenBackend: Send + Sync {
    async fn get_reset_status(&self) -> Result<ResetStatus, Error>;

    async fn reset_daily(&self) -> Result<ResetResult, Error>;

    async fn reset_manual(&self) -> Result<ResetResult, Error>;

    async fn should_run_daily_reset(&self) -> Result<bool, Error>;
}
