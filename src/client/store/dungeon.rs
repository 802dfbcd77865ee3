//! Cached dungeon catalog, progress and history for the bound player.
//!
//! The [`DungeonProgressStore`] keeps one immutable [`DungeonSnapshot`] published through a
//! `tokio::sync::watch` channel. A reload assembles a complete new snapshot before swapping
//! it in, so consumers either see the previous snapshot or the new one, never a mix.
//!
//! ## Reload coalescing
//!
//! Every call to [`DungeonProgressStore::load_dungeon_data`] takes a generation number. Loads
//! are serialized behind a mutex that remembers the newest generation covered by a load that
//! already started; a call whose generation is already covered returns the outcome of that
//! load without fetching. Any number of overlapping calls therefore results in at most one
//! running load plus one follow-up load.

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use dioxus_logger::tracing;
use tokio::sync::{watch, Mutex};

use crate::{
    client::{data::DungeonBackend, error::Error, notify::Notifier},
    model::dungeon::{DungeonHistoryEntry, DungeonProgress, DungeonType},
};

/// Number of most recent history entries kept per player
pub const HISTORY_LIMIT: usize = 20;

/// Message shown to the user when a reload fails
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load dungeon data";

/// The three collections loaded for a player, always replaced together
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DungeonSnapshot {
    /// Active dungeon types ordered by name
    pub dungeon_types: Vec<DungeonType>,
    pub progress: Vec<DungeonProgress>,
    /// Most recent attempts, newest first
    pub history: Vec<DungeonHistoryEntry>,
}

/// Completion progress towards a dungeon's master title
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressToMaster {
    pub current: i64,
    pub required: i64,
    /// `current / required * 100`, capped at 100
    pub percentage: f64,
}

impl DungeonSnapshot {
    pub fn get_dungeon_type(&self, dungeon_type_id: &str) -> Option<&DungeonType> {
        self.dungeon_types.iter().find(|t| t.id == dungeon_type_id)
    }

    pub fn get_dungeon_progress(&self, dungeon_type_id: &str) -> Option<&DungeonProgress> {
        self.progress
            .iter()
            .find(|p| p.dungeon_type_id == dungeon_type_id)
    }

    /// Completion count for the dungeon type, 0 if the player has no progress row
    pub fn get_total_completions(&self, dungeon_type_id: &str) -> i64 {
        self.get_dungeon_progress(dungeon_type_id)
            .map_or(0, |p| p.total_completions)
    }

    /// Progress towards `requirement` completions of a dungeon type.
    ///
    /// `requirement` must be greater than zero for a meaningful percentage. A zero
    /// requirement is not guarded: `0 / 0` yields NaN, which is passed through unclamped,
    /// while any positive count over zero is infinite and gets capped at 100.
    pub fn get_progress_to_master(
        &self,
        dungeon_type_id: &str,
        requirement: i64,
    ) -> ProgressToMaster {
        let current = self.get_total_completions(dungeon_type_id);
        let ratio = current as f64 / requirement as f64 * 100.0;

        // NaN compares false and stays NaN
        let percentage = if ratio > 100.0 { 100.0 } else { ratio };

        ProgressToMaster {
            current,
            required: requirement,
            percentage,
        }
    }

    /// Whether the player reached the completion count that grants the type's master title
    pub fn has_master_title(&self, dungeon_type_id: &str) -> bool {
        self.get_dungeon_type(dungeon_type_id)
            .is_some_and(|t| self.get_total_completions(dungeon_type_id) >= t.master_requirement)
    }
}

/// Dungeon data store keyed by the bound player identity.
///
/// Cheap to clone; clones share the same snapshot, loading state and reload guard.
#[derive(Clone)]
pub struct DungeonProgressStore {
    inner: Arc<DungeonProgressStoreRef>,
}

struct DungeonProgressStoreRef {
    backend: Arc<dyn DungeonBackend>,
    notifier: Arc<dyn Notifier>,
    player_id: watch::Sender<Option<String>>,
    snapshot: watch::Sender<Arc<DungeonSnapshot>>,
    /// Number of load calls currently running or waiting on the reload guard
    active_loads: watch::Sender<usize>,
    requested: AtomicU64,
    reload: Mutex<ReloadState>,
}

#[derive(Default)]
struct ReloadState {
    /// Newest generation covered by a load that has already started
    covered: u64,
    /// Failure of the most recent load, handed to the calls it covered
    last_error: Option<Arc<Error>>,
}

impl DungeonProgressStore {
    /// Creates a new store with no bound player and an empty snapshot.
    ///
    /// # Arguments
    /// - `backend` - Source of dungeon catalog, progress and history records
    /// - `notifier` - Receives the user-facing message when a reload fails
    pub fn new(backend: Arc<dyn DungeonBackend>, notifier: Arc<dyn Notifier>) -> Self {
        let (player_id, _) = watch::channel(None);
        let (snapshot, _) = watch::channel(Arc::new(DungeonSnapshot::default()));
        let (active_loads, _) = watch::channel(0);

        Self {
            inner: Arc::new(DungeonProgressStoreRef {
                backend,
                notifier,
                player_id,
                snapshot,
                active_loads,
                requested: AtomicU64::new(0),
                reload: Mutex::new(ReloadState::default()),
            }),
        }
    }

    /// Binds the store to a player identity, reloading when the identity changes.
    ///
    /// Binding the identity that is already bound does nothing. Binding `None` drops the
    /// cached snapshot in the same step as the identity change.
    ///
    /// # Returns
    /// - `Ok(())` - Identity unchanged, cleared, or reloaded successfully
    /// - `Err(Error)` - The reload triggered by the identity change failed
    pub async fn bind_player(&self, player_id: Option<String>) -> Result<(), Error> {
        let changed = self.inner.player_id.send_if_modified(|current| {
            if *current == player_id {
                return false;
            }
            *current = player_id.clone();

            // Cleared under the identity lock so no load can publish in between
            if player_id.is_none() {
                self.inner
                    .snapshot
                    .send_replace(Arc::new(DungeonSnapshot::default()));
            }
            true
        });

        if !changed {
            return Ok(());
        }

        match player_id {
            Some(player_id) => {
                tracing::debug!("Bound dungeon store to player {}", player_id);
                self.load_dungeon_data().await
            }
            None => {
                tracing::debug!("Unbound dungeon store, cleared cached dungeon data");
                Ok(())
            }
        }
    }

    /// Reloads the dungeon catalog, progress and history of the bound player.
    ///
    /// Does nothing if no player is bound. The three fetches run sequentially (catalog,
    /// progress, history) and the first failure aborts the remaining ones. The snapshot is
    /// only replaced once all three succeeded; on failure the previous snapshot stays
    /// visible, the error is logged and one notification is sent. The loading flag is
    /// cleared on every exit path.
    ///
    /// Calls overlapping a running load are coalesced, see the module documentation. A
    /// coalesced call reports the outcome of the load that covered it: if that load failed,
    /// every call it covered gets the same [`Error::Shared`] failure.
    ///
    /// # Returns
    /// - `Ok(())` - Snapshot replaced (by this call or the load covering it), or no player bound
    /// - `Err(Error::Shared)` - A fetch of this or the covering load failed; the snapshot was
    ///   left untouched
    pub async fn load_dungeon_data(&self) -> Result<(), Error> {
        if self.player_id().is_none() {
            return Ok(());
        }

        let generation = self.inner.requested.fetch_add(1, Ordering::SeqCst) + 1;
        let _loading = LoadingGuard::new(&self.inner.active_loads);

        let mut reload = self.inner.reload.lock().await;
        if reload.covered >= generation {
            tracing::debug!("Dungeon data reload {} coalesced into a newer load", generation);
            return match &reload.last_error {
                Some(err) => Err(Error::Shared(Arc::clone(err))),
                None => Ok(()),
            };
        }
        reload.covered = self.inner.requested.load(Ordering::SeqCst);
        reload.last_error = None;

        // The identity may have changed while waiting on the guard
        let Some(player_id) = self.player_id() else {
            return Ok(());
        };

        match fetch_snapshot(self.inner.backend.as_ref(), &player_id).await {
            Ok(snapshot) => {
                self.publish(&player_id, snapshot);

                Ok(())
            }
            Err(err) => {
                tracing::error!(
                    "Error loading dungeon data for player {}: {}",
                    player_id,
                    err.to_report()
                );
                self.inner.notifier.error(LOAD_FAILED_MESSAGE);

                let err = Arc::new(err);
                reload.last_error = Some(Arc::clone(&err));

                Err(Error::Shared(err))
            }
        }
    }

    /// Publishes `snapshot` if `player_id` is still the bound identity.
    ///
    /// The identity stays read-locked until the snapshot is replaced, so `bind_player`
    /// cannot change it between the check and the publish.
    fn publish(&self, player_id: &str, snapshot: DungeonSnapshot) {
        let bound = self.inner.player_id.borrow();

        if bound.as_deref() != Some(player_id) {
            tracing::debug!(
                "Discarding dungeon data for player {} after identity change",
                player_id
            );
            return;
        }

        tracing::debug!(
            "Loaded {} dungeon type(s), {} progress row(s), {} history entries for player {}",
            snapshot.dungeon_types.len(),
            snapshot.progress.len(),
            snapshot.history.len(),
            player_id
        );
        self.inner.snapshot.send_replace(Arc::new(snapshot));
    }

    /// Currently bound player identity
    pub fn player_id(&self) -> Option<String> {
        self.inner.player_id.borrow().clone()
    }

    /// Whether a load is running or waiting to run
    pub fn is_loading(&self) -> bool {
        *self.inner.active_loads.borrow() > 0
    }

    /// The current snapshot; stays valid after later reloads replace it
    pub fn snapshot(&self) -> Arc<DungeonSnapshot> {
        self.inner.snapshot.borrow().clone()
    }

    /// Receiver notified every time a new snapshot is published
    pub fn subscribe(&self) -> watch::Receiver<Arc<DungeonSnapshot>> {
        self.inner.snapshot.subscribe()
    }

    /// Receiver of the number of in-progress loads, non-zero while loading
    pub fn subscribe_loading(&self) -> watch::Receiver<usize> {
        self.inner.active_loads.subscribe()
    }

    pub fn get_dungeon_type(&self, dungeon_type_id: &str) -> Option<DungeonType> {
        self.snapshot().get_dungeon_type(dungeon_type_id).cloned()
    }

    pub fn get_dungeon_progress(&self, dungeon_type_id: &str) -> Option<DungeonProgress> {
        self.snapshot().get_dungeon_progress(dungeon_type_id).cloned()
    }

    pub fn get_total_completions(&self, dungeon_type_id: &str) -> i64 {
        self.snapshot().get_total_completions(dungeon_type_id)
    }

    pub fn get_progress_to_master(
        &self,
        dungeon_type_id: &str,
        requirement: i64,
    ) -> ProgressToMaster {
        self.snapshot()
            .get_progress_to_master(dungeon_type_id, requirement)
    }

    pub fn has_master_title(&self, dungeon_type_id: &str) -> bool {
        self.snapshot().has_master_title(dungeon_type_id)
    }
}

/// Fetches the three collections in order, stopping at the first failure
async fn fetch_snapshot(
    backend: &dyn DungeonBackend,
    player_id: &str,
) -> Result<DungeonSnapshot, Error> {
    let dungeon_types = backend.fetch_active_dungeon_types().await?;
    let progress = backend.fetch_dungeon_progress(player_id).await?;
    let mut history = backend
        .fetch_dungeon_history(player_id, HISTORY_LIMIT)
        .await?;
    history.truncate(HISTORY_LIMIT);

    Ok(DungeonSnapshot {
        dungeon_types,
        progress,
        history,
    })
}

/// Counts a load as active for as long as it is alive
struct LoadingGuard<'a> {
    active_loads: &'a watch::Sender<usize>,
}

impl<'a> LoadingGuard<'a> {
    fn new(active_loads: &'a watch::Sender<usize>) -> Self {
        active_loads.send_modify(|count| *count += 1);
        Self { active_loads }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.active_loads
            .send_modify(|count| *count = count.saturating_sub(1));
    }
}
