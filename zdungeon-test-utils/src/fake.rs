//! In-memory backend with scripted responses and call accounting.
//!
//! `FakeBackend` implements both backend traits. Every endpoint answers with a
//! [`FakeResponse`] that can be swapped at any time, and an optional artificial
//! latency lets tests drive concurrency with tokio's paused clock.

use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    },
    time::Duration,
};

use async_trait::async_trait;
use zdungeon::{
    client::{
        data::{DungeonBackend, ZTokenBackend},
        error::{backend::BackendError, Error},
    },
    model::{
        dungeon::{DungeonHistoryEntry, DungeonProgress, DungeonType},
        ztoken::{ResetResult, ResetStatus},
    },
};

/// Scripted answer of a single endpoint
#[derive(Debug, Clone)]
pub enum FakeResponse<T> {
    Ok(T),
    /// Fail with a non-success status and message
    Fail(u16, String),
    /// Never answer
    Hang,
}

impl<T: Clone> FakeResponse<T> {
    async fn resolve(&self) -> Result<T, Error> {
        match self {
            Self::Ok(value) => Ok(value.clone()),
            Self::Fail(status, message) => Err(BackendError::Status {
                status: *status,
                message: message.clone(),
            }
            .into()),
            Self::Hang => std::future::pending().await,
        }
    }
}

/// Named endpoints used for call counting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    DungeonTypes,
    Progress,
    History,
    ResetStatus,
    ResetDaily,
    ResetManual,
    ShouldRunReset,
}

const ENDPOINT_COUNT: usize = 7;

impl Endpoint {
    fn index(self) -> usize {
        self as usize
    }
}

struct FakeState {
    dungeon_types: FakeResponse<Vec<DungeonType>>,
    progress: FakeResponse<Vec<DungeonProgress>>,
    history: FakeResponse<Vec<DungeonHistoryEntry>>,
    reset_status: FakeResponse<ResetStatus>,
    reset_daily: FakeResponse<ResetResult>,
    reset_manual: FakeResponse<ResetResult>,
    should_run_reset: FakeResponse<bool>,
    latency: Duration,
}

pub struct FakeBackend {
    state: Mutex<FakeState>,
    calls: [AtomicUsize; ENDPOINT_COUNT],
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl Default for FakeBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeBackend {
    /// Create a backend answering every endpoint with an empty or negative result
    pub fn new() -> Self {
        Self {
            state: Mutex::new(FakeState {
                dungeon_types: FakeResponse::Ok(Vec::new()),
                progress: FakeResponse::Ok(Vec::new()),
                history: FakeResponse::Ok(Vec::new()),
                reset_status: FakeResponse::Fail(404, "No reset status configured".to_string()),
                reset_daily: FakeResponse::Fail(404, "No reset result configured".to_string()),
                reset_manual: FakeResponse::Fail(404, "No reset result configured".to_string()),
                should_run_reset: FakeResponse::Ok(false),
                latency: Duration::ZERO,
            }),
            calls: Default::default(),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    pub fn with_dungeon_types(self, dungeon_types: Vec<DungeonType>) -> Self {
        self.set_dungeon_types(FakeResponse::Ok(dungeon_types));
        self
    }

    pub fn with_progress(self, progress: Vec<DungeonProgress>) -> Self {
        self.set_progress(FakeResponse::Ok(progress));
        self
    }

    pub fn with_history(self, history: Vec<DungeonHistoryEntry>) -> Self {
        self.set_history(FakeResponse::Ok(history));
        self
    }

    pub fn with_reset_status(self, status: ResetStatus) -> Self {
        self.set_reset_status(FakeResponse::Ok(status));
        self
    }

    /// Delay every call by `latency` before answering
    pub fn with_latency(self, latency: Duration) -> Self {
        self.state.lock().unwrap().latency = latency;
        self
    }

    pub fn set_dungeon_types(&self, response: FakeResponse<Vec<DungeonType>>) {
        self.state.lock().unwrap().dungeon_types = response;
    }

    pub fn set_progress(&self, response: FakeResponse<Vec<DungeonProgress>>) {
        self.state.lock().unwrap().progress = response;
    }

    pub fn set_history(&self, response: FakeResponse<Vec<DungeonHistoryEntry>>) {
        self.state.lock().unwrap().history = response;
    }

    pub fn set_reset_status(&self, response: FakeResponse<ResetStatus>) {
        self.state.lock().unwrap().reset_status = response;
    }

    pub fn set_reset_daily(&self, response: FakeResponse<ResetResult>) {
        self.state.lock().unwrap().reset_daily = response;
    }

    pub fn set_reset_manual(&self, response: FakeResponse<ResetResult>) {
        self.state.lock().unwrap().reset_manual = response;
    }

    pub fn set_should_run_reset(&self, response: FakeResponse<bool>) {
        self.state.lock().unwrap().should_run_reset = response;
    }

    /// Number of calls made to `endpoint`
    pub fn calls(&self, endpoint: Endpoint) -> usize {
        self.calls[endpoint.index()].load(Ordering::SeqCst)
    }

    /// Highest number of calls that were in flight at the same time
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    async fn call<T: Clone>(
        &self,
        endpoint: Endpoint,
        select: impl FnOnce(&FakeState) -> FakeResponse<T>,
    ) -> Result<T, Error> {
        self.calls[endpoint.index()].fetch_add(1, Ordering::SeqCst);

        let (response, latency) = {
            let state = self.state.lock().unwrap();
            (select(&state), state.latency)
        };

        let _in_flight = InFlight::enter(self);

        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }

        response.resolve().await
    }
}

/// Tracks concurrent calls, decrementing even when the call future is dropped
struct InFlight<'a> {
    backend: &'a FakeBackend,
}

impl<'a> InFlight<'a> {
    fn enter(backend: &'a FakeBackend) -> Self {
        let current = backend.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        backend.max_in_flight.fetch_max(current, Ordering::SeqCst);
        Self { backend }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.backend.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

fn filter_rows<T, F>(response: &FakeResponse<Vec<T>>, keep: F) -> FakeResponse<Vec<T>>
where
    T: Clone,
    F: Fn(&T) -> bool,
{
    match response {
        FakeResponse::Ok(rows) => FakeResponse::Ok(rows.iter().filter(|r| keep(r)).cloned().collect()),
        other => other.clone(),
    }
}

#[async_trait]
impl DungeonBackend for FakeBackend {
    async fn fetch_active_dungeon_types(&self) -> Result<Vec<DungeonType>, Error> {
        self.call(Endpoint::DungeonTypes, |state| {
            filter_rows(&state.dungeon_types, |t| t.is_active)
        })
        .await
    }

    async fn fetch_dungeon_progress(
        &self,
        player_id: &str,
    ) -> Result<Vec<DungeonProgress>, Error> {
        self.call(Endpoint::Progress, |state| {
            filter_rows(&state.progress, |p| p.profile_id == player_id)
        })
        .await
    }

    async fn fetch_dungeon_history(
        &self,
        player_id: &str,
        limit: usize,
    ) -> Result<Vec<DungeonHistoryEntry>, Error> {
        let mut history = self
            .call(Endpoint::History, |state| {
                filter_rows(&state.history, |h| h.profile_id == player_id)
            })
            .await?;

        history.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
        history.truncate(limit);

        Ok(history)
    }
}

#[async_trait]
impl ZTokenBackend for FakeBackend {
    async fn get_reset_status(&self) -> Result<ResetStatus, Error> {
        self.call(Endpoint::ResetStatus, |state| state.reset_status.clone())
            .await
    }

    async fn reset_daily(&self) -> Result<ResetResult, Error> {
        self.call(Endpoint::ResetDaily, |state| state.reset_daily.clone())
            .await
    }

    async fn reset_manual(&self) -> Result<ResetResult, Error> {
        self.call(Endpoint::ResetManual, |state| state.reset_manual.clone())
            .await
    }

    async fn should_run_daily_reset(&self) -> Result<bool, Error> {
        self.call(Endpoint::ShouldRunReset, |state| {
            state.should_run_reset.clone()
        })
        .await
    }
}
