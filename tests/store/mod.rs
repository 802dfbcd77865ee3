mod bind_player;

use std::sync::Arc;

use zdungeon::client::store::dungeon::DungeonProgressStore;
use zdungeon_test_utils::{FakeBackend, RecordingNotifier};

pub const PLAYER: &str = "player-1";
pub const OTHER_PLAYER: &str = "player-2";

pub struct StoreTest {
    pub backend: Arc<FakeBackend>,
    pub notifier: Arc<RecordingNotifier>,
    pub store: DungeonProgressStore,
}

impl StoreTest {
    pub fn new(backend: FakeBackend) -> Self {
        let backend = Arc::new(backend);
        let notifier = Arc::new(RecordingNotifier::new());
        let store = DungeonProgressStore::new(backend.clone(), notifier.clone());

        Self {
            backend,
            notifier,
            store,
        }
    }
}
