//! Dioxus hooks exposing the dungeon store and reset timer to components.

use std::{cell::RefCell, rc::Rc, sync::Arc};

use dioxus::prelude::*;
use tokio::sync::mpsc;

use crate::{
    client::{
        scheduler::{start_ztoken_reset_timer, ResetTimerConfig, ResetTimerHandle},
        service::ztoken::ZTokenResetService,
        store::dungeon::{DungeonProgressStore, DungeonSnapshot},
    },
    model::ztoken::ResetStatus,
};

/// Reactive view of a [`DungeonProgressStore`]
#[derive(Clone, Copy, PartialEq)]
pub struct DungeonData {
    pub snapshot: Signal<Arc<DungeonSnapshot>>,
    pub loading: Signal<bool>,
}

/// Binds `store` to `player_id` and mirrors its snapshot & loading state into signals.
///
/// The store reloads whenever `player_id` changes between renders; passing `None` clears
/// the snapshot. The mirroring task is owned by the calling component and stops when it
/// unmounts.
pub fn use_dungeon_data(store: DungeonProgressStore, player_id: Option<String>) -> DungeonData {
    let mut snapshot = use_signal(|| store.snapshot());
    let mut loading = use_signal(|| store.is_loading());

    let watched = store.clone();
    use_hook(move || {
        let mut snapshots = watched.subscribe();
        let mut loads = watched.subscribe_loading();

        spawn(async move {
            loop {
                tokio::select! {
                    changed = snapshots.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        let latest = snapshots.borrow_and_update().clone();
                        snapshot.set(latest);
                    }
                    changed = loads.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        let active = *loads.borrow_and_update() > 0;
                        loading.set(active);
                    }
                }
            }
        });
    });

    use_effect(use_reactive((&player_id,), move |(player_id,)| {
        let store = store.clone();
        spawn(async move {
            // Failures are already logged and surfaced by the store's notifier
            let _ = store.bind_player(player_id).await;
        });
    }));

    DungeonData { snapshot, loading }
}

/// Runs the ZToken reset timer for as long as the calling component is mounted.
///
/// Returns a signal holding the most recent status that reported the reset as due, `None`
/// until the first one arrives. The timer is started once on first render and cancelled
/// when the component unmounts.
pub fn use_ztoken_reset_timer(
    service: ZTokenResetService,
    config: ResetTimerConfig,
) -> Signal<Option<ResetStatus>> {
    let mut due = use_signal(|| None);

    let handle: Rc<RefCell<Option<ResetTimerHandle>>> = use_hook(move || {
        let (tx, mut rx) = mpsc::unbounded_channel();

        let handle = start_ztoken_reset_timer(service, config, move |status: &ResetStatus| {
            let _ = tx.send(status.clone());
        });

        spawn(async move {
            while let Some(status) = rx.recv().await {
                due.set(Some(status));
            }
        });

        Rc::new(RefCell::new(Some(handle)))
    });

    use_drop(move || {
        if let Some(handle) = handle.borrow_mut().take() {
            handle.cancel();
        }
    });

    due
}
