use std::sync::Arc;

use dioxus_logger::tracing::{self, Level};
use zdungeon::client::{
    config::Config,
    data::RestClient,
    notify::LogNotifier,
    scheduler::{start_ztoken_reset_timer, ResetTimerConfig},
    service::ztoken::ZTokenResetService,
    store::dungeon::DungeonProgressStore,
    util::{
        dungeon::calculate_total_rewards,
        time::{format_hours_until_reset, get_time_until_next_reset},
    },
};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    if let Err(e) = dioxus_logger::init(Level::INFO) {
        eprintln!("Failed to initialize logger: {}", e);
    }

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let client = Arc::new(RestClient::from_config(&config));
    let service = ZTokenResetService::new(client.clone());

    if let Some(player_id) = config.player_id.clone() {
        let store = DungeonProgressStore::new(client.clone(), Arc::new(LogNotifier));
        log_dungeon_summary(&store, player_id).await;
    }

    if let Some(status) = service.get_ztoken_reset_status().await {
        tracing::info!(
            "Next ZToken reset at {} ({} remaining, reset needed: {})",
            status.next_reset_time,
            format_hours_until_reset(status.hours_until_reset),
            status.reset_needed
        );
    }

    match get_time_until_next_reset() {
        Ok(ms) => tracing::info!(
            "Local schedule: {} until next reset",
            format_hours_until_reset(ms as f64 / 3_600_000.0)
        ),
        Err(e) => tracing::error!("Error computing local reset schedule: {}", e),
    }

    let timer_config = config
        .poll_interval
        .map(ResetTimerConfig::new)
        .unwrap_or_default();

    let (due_tx, mut due_rx) = tokio::sync::mpsc::unbounded_channel();
    let timer = start_ztoken_reset_timer(service.clone(), timer_config, move |status| {
        let _ = due_tx.send(status.current_wib_date);
    });

    tracing::info!("Watching ZToken reset schedule, press Ctrl+C to stop");

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            Some(date) = due_rx.recv() => {
                tracing::info!("Running ZToken daily reset for {}", date);
                let result = service.perform_daily_ztoken_reset().await;
                if !result.success {
                    tracing::warn!("ZToken daily reset did not complete: {}", result.message);
                }
            }
        }
    }

    timer.shutdown().await;
}

async fn log_dungeon_summary(store: &DungeonProgressStore, player_id: String) {
    if store.bind_player(Some(player_id.clone())).await.is_err() {
        return;
    }

    let snapshot = store.snapshot();
    let totals = calculate_total_rewards(&snapshot.history);

    tracing::info!(
        "Player {}: {} victories, {} defeats, {} EXP, {} ZCoin, {} ZToken over the last {} attempt(s)",
        player_id,
        totals.victories,
        totals.defeats,
        totals.exp,
        totals.zcoin,
        totals.ztoken,
        snapshot.history.len()
    );

    for dungeon_type in &snapshot.dungeon_types {
        let progress =
            snapshot.get_progress_to_master(&dungeon_type.id, dungeon_type.master_requirement);

        tracing::info!(
            "{}: {}/{} completions towards \"{}\" ({:.0}%)",
            dungeon_type.name,
            progress.current,
            progress.required,
            dungeon_type.master_title,
            progress.percentage
        );
    }
}
