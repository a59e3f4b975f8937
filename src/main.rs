mod api;
mod config;
mod game;
mod models;
mod workers;

use std::sync::Arc;

use anyhow::Result;
use tokio::sync::{mpsc, watch, RwLock};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::models::{LiveGameState, OverlayStatus, OverlayUpdate};
use crate::workers::{LcuWorker, LiveGameWorker};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rift_overlay=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting rift-overlay");

    // Load configuration
    let config = Config::from_env()?;
    info!("Configuration loaded");

    // Shared query surface: connection flags and the latest composed state
    let status: Arc<RwLock<OverlayStatus>> = Arc::new(RwLock::new(Default::default()));
    let state_cache: Arc<RwLock<Option<LiveGameState>>> = Arc::new(RwLock::new(None));

    // Channel feeding the overlay push layer
    let (update_tx, update_rx) = mpsc::channel(100);

    // Cooperative shutdown flag observed by both pollers
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let lcu_worker = LcuWorker::new(
        config.league_path.clone(),
        config.lcu_poll_interval_ms,
        update_tx.clone(),
        Arc::clone(&status),
        shutdown_rx.clone(),
    );

    let live_game_worker = LiveGameWorker::new(
        update_tx,
        Arc::clone(&status),
        Arc::clone(&state_cache),
        config.live_poll_interval_ms,
        shutdown_rx,
    );

    info!("Workers created, starting...");

    let lcu_handle = tokio::spawn(async move {
        lcu_worker.run().await;
    });

    let live_handle = tokio::spawn(async move {
        live_game_worker.run().await;
    });

    // Stand-in for the push/pub-sub boundary: drain and log updates
    let consumer_handle = tokio::spawn(async move {
        consume_updates(update_rx).await;
    });

    info!("All workers started");

    // Wait for shutdown signal
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
        result = consumer_handle => {
            error!("Update consumer exited unexpectedly: {:?}", result);
        }
    }

    let _ = shutdown_tx.send(true);
    let _ = lcu_handle.await;
    let _ = live_handle.await;

    info!("Shutting down rift-overlay");
    Ok(())
}

/// Log each update; a real deployment replaces this with the push channel
async fn consume_updates(mut update_rx: mpsc::Receiver<OverlayUpdate>) {
    while let Some(update) = update_rx.recv().await {
        match update {
            OverlayUpdate::Connect(credentials) => {
                info!("Update: connected to LCU on port {}", credentials.port);
            }
            OverlayUpdate::Disconnect { reason } => {
                info!("Update: LCU disconnected ({})", reason);
            }
            OverlayUpdate::ChampSelect(session) => {
                info!(
                    "Update: champ select {:?} | {} bans, {} picks",
                    session.phase,
                    session.bans.len(),
                    session.picks.len()
                );
            }
            OverlayUpdate::GameflowPhase { raw, phase } => {
                info!("Update: gameflow {} -> {:?}", raw, phase);
            }
            OverlayUpdate::GameStart => {
                info!("Update: game started");
            }
            OverlayUpdate::GameData(state) => {
                info!(
                    "Update: {:.0}s | {}-{} kills | gold diff {}",
                    state.game_time,
                    state.blue_team.total_kills,
                    state.red_team.total_kills,
                    state.blue_team.total_gold - state.red_team.total_gold,
                );
            }
            OverlayUpdate::GameEvent(event) => {
                info!("Update: event {} at {:.0}s", event.kind, event.time);
            }
            OverlayUpdate::GameEnd { last_state } => {
                info!(
                    "Update: game ended (last clock: {:?})",
                    last_state.map(|s| s.game_time)
                );
            }
        }
    }
}
