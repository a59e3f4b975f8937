use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch, RwLock};
use tokio::time;
use tracing::{info, warn};

use crate::api::LiveClientApi;
use crate::game::{GameSession, LiveUpdate};
use crate::models::{LiveGameState, OverlayStatus, OverlayUpdate};

/// Worker that polls the Live Client Data API and tracks the in-game session
pub struct LiveGameWorker {
    api: LiveClientApi,
    session: GameSession,
    update_tx: mpsc::Sender<OverlayUpdate>,
    status: Arc<RwLock<OverlayStatus>>,
    state_cache: Arc<RwLock<Option<LiveGameState>>>,
    poll_interval: Duration,
    shutdown: watch::Receiver<bool>,
}

impl LiveGameWorker {
    pub fn new(
        update_tx: mpsc::Sender<OverlayUpdate>,
        status: Arc<RwLock<OverlayStatus>>,
        state_cache: Arc<RwLock<Option<LiveGameState>>>,
        poll_interval_ms: u64,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self {
            api: LiveClientApi::new(),
            session: GameSession::new(),
            update_tx,
            status,
            state_cache,
            poll_interval: Duration::from_millis(poll_interval_ms),
            shutdown,
        }
    }

    /// Run the poll loop until shutdown
    pub async fn run(mut self) {
        info!(
            "Live game poller started (interval: {:?})",
            self.poll_interval
        );

        let mut interval = time::interval(self.poll_interval);
        // A slow fetch must not cause a burst of catch-up ticks
        interval.set_missed_tick_behavior(time::MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    self.tick().await;
                }
                _ = self.shutdown.changed() => {
                    if *self.shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        info!("Live game poller stopped");
    }

    /// One poll tick: fetch a snapshot, apply it to the session, publish the
    /// resulting updates. Session mutation is synchronous after the await.
    async fn tick(&mut self) {
        let snapshot = self.api.fetch_all_game_data().await;
        let was_active = self.session.is_active();

        let updates = self.session.on_snapshot(snapshot);

        if self.session.is_active() != was_active {
            self.status.write().await.game_active = self.session.is_active();
        }

        for update in updates {
            match &update {
                LiveUpdate::GameData(state) => {
                    *self.state_cache.write().await = Some(state.clone());
                }
                LiveUpdate::GameEnd { .. } => {
                    *self.state_cache.write().await = None;
                }
                _ => {}
            }

            let outbound = match update {
                LiveUpdate::GameStart => OverlayUpdate::GameStart,
                LiveUpdate::GameData(state) => OverlayUpdate::GameData(state),
                LiveUpdate::GameEvent(event) => OverlayUpdate::GameEvent(event),
                LiveUpdate::GameEnd { last_state } => OverlayUpdate::GameEnd { last_state },
            };

            if let Err(e) = self.update_tx.send(outbound).await {
                warn!("Failed to send live game update: {}", e);
            }
        }
    }
}
