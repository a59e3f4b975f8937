use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch, RwLock};
use tokio::time;
use tracing::{error, info, warn};

use crate::api::lcu::{self, LcuEvent};
use crate::api::{LcuClient, LcuCredentials, LcuEventStream};
use crate::game::champ_select::normalize_session;
use crate::models::{GamePhase, OverlayStatus, OverlayUpdate, RawChampSelectSession};

/// Delay before re-attempting connection; the client may simply not be
/// running yet, so the retry loop is unbounded
const RETRY_BACKOFF: Duration = Duration::from_secs(5);

/// Worker that owns the LCU connection lifecycle: credential discovery,
/// event subscriptions with an HTTP polling fallback, and reconnects
pub struct LcuWorker {
    league_path: String,
    poll_interval: Duration,
    update_tx: mpsc::Sender<OverlayUpdate>,
    status: Arc<RwLock<OverlayStatus>>,
    shutdown: watch::Receiver<bool>,
}

impl LcuWorker {
    pub fn new(
        league_path: String,
        poll_interval_ms: u64,
        update_tx: mpsc::Sender<OverlayUpdate>,
        status: Arc<RwLock<OverlayStatus>>,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self {
            league_path,
            poll_interval: Duration::from_millis(poll_interval_ms),
            update_tx,
            status,
            shutdown,
        }
    }

    /// Connect loop: discover credentials, serve until the connection drops,
    /// back off, repeat. Runs until shutdown.
    pub async fn run(mut self) {
        info!("LCU poller started, waiting for League client...");

        let mut client = match LcuClient::new() {
            Ok(client) => client,
            Err(e) => {
                error!("Failed to build LCU client: {}", e);
                return;
            }
        };

        loop {
            if *self.shutdown.borrow() {
                break;
            }

            match lcu::discover_credentials(&self.league_path) {
                Some(credentials) => {
                    info!(
                        "LCU connected (port: {}, pid: {})",
                        credentials.port, credentials.pid
                    );
                    client.set_credentials(credentials.clone());
                    self.status.write().await.lcu_connected = true;
                    self.send(OverlayUpdate::Connect(credentials.clone())).await;

                    let reason = self.serve(&client, &credentials).await;

                    client.clear_credentials();
                    self.status.write().await.lcu_connected = false;

                    if *self.shutdown.borrow() {
                        break;
                    }
                    warn!("LCU disconnected: {}", reason);
                    self.send(OverlayUpdate::Disconnect { reason }).await;
                }
                None => {
                    self.send(OverlayUpdate::Disconnect {
                        reason: "League client not running".to_string(),
                    })
                    .await;
                }
            }

            // Fixed backoff before the next full connection attempt
            tokio::select! {
                _ = time::sleep(RETRY_BACKOFF) => {}
                _ = self.shutdown.changed() => {}
            }
        }

        info!("LCU poller stopped");
    }

    /// Serve one connection until it drops or shutdown; returns the reason
    async fn serve(&mut self, client: &LcuClient, credentials: &LcuCredentials) -> String {
        let mut last_phase: Option<String> = None;

        // Bootstrap the current phase over HTTP so starting mid-champ-select
        // does not wait for a subscription event that never comes
        self.poll_tick(client, &mut last_phase).await;

        match LcuEventStream::connect(credentials).await {
            Ok(stream) => {
                info!("LCU event subscriptions active");
                self.event_loop(stream, &mut last_phase).await
            }
            Err(e) => {
                warn!("LCU WebSocket failed, falling back to polling: {}", e);
                self.poll_loop(client, &mut last_phase).await
            }
        }
    }

    /// Event-driven mode: react to pushed session/phase updates
    async fn event_loop(
        &mut self,
        mut stream: LcuEventStream,
        last_phase: &mut Option<String>,
    ) -> String {
        loop {
            tokio::select! {
                event = stream.next_event() => {
                    match event {
                        Some(event) => self.handle_event(event, last_phase).await,
                        None => return "event stream closed".to_string(),
                    }
                }
                _ = self.shutdown.changed() => {
                    if *self.shutdown.borrow() {
                        stream.close().await;
                        return "shutdown".to_string();
                    }
                }
            }
        }
    }

    async fn handle_event(&self, event: LcuEvent, last_phase: &mut Option<String>) {
        match event.uri.as_str() {
            lcu::CHAMP_SELECT_URI => {
                let raw: Option<RawChampSelectSession> =
                    serde_json::from_value(event.data).ok();
                self.send(OverlayUpdate::ChampSelect(normalize_session(raw.as_ref())))
                    .await;
            }
            lcu::GAMEFLOW_PHASE_URI => {
                if let Some(phase) = event.data.as_str() {
                    let phase = phase.to_string();
                    self.emit_phase(&phase, last_phase).await;
                }
            }
            _ => {}
        }
    }

    /// Polling fallback: fetch phase and, during champ select, the session
    async fn poll_loop(
        &mut self,
        client: &LcuClient,
        last_phase: &mut Option<String>,
    ) -> String {
        let mut interval = time::interval(self.poll_interval);
        interval.set_missed_tick_behavior(time::MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    self.poll_tick(client, last_phase).await;
                }
                _ = self.shutdown.changed() => {
                    if *self.shutdown.borrow() {
                        return "shutdown".to_string();
                    }
                }
            }
        }
    }

    /// One poll tick. Request errors are ignored: the client drops requests
    /// freely between phases and that is not a disconnect.
    async fn poll_tick(&self, client: &LcuClient, last_phase: &mut Option<String>) {
        if !client.is_connected() {
            return;
        }

        let phase = match client.gameflow_phase().await {
            Ok(phase) => phase,
            Err(_) => return,
        };

        self.emit_phase(&phase, last_phase).await;

        if phase == "ChampSelect" {
            if let Ok(session) = client.champ_select_session().await {
                self.send(OverlayUpdate::ChampSelect(normalize_session(
                    session.as_ref(),
                )))
                .await;
            }
        }
    }

    /// Emit a phase update only when the phase actually changed
    async fn emit_phase(&self, raw: &str, last_phase: &mut Option<String>) {
        if last_phase.as_deref() == Some(raw) {
            return;
        }
        *last_phase = Some(raw.to_string());

        let phase = GamePhase::from_gameflow(raw);
        info!("Gameflow phase: {} -> {:?}", raw, phase);
        self.send(OverlayUpdate::GameflowPhase {
            raw: raw.to_string(),
            phase,
        })
        .await;
    }

    async fn send(&self, update: OverlayUpdate) {
        if let Err(e) = self.update_tx.send(update).await {
            warn!("Failed to send LCU update: {}", e);
        }
    }
}
