use std::time::Duration;

use reqwest::Client;
use tracing::{debug, warn};

use crate::models::AllGameData;

/// Base URL of the in-game Live Client Data API
const BASE_URL: &str = "https://127.0.0.1:2999/liveclientdata";

/// The endpoint only answers while a game is running; anything slower than
/// this counts as "no game"
const REQUEST_TIMEOUT: Duration = Duration::from_millis(3000);

/// Client for the Live Client Data API.
///
/// The endpoint is reachable only while a game is actually running, so every
/// failure mode (refused connection, timeout, parse error) collapses to
/// `None` rather than an error: absence of a snapshot is itself the signal
/// the poller state machine runs on.
pub struct LiveClientApi {
    http: Option<Client>,
}

impl LiveClientApi {
    pub fn new() -> Self {
        // Self-signed local cert, same handling as the LCU endpoints
        let http = Client::builder()
            .danger_accept_invalid_certs(true)
            .timeout(REQUEST_TIMEOUT)
            .build();

        let http = match http {
            Ok(client) => Some(client),
            Err(e) => {
                warn!("Failed to build live client HTTP client: {}", e);
                None
            }
        };

        Self { http }
    }

    /// Fetch one `/allgamedata` snapshot, or None if no game is running
    pub async fn fetch_all_game_data(&self) -> Option<AllGameData> {
        let http = self.http.as_ref()?;
        let url = format!("{}/allgamedata", BASE_URL);

        let response = match http.get(&url).send().await {
            Ok(response) => response,
            Err(e) => {
                debug!("Live client data unavailable: {}", e);
                return None;
            }
        };

        if !response.status().is_success() {
            debug!("Live client data returned {}", response.status());
            return None;
        }

        match response.json().await {
            Ok(data) => Some(data),
            Err(e) => {
                debug!("Failed to parse live client data: {}", e);
                None
            }
        }
    }
}

impl Default for LiveClientApi {
    fn default() -> Self {
        Self::new()
    }
}
