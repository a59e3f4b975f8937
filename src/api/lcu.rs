use std::path::{Path, PathBuf};
use std::time::Duration;

use base64::engine::general_purpose;
use base64::Engine;
use futures_util::{SinkExt, StreamExt};
use native_tls::TlsConnector;
use reqwest::Client;
use thiserror::Error;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::HeaderValue;
use tokio_tungstenite::tungstenite::{self, Message};
use tokio_tungstenite::{Connector, MaybeTlsStream, WebSocketStream};
use tracing::{debug, warn};

use crate::models::RawChampSelectSession;

/// LCU REST endpoint for the champ select session
pub const CHAMP_SELECT_URI: &str = "/lol-champ-select/v1/session";

/// LCU REST endpoint for the gameflow phase string
pub const GAMEFLOW_PHASE_URI: &str = "/lol-gameflow/v1/gameflow-phase";

/// Per-request timeout against the local client
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Lockfile names the client writes, depending on version
const LOCKFILE_NAMES: [&str; 3] = ["lockfile", "LeagueClientUx.lockfile", "LeagueClient.lockfile"];

/// Errors from the LCU client
#[derive(Debug, Error)]
pub enum LcuError {
    /// A request was issued before credentials were discovered
    #[error("not connected to the League client")]
    NotConnected,

    #[error("LCU request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("LCU event stream error: {0}")]
    WebSocket(#[from] tungstenite::Error),

    #[error("TLS setup failed: {0}")]
    Tls(#[from] native_tls::Error),
}

/// Opaque session credentials parsed from the client lockfile
#[derive(Debug, Clone)]
pub struct LcuCredentials {
    pub port: u16,
    pub token: String,
    pub pid: u32,
}

impl LcuCredentials {
    fn auth_header(&self) -> String {
        format!(
            "Basic {}",
            general_purpose::STANDARD.encode(format!("riot:{}", self.token))
        )
    }
}

/// Read credentials from the lockfile under the client install directory.
/// Returns None while the client is not running.
pub fn discover_credentials(league_path: &str) -> Option<LcuCredentials> {
    let dir = PathBuf::from(league_path);
    for name in LOCKFILE_NAMES {
        if let Some(credentials) = read_lockfile(&dir.join(name)) {
            return Some(credentials);
        }
    }
    None
}

fn read_lockfile(path: &Path) -> Option<LcuCredentials> {
    let content = std::fs::read_to_string(path).ok()?;
    parse_lockfile(&content)
}

/// Lockfile format: `name:pid:port:password:protocol`
fn parse_lockfile(content: &str) -> Option<LcuCredentials> {
    let parts: Vec<&str> = content.trim().split(':').collect();
    if parts.len() < 5 {
        return None;
    }

    Some(LcuCredentials {
        pid: parts[1].parse().ok()?,
        port: parts[2].parse().ok()?,
        token: parts[3].to_string(),
    })
}

/// HTTP client for the LCU REST API. The client presents a self-signed
/// certificate, so validation is disabled for these local requests.
pub struct LcuClient {
    http: Client,
    credentials: Option<LcuCredentials>,
}

impl LcuClient {
    pub fn new() -> Result<Self, LcuError> {
        let http = Client::builder()
            .danger_accept_invalid_certs(true)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            credentials: None,
        })
    }

    pub fn set_credentials(&mut self, credentials: LcuCredentials) {
        self.credentials = Some(credentials);
    }

    /// Drop credentials; subsequent requests fail with [`LcuError::NotConnected`]
    pub fn clear_credentials(&mut self) {
        self.credentials = None;
    }

    pub fn is_connected(&self) -> bool {
        self.credentials.is_some()
    }

    async fn get(&self, path: &str) -> Result<reqwest::Response, LcuError> {
        let credentials = self.credentials.as_ref().ok_or(LcuError::NotConnected)?;

        let url = format!("https://127.0.0.1:{}{}", credentials.port, path);
        let response = self
            .http
            .get(&url)
            .header("Authorization", credentials.auth_header())
            .send()
            .await?;

        Ok(response)
    }

    /// Fetch the current gameflow phase string (e.g. "ChampSelect")
    pub async fn gameflow_phase(&self) -> Result<String, LcuError> {
        let text = self.get(GAMEFLOW_PHASE_URI).await?.text().await?;
        Ok(text.trim().trim_matches('"').to_string())
    }

    /// Fetch the champ select session. None when no session is active: the
    /// LCU answers those requests with an error body rather than a session.
    pub async fn champ_select_session(
        &self,
    ) -> Result<Option<RawChampSelectSession>, LcuError> {
        let response = self.get(CHAMP_SELECT_URI).await?;
        if !response.status().is_success() {
            return Ok(None);
        }

        let body: serde_json::Value = response.json().await?;
        if body.get("errorCode").is_some() {
            return Ok(None);
        }

        Ok(serde_json::from_value(body).ok())
    }
}

/// One event from the LCU WAMP stream
#[derive(Debug, Clone)]
pub struct LcuEvent {
    pub uri: String,
    pub data: serde_json::Value,
}

/// WebSocket subscription to the LCU event bus.
///
/// The LCU speaks a WAMP dialect: subscribe with `[5, topic]`, receive
/// `[8, topic, { uri, eventType, data }]` frames.
pub struct LcuEventStream {
    socket: WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>,
}

impl LcuEventStream {
    /// Connect and subscribe to the champ select and gameflow topics
    pub async fn connect(credentials: &LcuCredentials) -> Result<Self, LcuError> {
        let tls = TlsConnector::builder()
            .danger_accept_invalid_certs(true)
            .build()?;

        let url = format!("wss://127.0.0.1:{}/", credentials.port);
        let mut request = url.into_client_request()?;
        request.headers_mut().insert(
            "Authorization",
            header_value(&credentials.auth_header())?,
        );
        request
            .headers_mut()
            .insert("Sec-WebSocket-Protocol", header_value("wamp")?);

        let (mut socket, _response) = tokio_tungstenite::connect_async_tls_with_config(
            request,
            None,
            false,
            Some(Connector::NativeTls(tls)),
        )
        .await?;

        for uri in [CHAMP_SELECT_URI, GAMEFLOW_PHASE_URI] {
            let topic = topic_for(uri);
            debug!("Subscribing to LCU topic {}", topic);
            socket
                .send(Message::Text(format!("[5,\"{}\"]", topic)))
                .await?;
        }

        Ok(Self { socket })
    }

    /// Next subscribed event; None once the stream is closed or broken
    pub async fn next_event(&mut self) -> Option<LcuEvent> {
        loop {
            let message = match self.socket.next().await? {
                Ok(message) => message,
                Err(e) => {
                    warn!("LCU event stream error: {}", e);
                    return None;
                }
            };

            match message {
                Message::Text(text) => {
                    if let Some(event) = parse_event_frame(&text) {
                        return Some(event);
                    }
                }
                Message::Close(_) => return None,
                _ => {}
            }
        }
    }

    pub async fn close(mut self) {
        let _ = self.socket.close(None).await;
    }
}

/// WAMP topic name for a REST uri: slashes become underscores
fn topic_for(uri: &str) -> String {
    format!("OnJsonApiEvent{}", uri.replace('/', "_"))
}

fn header_value(value: &str) -> Result<HeaderValue, LcuError> {
    HeaderValue::from_str(value).map_err(|e| {
        LcuError::WebSocket(tungstenite::Error::HttpFormat(e.into()))
    })
}

/// Parse an `[8, topic, { uri, eventType, data }]` frame; anything else
/// (subscription acks, heartbeats) yields None
fn parse_event_frame(text: &str) -> Option<LcuEvent> {
    let value: serde_json::Value = serde_json::from_str(text).ok()?;
    let frame = value.as_array()?;
    if frame.len() < 3 || frame[0].as_i64() != Some(8) {
        return None;
    }

    let payload = frame[2].as_object()?;
    Some(LcuEvent {
        uri: payload.get("uri")?.as_str()?.to_string(),
        data: payload
            .get("data")
            .cloned()
            .unwrap_or(serde_json::Value::Null),
    })
}
