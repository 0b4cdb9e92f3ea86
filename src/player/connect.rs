use anyhow::{bail, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use super::{PlaybackSnapshot, PlayerCapability, PlayerEvent, TokenSource};

const POLL_MS: u64 = 2000;

/// Production capability: drives the remote player over the Web API and
/// synthesizes the event stream by polling the playback-state endpoint.
pub struct ConnectPlayer {
    http: Client,
    api_url: String,
    tokens: Arc<dyn TokenSource>,
    events: mpsc::Sender<PlayerEvent>,
    poll: Mutex<Option<JoinHandle<()>>>,
}

impl ConnectPlayer {
    pub fn new(
        api_url: impl Into<String>,
        tokens: Arc<dyn TokenSource>,
        events: mpsc::Sender<PlayerEvent>,
    ) -> Self {
        ConnectPlayer {
            http: Client::new(),
            api_url: api_url.into(),
            tokens,
            events,
            poll: Mutex::new(None),
        }
    }

    async fn emit(&self, event: PlayerEvent) {
        let _ = self.events.send(event).await;
    }

    async fn command(&self, method: reqwest::Method, path: &str) -> Result<()> {
        let token = self.tokens.bearer().await?;
        let url = format!("{}{path}", self.api_url);
        let response = self.http.request(method, &url).bearer_auth(token).send().await?;
        if !response.status().is_success() {
            bail!("player command failed ({})", response.status());
        }
        Ok(())
    }

    /// Pick the device the remote side reports: the active one if any,
    /// otherwise the first listed.
    async fn find_device(&self, token: &str) -> Result<Option<String>> {
        let url = format!("{}/me/player/devices", self.api_url);
        let response = self.http.get(&url).bearer_auth(token).send().await?;
        if !response.status().is_success() {
            bail!("device listing failed ({})", response.status());
        }
        let body: Value = response.json().await?;
        let devices = body["devices"].as_array().cloned().unwrap_or_default();
        let chosen = devices
            .iter()
            .find(|d| d["is_active"].as_bool().unwrap_or(false))
            .or_else(|| devices.first())
            .and_then(|d| d["id"].as_str())
            .map(|s| s.to_string());
        Ok(chosen)
    }
}

#[async_trait]
impl PlayerCapability for ConnectPlayer {
    async fn connect(&self) -> Result<bool> {
        self.disconnect().await;

        let token = match self.tokens.bearer().await {
            Ok(t) => t,
            Err(e) => {
                self.emit(PlayerEvent::AuthenticationError { message: e.to_string() }).await;
                return Ok(false);
            }
        };

        let device_id = match self.find_device(&token).await {
            Ok(Some(id)) => id,
            Ok(None) => {
                self.emit(PlayerEvent::InitializationError {
                    message: "No playback device available — open the player on another device first".to_string(),
                })
                .await;
                return Ok(false);
            }
            Err(e) => {
                self.emit(PlayerEvent::InitializationError { message: e.to_string() }).await;
                return Ok(false);
            }
        };

        info!(%device_id, "Remote player bound");
        self.emit(PlayerEvent::Ready { device_id: device_id.clone() }).await;

        let handle = tokio::spawn(poll_loop(
            self.http.clone(),
            self.api_url.clone(),
            self.tokens.clone(),
            self.events.clone(),
            device_id,
        ));
        *self.poll.lock().await = Some(handle);
        Ok(true)
    }

    async fn disconnect(&self) {
        if let Some(handle) = self.poll.lock().await.take() {
            handle.abort();
        }
    }

    async fn pause(&self) -> Result<()> {
        self.command(reqwest::Method::PUT, "/me/player/pause").await
    }

    async fn toggle_play(&self) -> Result<()> {
        match self.get_current_state().await? {
            Some(state) if !state.paused => self.pause().await,
            _ => self.command(reqwest::Method::PUT, "/me/player/play").await,
        }
    }

    async fn next_track(&self) -> Result<()> {
        self.command(reqwest::Method::POST, "/me/player/next").await
    }

    async fn previous_track(&self) -> Result<()> {
        self.command(reqwest::Method::POST, "/me/player/previous").await
    }

    async fn seek(&self, position_ms: u64) -> Result<()> {
        self.command(
            reqwest::Method::PUT,
            &format!("/me/player/seek?position_ms={position_ms}"),
        )
        .await
    }

    async fn get_current_state(&self) -> Result<Option<PlaybackSnapshot>> {
        let token = self.tokens.bearer().await?;
        let url = format!("{}/me/player", self.api_url);
        let response = self.http.get(&url).bearer_auth(token).send().await?;
        if response.status() == StatusCode::NO_CONTENT {
            return Ok(None);
        }
        if !response.status().is_success() {
            bail!("playback state request failed ({})", response.status());
        }
        let body: Value = response.json().await?;
        Ok(snapshot_from_player_json(&body))
    }
}

/// Poll the playback-state endpoint and translate responses into the event
/// taxonomy. Auth/account/offline statuses end the loop; the synchronizer
/// reconnects after it has dealt with them.
async fn poll_loop(
    http: Client,
    api_url: String,
    tokens: Arc<dyn TokenSource>,
    events: mpsc::Sender<PlayerEvent>,
    device_id: String,
) {
    let mut interval = tokio::time::interval(Duration::from_millis(POLL_MS));
    let url = format!("{api_url}/me/player");
    loop {
        interval.tick().await;

        let token = match tokens.bearer().await {
            Ok(t) => t,
            Err(e) => {
                let _ = events.send(PlayerEvent::AuthenticationError { message: e.to_string() }).await;
                break;
            }
        };

        let response = match http.get(&url).bearer_auth(&token).send().await {
            Ok(r) => r,
            Err(e) => {
                warn!("Playback poll error: {e}");
                continue;
            }
        };

        let event = match response.status() {
            StatusCode::NO_CONTENT => PlayerEvent::StateChanged(None),
            StatusCode::UNAUTHORIZED => PlayerEvent::AuthenticationError {
                message: "token rejected by player API".to_string(),
            },
            StatusCode::FORBIDDEN => PlayerEvent::AccountError {
                message: "account not entitled to playback".to_string(),
            },
            StatusCode::NOT_FOUND => PlayerEvent::NotReady { device_id: device_id.clone() },
            status if status.is_success() => match response.json::<Value>().await {
                Ok(body) => PlayerEvent::StateChanged(snapshot_from_player_json(&body)),
                Err(e) => {
                    warn!("Playback state parse error: {e}");
                    continue;
                }
            },
            status => PlayerEvent::PlaybackError {
                message: format!("playback state request failed ({status})"),
            },
        };

        let fatal = matches!(
            event,
            PlayerEvent::AuthenticationError { .. }
                | PlayerEvent::AccountError { .. }
                | PlayerEvent::NotReady { .. }
        );
        if events.send(event).await.is_err() || fatal {
            break;
        }
    }
}

/// Destructure a playback-state payload defensively: absent fields are
/// tolerated, a missing item means no snapshot.
pub fn snapshot_from_player_json(body: &Value) -> Option<PlaybackSnapshot> {
    let item = body.get("item")?;
    if item.is_null() {
        return None;
    }
    let artists = item["artists"]
        .as_array()
        .map(|list| {
            list.iter()
                .filter_map(|a| a["name"].as_str().map(|s| s.to_string()))
                .collect()
        })
        .unwrap_or_default();

    Some(PlaybackSnapshot {
        track_id: item["id"].as_str().map(|s| s.to_string()),
        name: item["name"].as_str().unwrap_or_default().to_string(),
        artists,
        album: item["album"]["name"].as_str().unwrap_or_default().to_string(),
        image: item["album"]["images"][0]["url"].as_str().map(|s| s.to_string()),
        paused: !body["is_playing"].as_bool().unwrap_or(false),
        position_ms: body["progress_ms"].as_u64().unwrap_or(0),
        duration_ms: item["duration_ms"].as_u64().unwrap_or(0),
    })
}
