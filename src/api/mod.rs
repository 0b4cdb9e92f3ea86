use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned {0}")]
    Status(StatusCode),
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Token grant from the backend. `premium` is optional on the wire — an
/// absent field means no in-app playback entitlement.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenGrant {
    pub token: String,
    #[serde(default)]
    pub expires_at: Option<i64>,
    #[serde(default)]
    pub premium: bool,
}

/// One recommended track as the backend returns it. Optional fields are
/// tolerated; a missing image renders as a placeholder marker.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TrackCard {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub album: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub preview_url: Option<String>,
    pub spotify_url: String,
}

impl TrackCard {
    pub fn uri(&self) -> String {
        format!("spotify:track:{}", self.id)
    }
}

#[derive(Debug, Default, Deserialize)]
struct RecommendationsResponse {
    #[serde(default)]
    tracks: Vec<TrackCard>,
}

/// What a direct-play request came back with. The caller decides what each
/// arm means for the session (retry, degrade, surface an error).
#[derive(Debug, Clone, PartialEq)]
pub enum PlayOutcome {
    Started,
    Unauthorized,
    Forbidden,
    Failed(u16),
}

pub fn classify_play_status(status: StatusCode) -> PlayOutcome {
    if status.is_success() {
        PlayOutcome::Started
    } else if status == StatusCode::UNAUTHORIZED {
        PlayOutcome::Unauthorized
    } else if status == StatusCode::FORBIDDEN {
        PlayOutcome::Forbidden
    } else {
        PlayOutcome::Failed(status.as_u16())
    }
}

/// The two remote collaborators, behind one trait so tests can substitute a
/// fake: the moodify backend (token + recommendations) and the player Web
/// API (direct play, device transfer).
#[async_trait]
pub trait MusicApi: Send + Sync {
    async fn fetch_token(&self) -> ApiResult<TokenGrant>;
    async fn fetch_recommendations(&self, mood: &str) -> ApiResult<Vec<TrackCard>>;
    async fn play_track(&self, token: &str, device_id: &str, track_uri: &str) -> ApiResult<PlayOutcome>;
    async fn transfer_playback(&self, token: &str, device_id: &str) -> ApiResult<()>;
}

pub struct HttpApi {
    http: Client,
    server_url: String,
    player_api_url: String,
}

impl HttpApi {
    pub fn new(server_url: impl Into<String>, player_api_url: impl Into<String>) -> Self {
        HttpApi {
            http: Client::new(),
            server_url: server_url.into(),
            player_api_url: player_api_url.into(),
        }
    }
}

#[async_trait]
impl MusicApi for HttpApi {
    async fn fetch_token(&self) -> ApiResult<TokenGrant> {
        let url = format!("{}/api/token", self.server_url);
        let response = self.http.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(ApiError::Status(response.status()));
        }
        let grant: TokenGrant = response.json().await?;
        debug!(premium = grant.premium, "Token grant received");
        Ok(grant)
    }

    async fn fetch_recommendations(&self, mood: &str) -> ApiResult<Vec<TrackCard>> {
        let url = format!(
            "{}/api/recommendations?mood={}",
            self.server_url,
            urlencoding::encode(mood)
        );
        let response = self.http.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(ApiError::Status(response.status()));
        }
        let body: RecommendationsResponse = response.json().await?;
        debug!(mood, count = body.tracks.len(), "Recommendations received");
        Ok(body.tracks)
    }

    async fn play_track(&self, token: &str, device_id: &str, track_uri: &str) -> ApiResult<PlayOutcome> {
        let url = format!(
            "{}/me/player/play?device_id={}",
            self.player_api_url,
            urlencoding::encode(device_id)
        );
        let response = self
            .http
            .put(&url)
            .bearer_auth(token)
            .json(&serde_json::json!({ "uris": [track_uri] }))
            .send()
            .await?;
        Ok(classify_play_status(response.status()))
    }

    async fn transfer_playback(&self, token: &str, device_id: &str) -> ApiResult<()> {
        let url = format!("{}/me/player", self.player_api_url);
        let response = self
            .http
            .put(&url)
            .bearer_auth(token)
            .json(&serde_json::json!({ "device_ids": [device_id], "play": false }))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(ApiError::Status(response.status()));
        }
        Ok(())
    }
}
