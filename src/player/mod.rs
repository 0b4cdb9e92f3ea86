use anyhow::Result;
use async_trait::async_trait;

pub mod connect;

/// One full picture of remote playback, as pushed by the capability. Each
/// snapshot supersedes the previous one entirely — consumers must never merge
/// fields across two snapshots.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaybackSnapshot {
    pub track_id: Option<String>,
    pub name: String,
    pub artists: Vec<String>,
    pub album: String,
    pub image: Option<String>,
    pub paused: bool,
    pub position_ms: u64,
    pub duration_ms: u64,
}

/// Events the capability pushes at the synchronizer. The taxonomy matches
/// the external playback SDK's listener set.
#[derive(Debug, Clone)]
pub enum PlayerEvent {
    Ready { device_id: String },
    NotReady { device_id: String },
    StateChanged(Option<PlaybackSnapshot>),
    InitializationError { message: String },
    AuthenticationError { message: String },
    AccountError { message: String },
    PlaybackError { message: String },
}

/// Bearer-token supplier for the capability. Implementations re-fetch from
/// the backend when the cached token is missing or about to expire.
#[async_trait]
pub trait TokenSource: Send + Sync {
    async fn bearer(&self) -> Result<String>;
}

/// The external playback capability. Command resolution only signals
/// acceptance; the resulting state always arrives as a `StateChanged` event.
#[async_trait]
pub trait PlayerCapability: Send + Sync {
    /// Bind to the remote player. Emits `Ready` (or an error event) on the
    /// event channel; the returned flag mirrors whether binding succeeded.
    async fn connect(&self) -> Result<bool>;
    async fn disconnect(&self);
    async fn pause(&self) -> Result<()>;
    async fn toggle_play(&self) -> Result<()>;
    async fn next_track(&self) -> Result<()>;
    async fn previous_track(&self) -> Result<()>;
    async fn seek(&self, position_ms: u64) -> Result<()>;
    async fn get_current_state(&self) -> Result<Option<PlaybackSnapshot>>;
}
