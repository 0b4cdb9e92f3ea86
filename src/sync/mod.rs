//! Playback synchronizer: keeps local UI state consistent with the external
//! player capability and the backend recommendation list.
//!
//! All network and capability calls run in spawned tasks that report back
//! over the outcome channel; only the event loop calls the `handle_*`
//! methods, so every state mutation happens on one logical thread.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, info, warn};

use crate::api::{ApiResult, MusicApi, PlayOutcome, TokenGrant, TrackCard};
use crate::player::{PlaybackSnapshot, PlayerCapability, PlayerEvent, TokenSource};

const SEEK_STEP_MS: u64 = 10_000;

// ─── Moods ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, strum_macros::Display, strum_macros::EnumIter)]
pub enum PresetMood {
    Happy,
    Sad,
    Relaxed,
    Energetic,
    Focused,
}

impl PresetMood {
    pub fn query(&self) -> String {
        self.to_string().to_lowercase()
    }
}

/// One filter in the refine bar: the dynamic current-mood pill (the text the
/// user submitted) or one of the fixed presets. Exactly one is active.
#[derive(Debug, Clone, PartialEq)]
pub enum MoodFilter {
    Current(String),
    Preset(PresetMood),
}

impl MoodFilter {
    pub fn label(&self) -> String {
        match self {
            MoodFilter::Current(text) => capitalize_first(text),
            MoodFilter::Preset(mood) => mood.to_string(),
        }
    }

    /// The value sent as the `mood` query parameter.
    pub fn query(&self) -> String {
        match self {
            MoodFilter::Current(text) => text.clone(),
            MoodFilter::Preset(mood) => mood.query(),
        }
    }
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

// ─── Playback view ───────────────────────────────────────────────────────────

/// The local mirror of remote playback. Always replaced wholesale from a
/// snapshot; the only local computation is the cosmetic progress advance
/// between state events.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NowPlaying {
    pub track_id: Option<String>,
    pub name: String,
    pub artists: Vec<String>,
    pub album: String,
    pub image: Option<String>,
    pub is_playing: bool,
    pub position_ms: u64,
    pub duration_ms: u64,
}

impl NowPlaying {
    pub fn from_snapshot(s: &PlaybackSnapshot) -> Self {
        NowPlaying {
            track_id: s.track_id.clone(),
            name: s.name.clone(),
            artists: s.artists.clone(),
            album: s.album.clone(),
            image: s.image.clone(),
            is_playing: !s.paused,
            position_ms: s.position_ms,
            duration_ms: s.duration_ms,
        }
    }

    pub fn advance(&mut self, elapsed_ms: u64) {
        if self.is_playing {
            self.position_ms = (self.position_ms + elapsed_ms).min(self.duration_ms);
        }
    }

    pub fn progress_percent(&self) -> f64 {
        if self.duration_ms == 0 {
            return 0.0;
        }
        (self.position_ms as f64 / self.duration_ms as f64).clamp(0.0, 1.0)
    }

    pub fn progress_formatted(&self) -> String {
        let secs = self.position_ms / 1000;
        let dur_secs = self.duration_ms / 1000;
        format!(
            "{}:{:02} / {}:{:02}",
            secs / 60,
            secs % 60,
            dur_secs / 60,
            dur_secs % 60
        )
    }
}

// ─── Session singletons ──────────────────────────────────────────────────────

#[derive(Debug, Default)]
struct SessionInner {
    token: Option<String>,
    expires_at: Option<i64>,
    premium: bool,
    device_id: Option<String>,
}

/// Page-lifetime mutable singletons (token, premium flag, device id) behind
/// accessor/mutator methods. Cloning shares the underlying state.
#[derive(Clone, Default)]
pub struct Session(Arc<Mutex<SessionInner>>);

impl Session {
    pub async fn token(&self) -> Option<String> {
        self.0.lock().await.token.clone()
    }

    pub async fn set_token(&self, token: String, expires_at: Option<i64>) {
        let mut inner = self.0.lock().await;
        inner.token = Some(token);
        inner.expires_at = expires_at;
    }

    pub async fn set_grant(&self, grant: &TokenGrant) {
        let mut inner = self.0.lock().await;
        inner.token = Some(grant.token.clone());
        inner.expires_at = grant.expires_at;
        inner.premium = grant.premium;
    }

    pub async fn premium(&self) -> bool {
        self.0.lock().await.premium
    }

    pub async fn device_id(&self) -> Option<String> {
        self.0.lock().await.device_id.clone()
    }

    pub async fn set_device_id(&self, device_id: Option<String>) {
        self.0.lock().await.device_id = device_id;
    }

    /// True when the stored token is missing or within a minute of expiry.
    pub async fn token_stale(&self) -> bool {
        let inner = self.0.lock().await;
        match (&inner.token, inner.expires_at) {
            (None, _) => true,
            (Some(_), Some(expires_at)) => chrono::Utc::now().timestamp() > expires_at - 60,
            (Some(_), None) => false,
        }
    }
}

/// Token source handed to the player capability: serves the cached session
/// token, re-fetching from the backend when stale.
pub struct SessionTokens {
    session: Session,
    api: Arc<dyn MusicApi>,
}

impl SessionTokens {
    pub fn new(session: Session, api: Arc<dyn MusicApi>) -> Self {
        SessionTokens { session, api }
    }
}

#[async_trait]
impl TokenSource for SessionTokens {
    async fn bearer(&self) -> anyhow::Result<String> {
        if !self.session.token_stale().await {
            if let Some(token) = self.session.token().await {
                return Ok(token);
            }
        }
        let grant = self.api.fetch_token().await?;
        self.session.set_token(grant.token.clone(), grant.expires_at).await;
        Ok(grant.token)
    }
}

// ─── Outcomes, commands, notices ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransportCommand {
    TogglePlay,
    Next,
    Previous,
    SeekForward,
    SeekBackward,
}

impl TransportCommand {
    fn describe(&self) -> &'static str {
        match self {
            TransportCommand::TogglePlay => "controlling playback",
            TransportCommand::Next => "playing next track",
            TransportCommand::Previous => "playing previous track",
            TransportCommand::SeekForward | TransportCommand::SeekBackward => "seeking",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DirectPlayResult {
    Started,
    SessionExpired,
    PremiumRequired,
    Failed(String),
}

/// Results of spawned work, delivered back to the event loop.
#[derive(Debug)]
pub enum SyncOutcome {
    TokenFetched(ApiResult<TokenGrant>),
    TokenRefreshed(Result<(), String>),
    Recommendations {
        generation: u64,
        label: String,
        result: ApiResult<Vec<TrackCard>>,
    },
    Transport {
        command: TransportCommand,
        result: Result<(), String>,
    },
    DirectPlay {
        track_id: String,
        result: DirectPlayResult,
    },
    Transferred(Result<(), String>),
}

/// A user-visible message the synchronizer wants shown; the app drains these
/// into toast notifications.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub message: String,
    pub is_error: bool,
}

impl Notice {
    fn info(message: impl Into<String>) -> Self {
        Notice { message: message.into(), is_error: false }
    }
    fn error(message: impl Into<String>) -> Self {
        Notice { message: message.into(), is_error: true }
    }
}

// ─── Track list ──────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct TrackListState {
    pub filters: Vec<MoodFilter>,
    pub active_filter: usize,
    pub tracks: Vec<TrackCard>,
    pub selected: usize,
    pub is_loading: bool,
    pub error: Option<String>,
    pub mood_label: String,
    /// Track id whose direct-play request is in flight (card disabled).
    pub pending_track: Option<String>,
    /// Track id currently marked as playing.
    pub playing_track: Option<String>,
}

impl TrackListState {
    fn new() -> Self {
        use strum::IntoEnumIterator;
        TrackListState {
            filters: PresetMood::iter().map(MoodFilter::Preset).collect(),
            ..Default::default()
        }
    }

    pub fn select_prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    pub fn select_next(&mut self) {
        let max = self.tracks.len().saturating_sub(1);
        if self.selected < max {
            self.selected += 1;
        }
    }

    pub fn selected_card(&self) -> Option<&TrackCard> {
        self.tracks.get(self.selected)
    }
}

// ─── State machine ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum SyncPhase {
    Unbound,
    Acquiring,
    Ready { device_id: String },
    Disconnected,
    /// Terminal degradation: in-app playback unavailable, cards open
    /// external links instead.
    LinksOnly,
}

pub struct Synchronizer {
    api: Arc<dyn MusicApi>,
    session: Session,
    outcomes: mpsc::Sender<SyncOutcome>,
    player: Option<Arc<dyn PlayerCapability>>,
    pub phase: SyncPhase,
    pub premium: bool,
    pub now_playing: Option<NowPlaying>,
    pub list: TrackListState,
    pending_transport: Option<TransportCommand>,
    generation: u64,
    notices: Vec<Notice>,
}

impl Synchronizer {
    pub fn new(api: Arc<dyn MusicApi>, outcomes: mpsc::Sender<SyncOutcome>) -> Self {
        Synchronizer {
            api,
            session: Session::default(),
            outcomes,
            player: None,
            phase: SyncPhase::Unbound,
            premium: false,
            now_playing: None,
            list: TrackListState::new(),
            pending_transport: None,
            generation: 0,
            notices: Vec::new(),
        }
    }

    pub fn session(&self) -> Session {
        self.session.clone()
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn is_playing(&self) -> bool {
        self.now_playing.as_ref().map(|np| np.is_playing).unwrap_or(false)
    }

    pub fn transport_pending(&self) -> bool {
        self.pending_transport.is_some()
    }

    /// True once a token grant flagged premium but no capability is attached
    /// yet; the app builds the production player and calls `attach_player`.
    pub fn needs_player(&self) -> bool {
        self.player.is_none() && self.premium && self.phase == SyncPhase::Acquiring
    }

    // ── Bootstrap / retry ────────────────────────────────────────────────

    pub fn bootstrap(&mut self) {
        self.phase = SyncPhase::Acquiring;
        self.begin_token_fetch();
    }

    /// User-triggered retry. Never invoked automatically — there is no
    /// retry loop anywhere in this module.
    pub fn retry(&mut self) {
        match self.phase.clone() {
            SyncPhase::Unbound | SyncPhase::Acquiring => {
                self.phase = SyncPhase::Acquiring;
                self.begin_token_fetch();
            }
            SyncPhase::Disconnected => match self.player.clone() {
                Some(player) => {
                    tokio::spawn(async move {
                        if let Err(e) = player.connect().await {
                            warn!("Reconnect attempt failed: {e}");
                        }
                    });
                }
                None => self.begin_token_fetch(),
            },
            SyncPhase::LinksOnly => {
                self.notices.push(Notice::info("In-app playback unavailable for this session"));
            }
            SyncPhase::Ready { .. } => {}
        }
    }

    fn begin_token_fetch(&self) {
        let api = self.api.clone();
        let tx = self.outcomes.clone();
        tokio::spawn(async move {
            let result = api.fetch_token().await;
            let _ = tx.send(SyncOutcome::TokenFetched(result)).await;
        });
    }

    pub fn attach_player(&mut self, player: Arc<dyn PlayerCapability>) {
        self.player = Some(player.clone());
        tokio::spawn(async move {
            if let Err(e) = player.connect().await {
                warn!("Player connect failed: {e}");
            }
        });
    }

    // ── Player events ────────────────────────────────────────────────────

    pub async fn handle_player_event(&mut self, event: PlayerEvent) {
        if self.phase == SyncPhase::LinksOnly {
            // Degradation is permanent; a straggling event must not revive
            // the player path.
            return;
        }
        match event {
            PlayerEvent::Ready { device_id } => {
                info!(%device_id, "Player ready");
                self.session.set_device_id(Some(device_id.clone())).await;
                self.phase = SyncPhase::Ready { device_id: device_id.clone() };
                self.notices.push(Notice::info("Connected to player ✓"));
                self.begin_transfer(device_id);
            }
            PlayerEvent::NotReady { device_id } => {
                info!(%device_id, "Player device went offline");
                self.phase = SyncPhase::Disconnected;
                self.clear_playback();
                self.notices.push(Notice::error("Player disconnected — press R to reconnect"));
            }
            PlayerEvent::StateChanged(None) => {
                // Playback stopped entirely: stop progress tracking, idle UI.
                self.clear_playback();
            }
            PlayerEvent::StateChanged(Some(snapshot)) => {
                self.list.playing_track = snapshot.track_id.clone();
                self.now_playing = Some(NowPlaying::from_snapshot(&snapshot));
            }
            PlayerEvent::InitializationError { message } => {
                self.phase = SyncPhase::Disconnected;
                self.clear_playback();
                self.notices.push(Notice::error(format!("Failed to initialize player: {message}")));
            }
            PlayerEvent::AuthenticationError { message } => {
                warn!("Player authentication error: {message}");
                self.phase = SyncPhase::Disconnected;
                self.begin_token_refresh();
            }
            PlayerEvent::AccountError { message } => {
                warn!("Player account error: {message}");
                self.degrade_to_links_only(
                    "Premium account required for playback — tracks open in Spotify",
                );
            }
            PlayerEvent::PlaybackError { message } => {
                self.notices.push(Notice::error(format!("Playback error: {message}")));
            }
        }
    }

    fn clear_playback(&mut self) {
        self.now_playing = None;
        self.list.playing_track = None;
    }

    fn degrade_to_links_only(&mut self, message: &str) {
        self.phase = SyncPhase::LinksOnly;
        self.premium = false;
        self.clear_playback();
        self.notices.push(Notice::error(message));
        if let Some(player) = self.player.take() {
            tokio::spawn(async move { player.disconnect().await });
        }
    }

    /// In-place token refresh after an authentication error; on success the
    /// capability is reconnected without a full re-acquisition.
    fn begin_token_refresh(&self) {
        let api = self.api.clone();
        let session = self.session.clone();
        let tx = self.outcomes.clone();
        tokio::spawn(async move {
            let result = match api.fetch_token().await {
                Ok(grant) => {
                    session.set_token(grant.token.clone(), grant.expires_at).await;
                    Ok(())
                }
                Err(e) => Err(e.to_string()),
            };
            let _ = tx.send(SyncOutcome::TokenRefreshed(result)).await;
        });
    }

    fn begin_transfer(&self, device_id: String) {
        let api = self.api.clone();
        let session = self.session.clone();
        let tx = self.outcomes.clone();
        tokio::spawn(async move {
            let result = match session.token().await {
                Some(token) => api
                    .transfer_playback(&token, &device_id)
                    .await
                    .map_err(|e| e.to_string()),
                None => Err("no session token".to_string()),
            };
            let _ = tx.send(SyncOutcome::Transferred(result)).await;
        });
    }

    // ── Outcomes ─────────────────────────────────────────────────────────

    pub async fn handle_outcome(&mut self, outcome: SyncOutcome) {
        match outcome {
            SyncOutcome::TokenFetched(Ok(grant)) => {
                self.session.set_grant(&grant).await;
                self.premium = grant.premium;
                if grant.premium {
                    // Stay in Acquiring; the app attaches the capability next.
                    self.notices.push(Notice::info("Signed in ✓"));
                } else if self.phase != SyncPhase::LinksOnly {
                    self.phase = SyncPhase::LinksOnly;
                    self.notices.push(Notice::info(
                        "Premium required for in-app playback — tracks open in Spotify",
                    ));
                }
            }
            SyncOutcome::TokenFetched(Err(e)) => {
                warn!("Token fetch failed: {e}");
                self.phase = SyncPhase::Acquiring;
                self.notices.push(Notice::error("Authentication error — press R to retry"));
            }
            SyncOutcome::TokenRefreshed(Ok(())) => {
                if let Some(player) = &self.player {
                    let player = player.clone();
                    tokio::spawn(async move {
                        player.disconnect().await;
                        if let Err(e) = player.connect().await {
                            warn!("Reconnect after token refresh failed: {e}");
                        }
                    });
                }
            }
            SyncOutcome::TokenRefreshed(Err(e)) => {
                warn!("Token refresh failed: {e}");
                self.notices.push(Notice::error("Session expired — please log in again"));
            }
            SyncOutcome::Recommendations { generation, label, result } => {
                self.apply_recommendations(generation, label, result);
            }
            SyncOutcome::Transport { command, result } => {
                self.pending_transport = None;
                if let Err(e) = result {
                    warn!("Transport command failed: {e}");
                    self.notices.push(Notice::error(format!("Error {}", command.describe())));
                }
                // On success the authoritative state arrives with the next
                // StateChanged event, never from the command result.
            }
            SyncOutcome::DirectPlay { track_id, result } => {
                self.list.pending_track = None;
                match result {
                    DirectPlayResult::Started => {
                        self.list.playing_track = Some(track_id);
                    }
                    DirectPlayResult::SessionExpired => {
                        self.notices.push(Notice::error("Session expired — please log in again"));
                    }
                    DirectPlayResult::PremiumRequired => {
                        self.degrade_to_links_only(
                            "Playback failed — Premium privileges required. Tracks open in Spotify",
                        );
                    }
                    DirectPlayResult::Failed(e) => {
                        warn!("Direct play failed: {e}");
                        self.notices.push(Notice::error("Error playing track. Please try again"));
                    }
                }
            }
            SyncOutcome::Transferred(Ok(())) => {
                debug!("Playback transferred to this device");
            }
            SyncOutcome::Transferred(Err(e)) => {
                // Best-effort: logged, never surfaced as an error.
                warn!("Playback transfer failed: {e}");
            }
        }
    }

    // ── Recommendations ──────────────────────────────────────────────────

    pub fn submit_mood(&mut self, text: String) {
        if matches!(self.list.filters.first(), Some(MoodFilter::Current(_))) {
            self.list.filters[0] = MoodFilter::Current(text);
        } else {
            self.list.filters.insert(0, MoodFilter::Current(text));
        }
        self.list.active_filter = 0;
        self.begin_fetch();
    }

    pub fn select_filter(&mut self, index: usize) {
        if index >= self.list.filters.len() {
            return;
        }
        self.list.active_filter = index;
        self.begin_fetch();
    }

    fn begin_fetch(&mut self) {
        let filter = &self.list.filters[self.list.active_filter];
        let query = filter.query();
        let label = filter.label();
        self.generation += 1;
        let generation = self.generation;
        self.list.is_loading = true;
        self.list.error = None;

        let api = self.api.clone();
        let tx = self.outcomes.clone();
        tokio::spawn(async move {
            let result = api.fetch_recommendations(&query).await;
            let _ = tx
                .send(SyncOutcome::Recommendations { generation, label, result })
                .await;
        });
    }

    fn apply_recommendations(
        &mut self,
        generation: u64,
        label: String,
        result: ApiResult<Vec<TrackCard>>,
    ) {
        if generation != self.generation {
            // A newer filter selection superseded this fetch; its response
            // must never overwrite the newer list.
            debug!(generation, current = self.generation, "Stale recommendation response discarded");
            return;
        }
        match result {
            Ok(tracks) => {
                let count = tracks.len();
                self.list.tracks = tracks;
                self.list.selected = 0;
                self.list.mood_label = label;
                self.list.is_loading = false;
                self.list.error = None;
                self.notices.push(Notice::info(format!("{count} tracks for your mood")));
            }
            Err(e) => {
                warn!("Recommendation fetch failed: {e}");
                self.list.is_loading = false;
                self.list.error =
                    Some("Failed to load recommendations. Please try again.".to_string());
            }
        }
    }

    // ── Transport commands ───────────────────────────────────────────────

    pub fn transport(&mut self, command: TransportCommand) {
        if !matches!(self.phase, SyncPhase::Ready { .. }) {
            return;
        }
        if self.pending_transport.is_some() {
            // Control is disabled while a command is in flight.
            return;
        }
        let Some(player) = self.player.clone() else {
            return;
        };

        let seek_target = self.now_playing.as_ref().map(|np| match command {
            TransportCommand::SeekForward => (np.position_ms + SEEK_STEP_MS).min(np.duration_ms),
            TransportCommand::SeekBackward => np.position_ms.saturating_sub(SEEK_STEP_MS),
            _ => np.position_ms,
        });

        self.pending_transport = Some(command);
        let tx = self.outcomes.clone();
        tokio::spawn(async move {
            let result = match command {
                TransportCommand::TogglePlay => player.toggle_play().await,
                TransportCommand::Next => player.next_track().await,
                TransportCommand::Previous => player.previous_track().await,
                TransportCommand::SeekForward | TransportCommand::SeekBackward => match seek_target {
                    Some(position) => player.seek(position).await,
                    None => Ok(()),
                },
            };
            let _ = tx
                .send(SyncOutcome::Transport { command, result: result.map_err(|e| e.to_string()) })
                .await;
        });
    }

    // ── Track activation ─────────────────────────────────────────────────

    /// Activate the selected card: direct play when the player is ready,
    /// external link in link-only mode.
    pub fn play_selected(&mut self) {
        let Some(card) = self.list.selected_card().cloned() else {
            return;
        };
        match self.phase.clone() {
            SyncPhase::LinksOnly => self.open_url(&card.spotify_url),
            SyncPhase::Ready { device_id } => {
                if self.list.pending_track.is_some() {
                    return;
                }
                self.list.pending_track = Some(card.id.clone());
                let api = self.api.clone();
                let session = self.session.clone();
                let tx = self.outcomes.clone();
                tokio::spawn(async move {
                    let result = direct_play(api, session, &device_id, &card.uri()).await;
                    let _ = tx.send(SyncOutcome::DirectPlay { track_id: card.id, result }).await;
                });
            }
            _ => {
                self.notices.push(Notice::error("Player not ready yet"));
            }
        }
    }

    /// The always-available "Open in Spotify" action.
    pub fn open_selected(&mut self) {
        if let Some(card) = self.list.selected_card() {
            let url = card.spotify_url.clone();
            self.open_url(&url);
        }
    }

    fn open_url(&mut self, url: &str) {
        if let Err(e) = open::that(url) {
            warn!("Could not open browser: {e}");
            self.notices.push(Notice::error("Could not open the link in your browser"));
        }
    }

    // ── Tick ─────────────────────────────────────────────────────────────

    /// Advance the cosmetic progress position between state events. The one
    /// tick interval drives this; replacing `now_playing` wholesale on each
    /// event keeps a second tracker from ever existing.
    pub fn tick(&mut self, elapsed_ms: u64) {
        if let Some(np) = &mut self.now_playing {
            np.advance(elapsed_ms);
        }
    }
}

/// Direct track play with the retry contract: 401 refreshes the token and
/// retries exactly once using the token that refresh produced; a second 401
/// is a dead session. 403 means the account lost playback privileges.
pub async fn direct_play(
    api: Arc<dyn MusicApi>,
    session: Session,
    device_id: &str,
    track_uri: &str,
) -> DirectPlayResult {
    let Some(token) = session.token().await else {
        return DirectPlayResult::SessionExpired;
    };
    match api.play_track(&token, device_id, track_uri).await {
        Ok(PlayOutcome::Started) => DirectPlayResult::Started,
        Ok(PlayOutcome::Forbidden) => DirectPlayResult::PremiumRequired,
        Ok(PlayOutcome::Unauthorized) => {
            let grant = match api.fetch_token().await {
                Ok(grant) => grant,
                Err(_) => return DirectPlayResult::SessionExpired,
            };
            session.set_token(grant.token.clone(), grant.expires_at).await;
            // Retry with the token the refresh produced, not a re-read of
            // the shared session state.
            match api.play_track(&grant.token, device_id, track_uri).await {
                Ok(PlayOutcome::Started) => DirectPlayResult::Started,
                Ok(PlayOutcome::Unauthorized) => DirectPlayResult::SessionExpired,
                Ok(PlayOutcome::Forbidden) => DirectPlayResult::PremiumRequired,
                Ok(PlayOutcome::Failed(code)) => {
                    DirectPlayResult::Failed(format!("playback request failed ({code})"))
                }
                Err(e) => DirectPlayResult::Failed(e.to_string()),
            }
        }
        Ok(PlayOutcome::Failed(code)) => {
            DirectPlayResult::Failed(format!("playback request failed ({code})"))
        }
        Err(e) => DirectPlayResult::Failed(e.to_string()),
    }
}
