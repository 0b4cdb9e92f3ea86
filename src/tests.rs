#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use tokio::sync::mpsc;

    use crate::api::{
        classify_play_status, ApiError, ApiResult, MusicApi, PlayOutcome, TokenGrant, TrackCard,
    };
    use crate::assistant::{pill_label, MoodInput, SUGGESTIONS};
    use crate::player::{connect::snapshot_from_player_json, PlaybackSnapshot, PlayerCapability, PlayerEvent};
    use crate::sync::{
        direct_play, DirectPlayResult, NowPlaying, PresetMood, Session, SyncOutcome, SyncPhase,
        Synchronizer, TransportCommand,
    };

    // ── Fakes ────────────────────────────────────────────────────────────────

    #[derive(Default)]
    struct FakeApi {
        token_grants: Mutex<VecDeque<ApiResult<TokenGrant>>>,
        play_outcomes: Mutex<VecDeque<PlayOutcome>>,
        /// Bearer token used by each play_track call.
        play_tokens: Mutex<Vec<String>>,
    }

    impl FakeApi {
        fn queue_token(&self, grant: ApiResult<TokenGrant>) {
            self.token_grants.lock().unwrap().push_back(grant);
        }

        fn queue_play(&self, outcome: PlayOutcome) {
            self.play_outcomes.lock().unwrap().push_back(outcome);
        }

        fn play_calls(&self) -> Vec<String> {
            self.play_tokens.lock().unwrap().clone()
        }
    }

    fn grant(token: &str, premium: bool) -> TokenGrant {
        TokenGrant { token: token.to_string(), expires_at: None, premium }
    }

    #[async_trait]
    impl MusicApi for FakeApi {
        async fn fetch_token(&self) -> ApiResult<TokenGrant> {
            self.token_grants
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(grant("fresh-token", true)))
        }

        async fn fetch_recommendations(&self, _mood: &str) -> ApiResult<Vec<TrackCard>> {
            Ok(vec![])
        }

        async fn play_track(&self, token: &str, _device_id: &str, _track_uri: &str) -> ApiResult<PlayOutcome> {
            self.play_tokens.lock().unwrap().push(token.to_string());
            Ok(self
                .play_outcomes
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(PlayOutcome::Started))
        }

        async fn transfer_playback(&self, _token: &str, _device_id: &str) -> ApiResult<()> {
            Ok(())
        }
    }

    #[derive(Default)]
    struct FakeCapability {
        toggle_calls: AtomicUsize,
        next_calls: AtomicUsize,
    }

    #[async_trait]
    impl PlayerCapability for FakeCapability {
        async fn connect(&self) -> anyhow::Result<bool> {
            Ok(true)
        }
        async fn disconnect(&self) {}
        async fn pause(&self) -> anyhow::Result<()> {
            Ok(())
        }
        async fn toggle_play(&self) -> anyhow::Result<()> {
            self.toggle_calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
        async fn next_track(&self) -> anyhow::Result<()> {
            self.next_calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
        async fn previous_track(&self) -> anyhow::Result<()> {
            Ok(())
        }
        async fn seek(&self, _position_ms: u64) -> anyhow::Result<()> {
            Ok(())
        }
        async fn get_current_state(&self) -> anyhow::Result<Option<PlaybackSnapshot>> {
            Ok(None)
        }
    }

    fn card(id: &str, name: &str) -> TrackCard {
        TrackCard {
            id: id.to_string(),
            name: name.to_string(),
            artist: "X".to_string(),
            album: "Y".to_string(),
            image: None,
            preview_url: None,
            spotify_url: format!("https://open.spotify.com/track/{id}"),
        }
    }

    fn make_sync() -> (Synchronizer, mpsc::Receiver<SyncOutcome>, Arc<FakeApi>) {
        let api = Arc::new(FakeApi::default());
        let (tx, rx) = mpsc::channel(16);
        let sync = Synchronizer::new(api.clone(), tx);
        (sync, rx, api)
    }

    // ── Mood-input assistant ─────────────────────────────────────────────────

    #[test]
    fn test_empty_submit_blocked_with_single_error() {
        let mut input = MoodInput::default();
        assert!(input.submit().is_none());
        assert!(input.error.is_some());
        assert!(input.invalid);

        // A second blocked submit replaces the banner, it never stacks.
        assert!(input.submit().is_none());
        assert!(input.error.is_some());
    }

    #[test]
    fn test_whitespace_submit_blocked() {
        let mut input = MoodInput::default();
        for c in "   \t ".chars() {
            input.push_char(c);
        }
        assert!(input.submit().is_none());
        assert!(input.invalid);
    }

    #[test]
    fn test_input_clears_error() {
        let mut input = MoodInput::default();
        input.submit();
        assert!(input.error.is_some());
        input.push_char('h');
        assert!(input.error.is_none());
        assert!(!input.invalid);
    }

    #[test]
    fn test_submit_trims_text() {
        let mut input = MoodInput::default();
        for c in "  feeling great  ".chars() {
            input.push_char(c);
        }
        assert_eq!(input.submit().as_deref(), Some("feeling great"));
    }

    #[test]
    fn test_pill_apply_sets_full_text() {
        let mut input = MoodInput::default();
        input.submit(); // raise the error first
        input.selected_pill = 3;
        input.apply_selected_pill();
        assert_eq!(input.buffer, SUGGESTIONS[3]);
        assert!(input.error.is_none());
    }

    #[test]
    fn test_pill_label_truncated_with_marker() {
        let label = pill_label(SUGGESTIONS[0]);
        assert!(label.ends_with("..."));
        assert!(label.len() < SUGGESTIONS[0].len() + 3);
    }

    #[test]
    fn test_pill_label_short_text_unchanged() {
        assert_eq!(pill_label("happy"), "happy");
    }

    // ── NowPlaying ───────────────────────────────────────────────────────────

    #[test]
    fn test_progress_percent_zero_duration() {
        let np = NowPlaying { duration_ms: 0, position_ms: 0, ..Default::default() };
        assert_eq!(np.progress_percent(), 0.0);
    }

    #[test]
    fn test_progress_percent_half() {
        let np = NowPlaying { duration_ms: 200_000, position_ms: 100_000, ..Default::default() };
        assert!((np.progress_percent() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_progress_formatted() {
        let np = NowPlaying {
            duration_ms: 213_000, // 3:33
            position_ms: 90_000,  // 1:30
            ..Default::default()
        };
        assert_eq!(np.progress_formatted(), "1:30 / 3:33");
    }

    #[test]
    fn test_advance_clamps_and_respects_pause() {
        let mut np = NowPlaying {
            duration_ms: 1_000,
            position_ms: 900,
            is_playing: true,
            ..Default::default()
        };
        np.advance(500);
        assert_eq!(np.position_ms, 1_000);

        np.is_playing = false;
        np.position_ms = 100;
        np.advance(500);
        assert_eq!(np.position_ms, 100);
    }

    // ── Moods ────────────────────────────────────────────────────────────────

    #[test]
    fn test_preset_mood_query_is_lowercase() {
        assert_eq!(PresetMood::Energetic.query(), "energetic");
        assert_eq!(PresetMood::Energetic.to_string(), "Energetic");
    }

    // ── Play status classification ───────────────────────────────────────────

    #[test]
    fn test_classify_play_status() {
        use reqwest::StatusCode;
        assert_eq!(classify_play_status(StatusCode::NO_CONTENT), PlayOutcome::Started);
        assert_eq!(classify_play_status(StatusCode::OK), PlayOutcome::Started);
        assert_eq!(classify_play_status(StatusCode::UNAUTHORIZED), PlayOutcome::Unauthorized);
        assert_eq!(classify_play_status(StatusCode::FORBIDDEN), PlayOutcome::Forbidden);
        assert_eq!(
            classify_play_status(StatusCode::INTERNAL_SERVER_ERROR),
            PlayOutcome::Failed(500)
        );
    }

    // ── Snapshot parsing ─────────────────────────────────────────────────────

    #[test]
    fn test_snapshot_parses_defensively() {
        let body = serde_json::json!({
            "is_playing": true,
            "progress_ms": 1234,
            "item": {
                "id": "t1",
                "name": "Run",
                "duration_ms": 200000,
                "artists": [{ "name": "X" }],
                "album": { "name": "Y", "images": [] }
            }
        });
        let snap = snapshot_from_player_json(&body).unwrap();
        assert_eq!(snap.track_id.as_deref(), Some("t1"));
        assert_eq!(snap.name, "Run");
        assert_eq!(snap.artists, vec!["X".to_string()]);
        assert!(!snap.paused);
        assert_eq!(snap.position_ms, 1234);
        assert!(snap.image.is_none());
    }

    #[test]
    fn test_snapshot_null_item_is_none() {
        let body = serde_json::json!({ "is_playing": false, "item": null });
        assert!(snapshot_from_player_json(&body).is_none());
    }

    // ── Direct play: 401 / 403 contracts ─────────────────────────────────────

    #[tokio::test]
    async fn test_direct_play_retries_once_with_refreshed_token() {
        let api = Arc::new(FakeApi::default());
        api.queue_play(PlayOutcome::Unauthorized);
        api.queue_play(PlayOutcome::Started);
        api.queue_token(Ok(grant("refreshed", true)));

        let session = Session::default();
        session.set_token("stale".to_string(), None).await;

        let result = direct_play(api.clone(), session.clone(), "d1", "spotify:track:t1").await;
        assert_eq!(result, DirectPlayResult::Started);

        let calls = api.play_calls();
        assert_eq!(calls, vec!["stale".to_string(), "refreshed".to_string()]);
        assert_eq!(session.token().await.as_deref(), Some("refreshed"));
    }

    #[tokio::test]
    async fn test_direct_play_second_401_is_session_expired() {
        let api = Arc::new(FakeApi::default());
        api.queue_play(PlayOutcome::Unauthorized);
        api.queue_play(PlayOutcome::Unauthorized);
        api.queue_token(Ok(grant("refreshed", true)));

        let session = Session::default();
        session.set_token("stale".to_string(), None).await;

        let result = direct_play(api.clone(), session, "d1", "spotify:track:t1").await;
        assert_eq!(result, DirectPlayResult::SessionExpired);
        // Exactly one retry: two calls total, never a third.
        assert_eq!(api.play_calls().len(), 2);
    }

    #[tokio::test]
    async fn test_direct_play_403_means_premium_required() {
        let api = Arc::new(FakeApi::default());
        api.queue_play(PlayOutcome::Forbidden);

        let session = Session::default();
        session.set_token("tok".to_string(), None).await;

        let result = direct_play(api.clone(), session, "d1", "spotify:track:t1").await;
        assert_eq!(result, DirectPlayResult::PremiumRequired);
        assert_eq!(api.play_calls().len(), 1);
    }

    #[tokio::test]
    async fn test_premium_required_outcome_degrades_to_links_only() {
        let (mut sync, _rx, _api) = make_sync();
        sync.phase = SyncPhase::Ready { device_id: "d1".to_string() };
        sync.premium = true;

        sync.handle_outcome(SyncOutcome::DirectPlay {
            track_id: "t1".to_string(),
            result: DirectPlayResult::PremiumRequired,
        })
        .await;

        assert_eq!(sync.phase, SyncPhase::LinksOnly);
        assert!(!sync.premium);
    }

    // ── State machine ────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_ready_records_device_id() {
        let (mut sync, _rx, _api) = make_sync();
        sync.phase = SyncPhase::Acquiring;

        sync.handle_player_event(PlayerEvent::Ready { device_id: "dev-9".to_string() }).await;

        assert_eq!(sync.phase, SyncPhase::Ready { device_id: "dev-9".to_string() });
        assert_eq!(sync.session().device_id().await.as_deref(), Some("dev-9"));
    }

    #[tokio::test]
    async fn test_account_error_degrades_permanently() {
        let (mut sync, _rx, _api) = make_sync();
        sync.phase = SyncPhase::Ready { device_id: "d1".to_string() };
        sync.premium = true;

        sync.handle_player_event(PlayerEvent::AccountError { message: "no premium".to_string() })
            .await;
        assert_eq!(sync.phase, SyncPhase::LinksOnly);

        // A straggling ready event must not revive the player path.
        sync.handle_player_event(PlayerEvent::Ready { device_id: "d1".to_string() }).await;
        assert_eq!(sync.phase, SyncPhase::LinksOnly);
    }

    #[tokio::test]
    async fn test_null_state_clears_playback() {
        let (mut sync, _rx, _api) = make_sync();
        sync.phase = SyncPhase::Ready { device_id: "d1".to_string() };

        let snapshot = PlaybackSnapshot {
            track_id: Some("t1".to_string()),
            name: "Run".to_string(),
            paused: false,
            position_ms: 5_000,
            duration_ms: 100_000,
            ..Default::default()
        };
        sync.handle_player_event(PlayerEvent::StateChanged(Some(snapshot))).await;
        assert!(sync.is_playing());
        assert_eq!(sync.list.playing_track.as_deref(), Some("t1"));

        sync.handle_player_event(PlayerEvent::StateChanged(None)).await;
        assert!(!sync.is_playing());
        assert!(sync.now_playing.is_none());
        assert!(sync.list.playing_track.is_none());

        // Progress advance is a no-op once playback stopped.
        sync.tick(1_000);
        assert!(sync.now_playing.is_none());
    }

    #[tokio::test]
    async fn test_state_events_supersede_wholesale() {
        let (mut sync, _rx, _api) = make_sync();
        sync.phase = SyncPhase::Ready { device_id: "d1".to_string() };

        let first = PlaybackSnapshot {
            track_id: Some("t1".to_string()),
            name: "Run".to_string(),
            artists: vec!["X".to_string()],
            album: "Y".to_string(),
            paused: false,
            position_ms: 42_000,
            duration_ms: 100_000,
            ..Default::default()
        };
        sync.handle_player_event(PlayerEvent::StateChanged(Some(first))).await;

        // The second snapshot has no album/artists; nothing from the first
        // event may leak through.
        let second = PlaybackSnapshot {
            track_id: Some("t2".to_string()),
            name: "Walk".to_string(),
            paused: true,
            ..Default::default()
        };
        sync.handle_player_event(PlayerEvent::StateChanged(Some(second.clone()))).await;

        let np = sync.now_playing.clone().unwrap();
        assert_eq!(np, NowPlaying::from_snapshot(&second));
        assert_eq!(np.position_ms, 0);
        assert!(np.artists.is_empty());
    }

    #[tokio::test]
    async fn test_token_failure_stays_acquiring_without_auto_retry() {
        let (mut sync, _rx, _api) = make_sync();
        sync.phase = SyncPhase::Acquiring;

        sync.handle_outcome(SyncOutcome::TokenFetched(Err(ApiError::Status(
            reqwest::StatusCode::UNAUTHORIZED,
        ))))
        .await;

        assert_eq!(sync.phase, SyncPhase::Acquiring);
        let notices = sync.take_notices();
        assert!(notices.iter().any(|n| n.is_error));
    }

    #[tokio::test]
    async fn test_non_premium_grant_enters_links_only() {
        let (mut sync, _rx, _api) = make_sync();
        sync.phase = SyncPhase::Acquiring;

        sync.handle_outcome(SyncOutcome::TokenFetched(Ok(grant("tok", false)))).await;

        assert_eq!(sync.phase, SyncPhase::LinksOnly);
        assert!(!sync.needs_player());
    }

    #[tokio::test]
    async fn test_premium_grant_requests_capability() {
        let (mut sync, _rx, _api) = make_sync();
        sync.phase = SyncPhase::Acquiring;

        sync.handle_outcome(SyncOutcome::TokenFetched(Ok(grant("tok", true)))).await;

        assert_eq!(sync.phase, SyncPhase::Acquiring);
        assert!(sync.needs_player());
    }

    // ── Stale fetch responses ────────────────────────────────────────────────

    #[tokio::test]
    async fn test_stale_recommendation_response_discarded() {
        let (mut sync, _rx, _api) = make_sync();

        sync.select_filter(0); // generation 1 ("Happy")
        sync.select_filter(3); // generation 2 ("Energetic")

        // The older response resolves late; it must never render.
        sync.handle_outcome(SyncOutcome::Recommendations {
            generation: 1,
            label: "Happy".to_string(),
            result: Ok(vec![card("old", "Stale Song")]),
        })
        .await;
        assert!(sync.list.tracks.is_empty());
        assert!(sync.list.is_loading);

        sync.handle_outcome(SyncOutcome::Recommendations {
            generation: 2,
            label: "Energetic".to_string(),
            result: Ok(vec![card("t1", "Run")]),
        })
        .await;
        assert_eq!(sync.list.tracks.len(), 1);
        assert_eq!(sync.list.tracks[0].name, "Run");
        assert_eq!(sync.list.mood_label, "Energetic");
        assert!(!sync.list.is_loading);
    }

    #[tokio::test]
    async fn test_fetch_error_renders_inline_message() {
        let (mut sync, _rx, _api) = make_sync();
        sync.select_filter(1); // generation 1

        sync.handle_outcome(SyncOutcome::Recommendations {
            generation: 1,
            label: "Sad".to_string(),
            result: Err(ApiError::Status(reqwest::StatusCode::BAD_GATEWAY)),
        })
        .await;

        assert!(!sync.list.is_loading);
        assert!(sync.list.error.is_some());
    }

    // ── Transport: one command in flight ─────────────────────────────────────

    #[tokio::test]
    async fn test_transport_disabled_while_in_flight() {
        let (mut sync, mut rx, _api) = make_sync();
        let capability = Arc::new(FakeCapability::default());
        sync.attach_player(capability.clone());
        sync.phase = SyncPhase::Ready { device_id: "d1".to_string() };

        sync.transport(TransportCommand::TogglePlay);
        sync.transport(TransportCommand::TogglePlay); // ignored: control disabled

        let outcome = rx.recv().await.unwrap();
        assert!(matches!(outcome, SyncOutcome::Transport { .. }));
        assert_eq!(capability.toggle_calls.load(Ordering::SeqCst), 1);

        // Completion re-enables the control.
        sync.handle_outcome(outcome).await;
        sync.transport(TransportCommand::TogglePlay);
        let _ = rx.recv().await.unwrap();
        assert_eq!(capability.toggle_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_transport_ignored_outside_ready() {
        let (mut sync, _rx, _api) = make_sync();
        let capability = Arc::new(FakeCapability::default());
        sync.attach_player(capability.clone());
        sync.phase = SyncPhase::Disconnected;

        sync.transport(TransportCommand::Next);
        tokio::task::yield_now().await;
        assert_eq!(capability.next_calls.load(Ordering::SeqCst), 0);
    }
}
