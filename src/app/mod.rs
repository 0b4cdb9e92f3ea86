pub mod state;

use anyhow::Result;
use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use std::{sync::Arc, time::Duration};
use tokio::{sync::mpsc, time};
use tracing::info;

use crate::{
    api::{HttpApi, MusicApi},
    app::state::{ActiveScreen, AppState, Notification},
    config::Config,
    events::{map_key_to_action, UserAction},
    player::{connect::ConnectPlayer, PlayerEvent},
    sync::{SessionTokens, SyncOutcome, Synchronizer, TransportCommand},
};

const TICK_MS: u64 = 80; // UI tick (animations, progress advance)

pub struct App {
    pub state: AppState,
    config: Config,
}

impl App {
    pub fn new(config: Config) -> Self {
        App { state: AppState::default(), config }
    }

    pub async fn run<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut ratatui::Terminal<B>,
    ) -> Result<()> {
        let api: Arc<dyn MusicApi> =
            Arc::new(HttpApi::new(self.config.server_url.clone(), self.config.player_api_url.clone()));

        // ── Channels: spawned work and player events feed the loop ───────
        let (outcome_tx, mut outcome_rx) = mpsc::channel::<SyncOutcome>(16);
        let (player_tx, mut player_rx) = mpsc::channel::<PlayerEvent>(16);

        let mut sync = Synchronizer::new(api.clone(), outcome_tx);
        sync.bootstrap();
        info!("Requesting session token from {}", self.config.server_url);

        // ── Main event loop ──────────────────────────────────────────────
        let mut tick_interval = time::interval(Duration::from_millis(TICK_MS));
        let mut event_stream = EventStream::new();

        loop {
            terminal.draw(|f| crate::ui::render(f, &self.state, &sync))?;

            tokio::select! {
                _ = tick_interval.tick() => {
                    self.state.update_eq_bars(sync.is_playing());
                    let title_len = sync.now_playing.as_ref().map(|np| np.name.len()).unwrap_or(1);
                    self.state.tick_ticker(title_len);
                    self.state.tick_notification();
                    sync.tick(TICK_MS);
                }
                Some(outcome) = outcome_rx.recv() => {
                    sync.handle_outcome(outcome).await;
                }
                Some(event) = player_rx.recv() => {
                    sync.handle_player_event(event).await;
                }
                maybe_event = event_stream.next() => {
                    if let Some(Ok(Event::Key(key))) = maybe_event {
                        let typing = self.state.active_screen == ActiveScreen::MoodInput
                            && !self.state.show_help;
                        if let Some(action) = map_key_to_action(key, typing) {
                            self.handle_action(action, &mut sync);
                        }
                    }
                }
            }

            // A premium grant arrived but no capability is bound yet.
            if sync.needs_player() {
                let tokens = Arc::new(SessionTokens::new(sync.session(), api.clone()));
                let player =
                    ConnectPlayer::new(self.config.player_api_url.clone(), tokens, player_tx.clone());
                sync.attach_player(Arc::new(player));
            }

            for notice in sync.take_notices() {
                let n = if notice.is_error {
                    Notification::error(notice.message)
                } else {
                    Notification::info(notice.message)
                };
                self.state.set_notification(n);
            }

            if self.state.should_quit {
                break;
            }
        }

        Ok(())
    }

    // ── Action handler ───────────────────────────────────────────────────
    fn handle_action(&mut self, action: UserAction, sync: &mut Synchronizer) {
        match action {
            UserAction::Quit => {
                self.state.should_quit = true;
            }
            UserAction::ToggleHelp => {
                self.state.show_help = !self.state.show_help;
            }
            UserAction::Back => {
                if self.state.show_help {
                    self.state.show_help = false;
                } else if self.state.active_screen == ActiveScreen::MoodInput
                    && !sync.list.tracks.is_empty()
                {
                    self.state.active_screen = ActiveScreen::Tracks;
                }
            }
            UserAction::Input(c) => self.state.mood_input.push_char(c),
            UserAction::Backspace => self.state.mood_input.backspace(),
            UserAction::PillPrev => self.state.mood_input.select_prev_pill(),
            UserAction::PillNext => self.state.mood_input.select_next_pill(),
            UserAction::PillApply => self.state.mood_input.apply_selected_pill(),
            UserAction::SubmitMood => {
                if let Some(text) = self.state.mood_input.submit() {
                    self.state.active_screen = ActiveScreen::Tracks;
                    sync.submit_mood(text);
                }
            }
            UserAction::NavigateUp => sync.list.select_prev(),
            UserAction::NavigateDown => sync.list.select_next(),
            UserAction::SelectFilter(n) => sync.select_filter(n.saturating_sub(1) as usize),
            UserAction::PlaySelected => sync.play_selected(),
            UserAction::OpenSelected => sync.open_selected(),
            UserAction::GoMoodInput => {
                self.state.active_screen = ActiveScreen::MoodInput;
            }
            UserAction::RetryConnect => sync.retry(),
            UserAction::TogglePlay => sync.transport(TransportCommand::TogglePlay),
            UserAction::NextTrack => sync.transport(TransportCommand::Next),
            UserAction::PrevTrack => sync.transport(TransportCommand::Previous),
            UserAction::SeekForward => sync.transport(TransportCommand::SeekForward),
            UserAction::SeekBackward => sync.transport(TransportCommand::SeekBackward),
        }
    }
}
