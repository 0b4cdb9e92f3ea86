use crate::assistant::MoodInput;

#[derive(Debug, Clone, PartialEq)]
pub enum ActiveScreen {
    MoodInput,
    Tracks,
}

impl Default for ActiveScreen {
    fn default() -> Self {
        ActiveScreen::MoodInput
    }
}

#[derive(Debug, Clone, Default)]
pub struct Notification {
    pub message: String,
    pub remaining_ticks: u8,
    pub is_error: bool,
}

impl Notification {
    pub fn info(msg: impl Into<String>) -> Self {
        Notification { message: msg.into(), remaining_ticks: 30, is_error: false }
    }
    pub fn error(msg: impl Into<String>) -> Self {
        Notification { message: msg.into(), remaining_ticks: 40, is_error: true }
    }
}

pub struct AppState {
    pub active_screen: ActiveScreen,
    pub mood_input: MoodInput,
    pub notification: Option<Notification>,
    pub show_help: bool,
    pub should_quit: bool,
    pub eq_bars: [u8; 24],
    pub eq_tick: u64,
    pub ticker_offset: usize,
    pub ticker_tick: u64,
}

impl Default for AppState {
    fn default() -> Self {
        AppState {
            active_screen: ActiveScreen::MoodInput,
            mood_input: MoodInput::default(),
            notification: None,
            show_help: false,
            should_quit: false,
            eq_bars: [4, 6, 8, 5, 7, 9, 4, 6, 8, 5, 7, 6, 4, 8, 5, 7, 9, 3, 6, 8, 5, 7, 4, 6],
            eq_tick: 0,
            ticker_offset: 0,
            ticker_tick: 0,
        }
    }
}

impl AppState {
    pub fn set_notification(&mut self, n: Notification) {
        self.notification = Some(n);
    }

    pub fn tick_notification(&mut self) {
        if let Some(ref mut n) = self.notification {
            if n.remaining_ticks > 0 {
                n.remaining_ticks -= 1;
            } else {
                self.notification = None;
            }
        }
    }

    pub fn update_eq_bars(&mut self, playing: bool) {
        use rand::Rng;
        let mut rng = rand::thread_rng();
        self.eq_tick += 1;
        if playing {
            for bar in self.eq_bars.iter_mut() {
                let delta: i8 = rng.gen_range(-3..=3);
                *bar = (*bar as i8 + delta).clamp(1, 12) as u8;
            }
        } else {
            for bar in self.eq_bars.iter_mut() {
                if *bar > 1 {
                    *bar -= 1;
                }
            }
        }
    }

    pub fn tick_ticker(&mut self, title_len: usize) {
        self.ticker_tick += 1;
        if self.ticker_tick % 5 == 0 {
            self.ticker_offset = (self.ticker_offset + 1) % title_len.max(1);
        }
    }

    /// Marquee view of a long title: short titles pass through, long ones
    /// scroll with the ticker offset.
    pub fn display_title(&self, title: &str, max_width: usize) -> String {
        if title.len() <= max_width {
            return title.to_string();
        }
        let padded = format!("{title}   ");
        let chars: Vec<char> = padded.chars().collect();
        let offset = self.ticker_offset % chars.len();
        chars[offset..]
            .iter()
            .chain(chars[..offset].iter())
            .take(max_width)
            .collect()
    }
}
