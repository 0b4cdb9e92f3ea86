use ratatui::style::{Color, Modifier, Style};

// ─── Color Palette ───────────────────────────────────────────────────────────
pub const BG:          Color = Color::Rgb(16,  14,  20);
pub const BG_ALT:      Color = Color::Rgb(24,  21,  32);
pub const SURFACE:     Color = Color::Rgb(32,  28,  44);
pub const SURFACE_SEL: Color = Color::Rgb(52,  40,  66);

pub const PRIMARY:     Color = Color::Rgb(186, 104, 200); // orchid
pub const ACCENT:      Color = Color::Rgb(77,  208, 225); // aqua
pub const CORAL:       Color = Color::Rgb(255, 138, 101); // warm coral
pub const MINT:        Color = Color::Rgb(105, 240, 174); // playing/ok

pub const TEXT:        Color = Color::Rgb(226, 222, 235);
pub const TEXT_DIM:    Color = Color::Rgb(148, 142, 165);
pub const TEXT_MUTED:  Color = Color::Rgb(88,  82,  105);

pub const BORDER:      Color = Color::Rgb(56,  48,  78);
pub const BORDER_FOCUSED: Color = PRIMARY;

pub const ERROR:       Color = Color::Rgb(255, 95,  95);

// ─── Styles ──────────────────────────────────────────────────────────────────
pub fn title_style() -> Style {
    Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD)
}

pub fn accent_style() -> Style {
    Style::default().fg(ACCENT)
}

pub fn selected_style() -> Style {
    Style::default()
        .bg(SURFACE_SEL)
        .fg(ACCENT)
        .add_modifier(Modifier::BOLD)
}

pub fn normal_style() -> Style {
    Style::default().fg(TEXT)
}

pub fn dim_style() -> Style {
    Style::default().fg(TEXT_DIM)
}

pub fn muted_style() -> Style {
    Style::default().fg(TEXT_MUTED)
}

pub fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(BORDER_FOCUSED)
    } else {
        Style::default().fg(BORDER)
    }
}

pub fn playing_style() -> Style {
    Style::default().fg(MINT).add_modifier(Modifier::BOLD)
}

pub fn coral_style() -> Style {
    Style::default().fg(CORAL).add_modifier(Modifier::BOLD)
}

pub fn error_style() -> Style {
    Style::default().fg(ERROR).add_modifier(Modifier::BOLD)
}

pub fn header_style() -> Style {
    Style::default()
        .fg(BG)
        .bg(PRIMARY)
        .add_modifier(Modifier::BOLD)
}
