pub mod components;
pub mod theme;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::state::{ActiveScreen, AppState};
use crate::sync::{SyncPhase, Synchronizer};
use self::components::{
    help::render_help,
    mood_screen::render_mood_screen,
    player_bar::render_player_bar,
    tracks_screen::render_tracks,
};
use self::theme::*;

/// Root render function — called every frame
pub fn render(f: &mut Frame, state: &AppState, sync: &Synchronizer) {
    let size = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Min(0),    // active screen
            Constraint::Length(5), // player bar
        ])
        .split(size);

    render_header(f, chunks[0], sync);

    match &state.active_screen {
        ActiveScreen::MoodInput => render_mood_screen(f, chunks[1], state),
        ActiveScreen::Tracks => render_tracks(f, chunks[1], state, sync),
    }

    render_player_bar(f, chunks[2], state, sync);

    if state.show_help {
        render_help(f, size);
    }

    if let Some(ref notif) = state.notification {
        render_notification(f, size, notif.is_error, &notif.message);
    }
}

fn render_header(f: &mut Frame, area: Rect, sync: &Synchronizer) {
    let (badge, badge_style) = match &sync.phase {
        SyncPhase::Unbound | SyncPhase::Acquiring => ("connecting", dim_style()),
        SyncPhase::Ready { .. } => ("ready", playing_style()),
        SyncPhase::Disconnected => ("offline", error_style()),
        SyncPhase::LinksOnly => ("link-only", coral_style()),
    };

    let line = Line::from(vec![
        Span::styled(" ♪ moodify ", header_style()),
        Span::styled(format!("  {badge}  "), badge_style),
        Span::styled("m mood · 1-6 filters · ? help", muted_style()),
    ]);
    f.render_widget(Paragraph::new(line).alignment(Alignment::Left), area);
}

fn render_notification(f: &mut Frame, area: Rect, is_error: bool, message: &str) {
    let toast_width = message.len().min(60) as u16 + 4;
    let toast_area = Rect {
        x: area.width.saturating_sub(toast_width + 2),
        y: area.height.saturating_sub(8),
        width: toast_width,
        height: 3,
    };

    f.render_widget(Clear, toast_area);

    let style = if is_error { error_style() } else { playing_style() };
    let icon = if is_error { "✖ " } else { "✔ " };

    let para = Paragraph::new(Line::from(vec![
        Span::styled(icon, style),
        Span::styled(message.to_string(), style),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(style),
    )
    .alignment(Alignment::Left);

    f.render_widget(para, toast_area);
}

pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vert[1])[1]
}
