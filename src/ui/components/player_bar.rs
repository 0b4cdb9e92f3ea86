use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Gauge, Paragraph},
    Frame,
};

use crate::app::state::AppState;
use crate::sync::{SyncPhase, Synchronizer};
use super::super::theme::*;

/// Block characters for the single-row equalizer (8 levels)
const BAR_BLOCKS: &[&str] = &[" ", "▁", "▂", "▃", "▄", "▅", "▆", "▇", "█"];

pub fn render_player_bar(f: &mut Frame, area: Rect, state: &AppState, sync: &Synchronizer) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style(true))
        .style(normal_style());

    let inner = block.inner(area);
    f.render_widget(block, area);

    match &sync.phase {
        SyncPhase::LinksOnly => {
            let msg = Paragraph::new(vec![
                Line::from(Span::styled(
                    "Spotify Premium required for in-app playback.",
                    dim_style(),
                )),
                Line::from(Span::styled(
                    "Press Enter on any track to open it in Spotify.",
                    muted_style(),
                )),
            ])
            .alignment(Alignment::Center);
            f.render_widget(msg, inner);
        }
        SyncPhase::Unbound | SyncPhase::Acquiring => {
            let msg = Paragraph::new(Line::from(Span::styled(
                "Connecting to player…",
                dim_style(),
            )))
            .alignment(Alignment::Center);
            f.render_widget(msg, inner);
        }
        SyncPhase::Disconnected => {
            let msg = Paragraph::new(Line::from(Span::styled(
                "Player disconnected — press R to reconnect",
                error_style(),
            )))
            .alignment(Alignment::Center);
            f.render_widget(msg, inner);
        }
        SyncPhase::Ready { .. } => render_transport(f, inner, state, sync),
    }
}

fn render_transport(f: &mut Frame, area: Rect, state: &AppState, sync: &Synchronizer) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(30), // track info
            Constraint::Percentage(45), // EQ + progress
            Constraint::Percentage(25), // controls
        ])
        .split(area);

    render_track_info(f, chunks[0], state, sync);

    // ── Center: EQ + progress ────────────────────────────────────────────
    let center = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // EQ bars
            Constraint::Length(1), // progress gauge
            Constraint::Min(0),    // time label
        ])
        .split(chunks[1]);

    let eq_spans: Vec<Span> = state
        .eq_bars
        .iter()
        .map(|&h| {
            let ch = BAR_BLOCKS[(h as usize).clamp(0, 8)];
            let color = if h >= 9 { CORAL } else if h >= 6 { PRIMARY } else { ACCENT };
            Span::styled(ch, ratatui::style::Style::default().fg(color))
        })
        .collect();
    f.render_widget(
        Paragraph::new(Line::from(eq_spans)).alignment(Alignment::Center),
        center[0],
    );

    let (percent, time_label) = match &sync.now_playing {
        Some(np) => ((np.progress_percent() * 100.0) as u16, np.progress_formatted()),
        None => (0, "-:-- / -:--".to_string()),
    };
    let gauge = Gauge::default()
        .gauge_style(ratatui::style::Style::default().fg(PRIMARY).bg(SURFACE))
        .percent(percent)
        .label("");
    f.render_widget(gauge, center[1]);

    f.render_widget(
        Paragraph::new(Line::from(Span::styled(time_label, dim_style()))).alignment(Alignment::Center),
        center[2],
    );

    // ── Controls ─────────────────────────────────────────────────────────
    // Dimmed entirely while a command is in flight (controls disabled).
    let hint_style = if sync.transport_pending() { muted_style() } else { dim_style() };
    let controls = Paragraph::new(vec![
        Line::from(Span::styled("⏮ p  ⏯ spc  ⏭ n", hint_style)),
        Line::from(Span::styled("f/r seek   ? help", muted_style())),
    ])
    .alignment(Alignment::Right);
    f.render_widget(controls, chunks[2]);
}

fn render_track_info(f: &mut Frame, area: Rect, state: &AppState, sync: &Synchronizer) {
    let Some(np) = &sync.now_playing else {
        let idle = Paragraph::new(vec![
            Line::from(Span::styled("⏸ Nothing playing", dim_style())),
            Line::from(Span::styled("Pick a track and press Enter", muted_style())),
        ]);
        f.render_widget(idle, area);
        return;
    };

    let play_icon = if np.is_playing { "▶" } else { "⏸" };
    let art = if np.image.is_some() { "◉" } else { "♪" };
    let title = state.display_title(&np.name, area.width.saturating_sub(6) as usize);
    let artists = np.artists.join(", ");

    let mut lines = vec![
        Line::from(vec![
            Span::styled(format!("{play_icon} "), playing_style()),
            Span::styled(format!("{art} "), accent_style()),
            Span::styled(title, normal_style().add_modifier(ratatui::style::Modifier::BOLD)),
        ]),
        Line::from(Span::styled(
            if artists.is_empty() { "—".to_string() } else { artists },
            dim_style(),
        )),
    ];
    if area.height >= 3 && !np.album.is_empty() {
        lines.push(Line::from(Span::styled(format!("💿 {}", np.album), muted_style())));
    }

    f.render_widget(Paragraph::new(lines).alignment(Alignment::Left), area);
}
