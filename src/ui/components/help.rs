use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use super::super::theme::*;

pub fn render_help(f: &mut Frame, area: Rect) {
    let popup_area = crate::ui::centered_rect(60, 80, area);
    f.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(Span::styled(" ❓ Keybindings ", title_style()))
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(border_style(true))
        .style(normal_style());

    let inner = block.inner(popup_area);
    f.render_widget(block, popup_area);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .margin(1)
        .split(inner);

    let left = vec![
        Line::from(Span::styled("  Mood input", coral_style())),
        Line::from(Span::raw("")),
        key_line("↑ / ↓", "Pick a suggestion"),
        key_line("Tab", "Apply suggestion"),
        key_line("Enter", "Get recommendations"),
        key_line("Esc", "Back to tracks"),
        Line::from(Span::raw("")),
        Line::from(Span::styled("  Tracks", coral_style())),
        Line::from(Span::raw("")),
        key_line("↑ / k", "Move up"),
        key_line("↓ / j", "Move down"),
        key_line("Enter", "Play track"),
        key_line("o", "Open in Spotify"),
        key_line("1-6", "Mood filter"),
        key_line("m", "Back to mood input"),
    ];

    let right = vec![
        Line::from(Span::styled("  Playback", coral_style())),
        Line::from(Span::raw("")),
        key_line("Space", "Pause / Resume"),
        key_line("n", "Next track"),
        key_line("p", "Previous track"),
        key_line("f", "Seek forward"),
        key_line("r", "Seek backward"),
        Line::from(Span::raw("")),
        Line::from(Span::styled("  Session", coral_style())),
        Line::from(Span::raw("")),
        key_line("R", "Retry connection"),
        key_line("?", "Toggle this help"),
        key_line("q", "Quit"),
    ];

    f.render_widget(Paragraph::new(left), cols[0]);
    f.render_widget(Paragraph::new(right), cols[1]);
}

fn key_line(key: &str, desc: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled("  ", muted_style()),
        Span::styled(format!("{key:<10}"), accent_style()),
        Span::styled(desc.to_string(), normal_style()),
    ])
}
