use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::app::state::AppState;
use crate::assistant::{pill_label, SUGGESTIONS};
use super::super::theme::*;

pub fn render_mood_screen(f: &mut Frame, area: Rect, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // error banner
            Constraint::Length(5), // mood input
            Constraint::Length(8), // suggestion pills
            Constraint::Min(0),    // hint
        ])
        .margin(1)
        .split(area);

    render_error_banner(f, chunks[0], state);
    render_input(f, chunks[1], state);
    render_pills(f, chunks[2], state);
    render_hint(f, chunks[3]);
}

fn render_error_banner(f: &mut Frame, area: Rect, state: &AppState) {
    if let Some(ref error) = state.mood_input.error {
        let banner = Paragraph::new(Line::from(vec![
            Span::styled("  ✖ ", error_style()),
            Span::styled(error.clone(), error_style()),
        ]));
        f.render_widget(banner, area);
    }
}

fn render_input(f: &mut Frame, area: Rect, state: &AppState) {
    let cursor = if (state.eq_tick / 5) % 2 == 0 { "│" } else { "" };
    let border = if state.mood_input.invalid {
        error_style()
    } else {
        border_style(true)
    };
    let input_block = Block::default()
        .title(Span::styled(" How are you feeling? ", title_style()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border)
        .style(normal_style().bg(BG_ALT));

    let input_text = Paragraph::new(Line::from(vec![
        Span::styled(" ", muted_style()),
        Span::styled(state.mood_input.buffer.clone(), accent_style()),
        Span::styled(cursor, coral_style()),
    ]))
    .wrap(Wrap { trim: false })
    .block(input_block);
    f.render_widget(input_text, area);
}

fn render_pills(f: &mut Frame, area: Rect, state: &AppState) {
    let items: Vec<ListItem> = SUGGESTIONS
        .iter()
        .enumerate()
        .map(|(i, suggestion)| {
            let is_sel = i == state.mood_input.selected_pill;
            let marker = if is_sel { "▶ " } else { "  " };
            let line = Line::from(vec![
                Span::styled(marker, if is_sel { playing_style() } else { muted_style() }),
                Span::styled(
                    format!("( {} )", pill_label(suggestion)),
                    if is_sel { selected_style() } else { dim_style() },
                ),
            ]);
            ListItem::new(line)
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title(Span::styled(" Try these ", title_style()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style(false))
            .style(normal_style()),
    );
    f.render_widget(list, area);
}

fn render_hint(f: &mut Frame, area: Rect) {
    let hint = Paragraph::new(vec![
        Line::from(Span::raw("")),
        Line::from(Span::styled(
            "  Type how you feel, or pick a suggestion with ↑/↓ and Tab.",
            dim_style(),
        )),
        Line::from(Span::styled(
            "  Enter fetches recommendations for your mood.",
            dim_style(),
        )),
    ]);
    f.render_widget(hint, area);
}
