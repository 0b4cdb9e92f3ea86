use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::app::state::AppState;
use crate::sync::{SyncPhase, Synchronizer};
use super::super::theme::*;

pub fn render_tracks(f: &mut Frame, area: Rect, _state: &AppState, sync: &Synchronizer) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // mood filter bar
            Constraint::Min(0),    // track cards
        ])
        .split(area);

    render_filter_bar(f, chunks[0], sync);
    render_track_list(f, chunks[1], sync);
}

fn render_filter_bar(f: &mut Frame, area: Rect, sync: &Synchronizer) {
    let mut spans: Vec<Span> = vec![Span::styled(" ", muted_style())];
    for (i, filter) in sync.list.filters.iter().enumerate() {
        let is_active = i == sync.list.active_filter;
        let mut label = filter.label();
        if label.len() > 18 {
            label.truncate(18);
            label.push('…');
        }
        spans.push(Span::styled(
            format!("[{}] ", i + 1),
            if is_active { coral_style() } else { muted_style() },
        ));
        spans.push(Span::styled(
            label,
            if is_active { selected_style() } else { dim_style() },
        ));
        spans.push(Span::styled("   ", muted_style()));
    }

    let bar = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .title(Span::styled(" Refine your mood ", title_style()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style(false))
            .style(normal_style()),
    );
    f.render_widget(bar, area);
}

fn render_track_list(f: &mut Frame, area: Rect, sync: &Synchronizer) {
    let title = if sync.list.mood_label.is_empty() {
        " Recommendations ".to_string()
    } else {
        format!(" Mood: {} ({}) ", sync.list.mood_label, sync.list.tracks.len())
    };

    // Inline error replaces the list entirely.
    if let Some(ref error) = sync.list.error {
        let para = Paragraph::new(Line::from(Span::styled(format!("  {error}"), error_style())))
            .block(make_block(&title, false));
        f.render_widget(para, area);
        return;
    }

    if sync.list.is_loading && sync.list.tracks.is_empty() {
        let para = Paragraph::new(Line::from(Span::styled(
            "  Finding tracks for your mood...",
            dim_style(),
        )))
        .block(make_block(&title, false));
        f.render_widget(para, area);
        return;
    }

    if sync.list.tracks.is_empty() {
        let para = Paragraph::new(vec![
            Line::from(Span::styled("  No tracks found for this mood.", muted_style())),
            Line::from(Span::styled("  Try another mood.", dim_style())),
        ])
        .block(make_block(&title, false));
        f.render_widget(para, area);
        return;
    }

    // While a newer fetch is in flight the current list stays visible but
    // deemphasized and non-interactive.
    let loading = sync.list.is_loading;
    let links_only = sync.phase == SyncPhase::LinksOnly || !sync.premium;

    let items: Vec<ListItem> = sync
        .list
        .tracks
        .iter()
        .enumerate()
        .map(|(i, track)| {
            let is_sel = !loading && i == sync.list.selected;
            let is_playing = sync.list.playing_track.as_deref() == Some(track.id.as_str());
            let is_pending = sync.list.pending_track.as_deref() == Some(track.id.as_str());

            // Musical-note placeholder when the card has no artwork.
            let art = if track.image.is_some() { "◉ " } else { "♪ " };
            let marker = if is_pending {
                Span::styled("… ", coral_style())
            } else if is_playing {
                Span::styled("▶ ", playing_style())
            } else {
                Span::styled(format!("{:>2}. ", i + 1), muted_style())
            };

            let action = if is_pending {
                "loading…"
            } else if links_only {
                "↗ open"
            } else {
                ""
            };

            let base = if loading { muted_style() } else { normal_style() };
            let line = Line::from(vec![
                marker,
                Span::styled(art, if loading { muted_style() } else { accent_style() }),
                Span::styled(track.name.clone(), if is_sel { selected_style() } else { base }),
                Span::styled(" — ", muted_style()),
                Span::styled(track.artist.clone(), if loading { muted_style() } else { dim_style() }),
                Span::styled(format!("  {}", track.album), muted_style()),
                Span::styled(format!("  {action}"), muted_style()),
            ]);
            if is_sel {
                ListItem::new(line).style(selected_style())
            } else {
                ListItem::new(line)
            }
        })
        .collect();

    let list_title = if loading {
        format!("{title}· loading ")
    } else {
        title
    };
    let list = List::new(items).block(make_block(&list_title, !loading));
    f.render_widget(list, area);
}

fn make_block(title: &str, focused: bool) -> Block<'static> {
    Block::default()
        .title(Span::styled(title.to_string(), title_style()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style(focused))
        .style(normal_style().bg(BG))
}
