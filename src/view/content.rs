//! Main content area rendering (artist, album and track results)

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, ListItem, Padding, Paragraph},
    Frame,
};

use crate::model::{
    Album, Artist, ContentState, ContentView, Track, UiState, ActiveSection,
    group_tracks_by_disc, visible_rows,
};
use super::utils::{
    format_duration, format_minutes, release_date_label, render_scrollable_list,
    truncate_string,
};

pub fn render_main_content(
    frame: &mut Frame,
    area: Rect,
    ui_state: &UiState,
    content_state: &ContentState,
) {
    let is_focused = ui_state.active_section == ActiveSection::Results;
    let border_style = if is_focused {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    };

    if content_state.is_loading {
        let loading = Paragraph::new("Searching...")
            .style(Style::default().fg(Color::Yellow))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Results ")
                    .border_style(border_style),
            );
        frame.render_widget(loading, area);
        return;
    }

    let (title, empty_message) = match &content_state.view {
        ContentView::Empty => {
            let hint = Paragraph::new(
                "Type a search term, pick a type and press Enter\n\n\
                 Use Tab to move between controls\n\
                 Use ↑/↓ to select results, Enter to open",
            )
            .style(Style::default().fg(Color::DarkGray))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Results ")
                    .padding(Padding::horizontal(1))
                    .border_style(border_style),
            );
            frame.render_widget(hint, area);
            return;
        }
        ContentView::Artists { .. } => (" Artists ", "No artists found."),
        ContentView::Albums { .. } => (" Albums ", "No albums found."),
        ContentView::Tracks { .. } => (" Tracks ", "No tracks found."),
    };

    let texts = content_block_texts(&content_state.view, &content_state.display_order);
    if texts.is_empty() {
        let empty = Paragraph::new(empty_message)
            .style(Style::default().fg(Color::DarkGray))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(title)
                    .padding(Padding::horizontal(1))
                    .border_style(border_style),
            );
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = texts
        .into_iter()
        .enumerate()
        .map(|(i, text)| {
            let style = if is_focused && i == content_state.selected {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else if i == content_state.selected {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(text).style(style)
        })
        .collect();

    render_scrollable_list(
        frame,
        area,
        items,
        content_state.selected,
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .padding(Padding::horizontal(1))
            .border_style(border_style),
    );
}

/// One text block per selectable row, aligned with [`visible_rows`] so the
/// selection index addresses the matching block.
pub(crate) fn content_block_texts(
    view: &ContentView,
    display_order: &[usize],
) -> Vec<Text<'static>> {
    let rows = visible_rows(view, display_order);
    let mut texts = Vec::with_capacity(rows.len());

    match view {
        ContentView::Empty => {}
        ContentView::Artists {
            artists,
            expanded,
            album_tracks,
        } => {
            for row in rows {
                match row {
                    crate::model::Row::Artist { artist } => {
                        if let Some(data) = artists.get(artist) {
                            texts.push(artist_text(data, expanded.contains(&artist)));
                        }
                    }
                    crate::model::Row::ArtistAlbum { artist, album } => {
                        if let Some(data) =
                            artists.get(artist).and_then(|a| a.albums.get(album))
                        {
                            texts.push(artist_album_text(
                                data,
                                album_tracks.get(&(artist, album)).map(Vec::as_slice),
                            ));
                        }
                    }
                    _ => {}
                }
            }
        }
        ContentView::Albums { albums } => {
            for &album_idx in display_order {
                if let Some(album) = albums.get(album_idx) {
                    texts.push(album_block_text(album));
                }
            }
        }
        ContentView::Tracks { tracks } => {
            for &track_idx in display_order {
                if let Some(track) = tracks.get(track_idx) {
                    texts.push(track_card_text(track));
                }
            }
        }
    }
    texts
}

fn marker(expanded: bool) -> &'static str {
    if expanded { "▾" } else { "▸" }
}

fn artist_text(artist: &Artist, expanded: bool) -> Text<'static> {
    let mut lines = vec![Line::from(vec![
        Span::raw(format!("{} ", marker(expanded))),
        Span::styled(
            artist.name.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  ({} albums)", artist.albums.len()),
            Style::default().fg(Color::DarkGray),
        ),
    ])];
    if expanded && artist.albums.is_empty() {
        lines.push(Line::from(Span::styled(
            "    No albums found for this artist.",
            Style::default().fg(Color::DarkGray),
        )));
    }
    Text::from(lines)
}

fn artist_album_text(album: &Album, fetched_tracks: Option<&[Track]>) -> Text<'static> {
    let expanded = fetched_tracks.is_some();
    let mut lines = vec![
        Line::from(vec![
            Span::raw(format!("  {} ", marker(expanded))),
            Span::raw(album.title.clone()),
        ]),
        Line::from(Span::styled(
            format!("      Release Date: {}", release_date_label(&album.release_date)),
            Style::default().fg(Color::DarkGray),
        )),
    ];

    if let Some(tracks) = fetched_tracks {
        if tracks.is_empty() {
            lines.push(Line::from(Span::styled(
                "      No tracks found for this album.",
                Style::default().fg(Color::DarkGray),
            )));
        } else {
            for track in tracks {
                let mut spans = vec![Span::raw(format!(
                    "      {}. {} ({})",
                    track.number,
                    track.name,
                    format_minutes(track.time_millis)
                ))];
                if track.preview_url.is_some() {
                    spans.push(Span::styled(
                        "  ♫ preview",
                        Style::default().fg(Color::Cyan),
                    ));
                }
                lines.push(Line::from(spans));
            }
        }
    }
    Text::from(lines)
}

fn album_block_text(album: &Album) -> Text<'static> {
    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                album.title.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  by {}", album.artist_name),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        Line::from(Span::styled(
            format!("  Genre: {}", album.genre),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    if !album.image_url.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("  Artwork: {}", truncate_string(&album.image_url, 70)),
            Style::default().fg(Color::DarkGray),
        )));
    }

    for group in group_tracks_by_disc(&album.tracks) {
        lines.push(Line::from(Span::styled(
            format!("  Disc {}", group.disc),
            Style::default().add_modifier(Modifier::ITALIC),
        )));
        for track in group.tracks {
            let mut spans = vec![Span::raw(format!(
                "   {:>2}  {}  {}",
                track.number,
                track.name,
                format_duration(track.time_millis)
            ))];
            if track.preview_url.is_some() {
                spans.push(Span::styled(
                    "  ♫ preview",
                    Style::default().fg(Color::Cyan),
                ));
            }
            lines.push(Line::from(spans));
        }
    }
    lines.push(Line::raw(""));
    Text::from(lines)
}

fn track_card_text(track: &Track) -> Text<'static> {
    let mut lines = vec![
        Line::from(Span::styled(
            track.name.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::raw(format!("  Artist: {}", track.artist_name)),
        Line::raw(format!("  Album: {}", track.album_name)),
        Line::raw(format!("  Genre: {}", track.genre)),
        Line::raw(format!("  Duration: {}", format_duration(track.time_millis))),
    ];
    if let Some(url) = &track.preview_url {
        lines.push(Line::from(Span::styled(
            format!("  ♫ {}", truncate_string(url, 70)),
            Style::default().fg(Color::Cyan),
        )));
    }
    lines.push(Line::raw(""));
    Text::from(lines)
}
