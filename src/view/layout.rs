//! Layout rendering (search bar, type selector, filter bar, footer)

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
    Frame,
};

use crate::model::{ActiveSection, EntityType, FilterField, PageControls, UiState};

fn section_border(ui_state: &UiState, section: ActiveSection) -> Style {
    if !ui_state.controls_enabled {
        Style::default().fg(Color::DarkGray)
    } else if ui_state.active_section == section {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    }
}

pub fn render_top_bar(frame: &mut Frame, area: Rect, ui_state: &UiState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),     // Search input
            Constraint::Length(26), // Entity type selector
        ])
        .split(area);

    let search_text = if ui_state.form.term.is_empty() {
        "Type to search..."
    } else {
        &ui_state.form.term
    };
    let search_style = if ui_state.form.term.is_empty() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };

    let search = Paragraph::new(search_text).style(search_style).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Search ")
            .padding(Padding::horizontal(1))
            .border_style(section_border(ui_state, ActiveSection::SearchInput)),
    );
    frame.render_widget(search, chunks[0]);

    let entity_spans: Vec<Span> = [
        (Some(EntityType::Artist), "artists"),
        (Some(EntityType::Album), "albums"),
        (Some(EntityType::Track), "tracks"),
    ]
    .iter()
    .flat_map(|(entity, label)| {
        let style = if ui_state.form.entity == *entity {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        vec![Span::styled(*label, style), Span::raw(" ")]
    })
    .collect();

    let selector = Paragraph::new(Line::from(entity_spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Type (←/→) ")
            .padding(Padding::horizontal(1))
            .border_style(section_border(ui_state, ActiveSection::TypeSelect)),
    );
    frame.render_widget(selector, chunks[1]);
}

/// Advanced filters, shown for album searches only.
pub fn render_filter_bar(frame: &mut Frame, area: Rect, ui_state: &UiState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Percentage(40),
            Constraint::Percentage(20),
            Constraint::Percentage(20),
        ])
        .split(area);

    let fields = [
        FilterField::ReleaseYear,
        FilterField::Genre,
        FilterField::MinDuration,
        FilterField::MaxDuration,
    ];

    for (i, field) in fields.iter().enumerate() {
        let is_active = ui_state.active_section == ActiveSection::Filters
            && ui_state.form.filter_field == *field;
        let border_style = if !ui_state.controls_enabled {
            Style::default().fg(Color::DarkGray)
        } else if is_active {
            Style::default().fg(Color::Green)
        } else {
            Style::default()
        };

        let value = ui_state.form.filter_value(*field);
        let widget = Paragraph::new(value.to_string()).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", field.label()))
                .padding(Padding::horizontal(1))
                .border_style(border_style),
        );
        frame.render_widget(widget, chunks[i]);
    }
}

pub fn render_footer(
    frame: &mut Frame,
    area: Rect,
    ui_state: &UiState,
    controls: Option<&PageControls>,
) {
    let line = footer_line(ui_state, controls);
    let footer = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(footer, area);
}

/// Pagination markers and the sort indicator; pure function of state so it
/// can be re-rendered any number of times.
pub(crate) fn footer_line(
    ui_state: &UiState,
    controls: Option<&PageControls>,
) -> Line<'static> {
    let enabled = Style::default().fg(Color::Green);
    let disabled = Style::default().fg(Color::DarkGray);

    let mut spans = Vec::new();
    match controls {
        Some(controls) => {
            spans.push(Span::styled(
                "◀ Previous",
                if controls.prev_enabled { enabled } else { disabled },
            ));
            spans.push(Span::raw(format!("  {}  ", controls.label)));
            spans.push(Span::styled(
                "Next ▶",
                if controls.next_enabled { enabled } else { disabled },
            ));
            spans.push(Span::raw("   "));
        }
        None => {
            spans.push(Span::styled(
                "Search the catalog to see results   ",
                disabled,
            ));
        }
    }
    spans.push(Span::styled(
        format!("Sort by Name ({})", ui_state.sort_order.label()),
        Style::default().fg(Color::Cyan),
    ));
    spans.push(Span::styled(
        "   s sort · ←/→ page · h help · q quit",
        disabled,
    ));
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flatten(line: &Line<'_>) -> String {
        line.spans
            .iter()
            .map(|span| span.content.as_ref())
            .collect()
    }

    #[test]
    fn footer_shows_page_label() {
        let controls = PageControls {
            prev_enabled: false,
            next_enabled: false,
            label: "Page 1 of 1".to_string(),
        };
        let line = footer_line(&UiState::default(), Some(&controls));
        let text = flatten(&line);
        assert!(text.contains("Page 1 of 1"));
        assert!(text.contains("Sort by Name (Asc)"));
    }

    #[test]
    fn footer_boundary_markers_are_dimmed() {
        let controls = PageControls {
            prev_enabled: false,
            next_enabled: true,
            label: "Page 1 of 3".to_string(),
        };
        let line = footer_line(&UiState::default(), Some(&controls));
        let dim = Style::default().fg(Color::DarkGray);
        let lit = Style::default().fg(Color::Green);
        assert_eq!(line.spans[0].style, dim); // Previous
        assert_eq!(line.spans[2].style, lit); // Next
    }

    #[test]
    fn footer_without_results_shows_hint() {
        let line = footer_line(&UiState::default(), None);
        assert!(flatten(&line).contains("Search the catalog"));
    }
}
