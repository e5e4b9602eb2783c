//! View module - UI rendering
//!
//! This module handles all UI rendering for the application using ratatui.
//! It is organized into submodules by component type:
//!
//! - `utils`: Shared utility functions (formatting, scrollable lists)
//! - `layout`: Search bar, type selector, filter bar and footer
//! - `content`: Main result area rendering
//! - `overlays`: Modal overlays (error, lyrics, help)

mod utils;
mod layout;
mod content;
mod overlays;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::model::{ContentState, PageControls, UiState};

pub struct AppView;

impl AppView {
    pub fn render(
        frame: &mut Frame,
        ui_state: &UiState,
        content_state: &ContentState,
        page_controls: Option<&PageControls>,
    ) {
        let filters_visible = ui_state.form.filters_visible();

        let constraints = if filters_visible {
            vec![
                Constraint::Length(3), // Search bar + type selector
                Constraint::Length(3), // Album filters
                Constraint::Min(0),    // Results
                Constraint::Length(3), // Pagination + sort footer
            ]
        } else {
            vec![
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
            ]
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(frame.area());

        layout::render_top_bar(frame, chunks[0], ui_state);

        let (content_area, footer_area) = if filters_visible {
            layout::render_filter_bar(frame, chunks[1], ui_state);
            (chunks[2], chunks[3])
        } else {
            (chunks[1], chunks[2])
        };

        content::render_main_content(frame, content_area, ui_state, content_state);
        layout::render_footer(frame, footer_area, ui_state, page_controls);

        // Overlays, innermost last so it draws on top
        if ui_state.error_message.is_some() {
            overlays::render_error_notification(frame, ui_state);
        }

        if let Some(modal) = &ui_state.lyrics_modal {
            overlays::render_lyrics_modal(frame, modal);
        }

        if ui_state.show_help_popup {
            overlays::render_help_popup(frame);
        }
    }
}
