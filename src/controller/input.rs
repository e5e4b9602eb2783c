//! Key event handling

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::model::ActiveSection;

use super::AppController;

impl AppController {
    pub async fn handle_key_event(&self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        // Handle error message first (blocks all other interactions)
        if self.model.has_error().await {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
                self.model.clear_error().await;
            }
            return Ok(());
        }

        // Handle help popup
        if self.model.is_help_popup_open().await {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('h') | KeyCode::Char('H')) {
                self.model.hide_help_popup().await;
            }
            return Ok(());
        }

        // Handle lyrics modal
        if self.model.is_lyrics_modal_open().await {
            match key.code {
                KeyCode::Esc | KeyCode::Enter => self.model.close_lyrics_modal().await,
                KeyCode::Up => self.model.scroll_lyrics(false).await,
                KeyCode::Down => self.model.scroll_lyrics(true).await,
                _ => {}
            }
            return Ok(());
        }

        // While a search is in flight all controls are disabled.
        if !self.model.controls_enabled().await {
            return Ok(());
        }

        let ui_state = self.model.get_ui_state().await;

        match ui_state.active_section {
            ActiveSection::SearchInput => match key.code {
                KeyCode::Enter => self.submit_search().await,
                KeyCode::Backspace => self.model.backspace_term().await,
                KeyCode::Esc => self.model.clear_term().await,
                KeyCode::Tab => self.model.cycle_section(true).await,
                KeyCode::BackTab => self.model.cycle_section(false).await,
                KeyCode::Down => {
                    self.model
                        .set_active_section(ActiveSection::TypeSelect)
                        .await
                }
                KeyCode::Char(c) => {
                    if (c == 'q' || c == 'Q') && key.modifiers.contains(KeyModifiers::CONTROL) {
                        self.model.set_should_quit(true).await;
                    } else {
                        self.model.append_to_term(c).await;
                    }
                }
                _ => {}
            },
            ActiveSection::TypeSelect => match key.code {
                KeyCode::Left => self.model.cycle_entity_selection(false).await,
                KeyCode::Right | KeyCode::Char(' ') => {
                    self.model.cycle_entity_selection(true).await
                }
                KeyCode::Enter => self.submit_search().await,
                KeyCode::Tab => self.model.cycle_section(true).await,
                KeyCode::BackTab => self.model.cycle_section(false).await,
                KeyCode::Char('q') | KeyCode::Char('Q') => {
                    self.model.set_should_quit(true).await
                }
                KeyCode::Char('h') | KeyCode::Char('H') => self.model.show_help_popup().await,
                _ => {}
            },
            ActiveSection::Filters => match key.code {
                KeyCode::Up => self.model.cycle_filter_field(false).await,
                KeyCode::Down => self.model.cycle_filter_field(true).await,
                KeyCode::Enter => self.submit_search().await,
                KeyCode::Backspace => self.model.backspace_filter().await,
                KeyCode::Tab => self.model.cycle_section(true).await,
                KeyCode::BackTab => self.model.cycle_section(false).await,
                KeyCode::Char(c) => self.model.append_to_filter(c).await,
                _ => {}
            },
            ActiveSection::Results => match key.code {
                KeyCode::Up => self.model.move_selection(false).await,
                KeyCode::Down => self.model.move_selection(true).await,
                KeyCode::Enter => self.activate_selected().await,
                KeyCode::Left => self.change_page(false).await,
                KeyCode::Right => self.change_page(true).await,
                KeyCode::Char('s') | KeyCode::Char('S') => self.toggle_sort().await,
                KeyCode::Tab => self.model.cycle_section(true).await,
                KeyCode::BackTab => self.model.cycle_section(false).await,
                KeyCode::Char('q') | KeyCode::Char('Q') => {
                    self.model.set_should_quit(true).await
                }
                KeyCode::Char('h') | KeyCode::Char('H') => self.model.show_help_popup().await,
                KeyCode::Char('g') | KeyCode::Char('G') => {
                    self.model
                        .set_active_section(ActiveSection::SearchInput)
                        .await
                }
                _ => {}
            },
        }

        Ok(())
    }
}
