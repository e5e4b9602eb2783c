//! Main application model with state management.
//!
//! Owns the page-session view state: current pagination, the last
//! submitted criteria, the loaded dataset and its presentation order, and
//! the form/overlay state. Mutation happens only through these methods,
//! driven by the controller.

use std::sync::Arc;

use tokio::sync::Mutex;

use super::content::{
    ContentState, ContentView, Row, SearchOutcome, SearchPayload, Track,
};
use super::criteria::SearchCriteria;
use super::types::{
    ActiveSection, EntityType, LyricsModal, SortOrder, UiState, cycle_entity,
};

/// Pagination state plus the criteria needed to re-issue the last search.
#[derive(Clone, Debug)]
pub struct PagerState {
    pub current_page: u32,
    pub page_size: u32,
    pub total_pages: u32,
    pub last_criteria: Option<SearchCriteria>,
}

impl PagerState {
    fn new(page_size: u32) -> Self {
        Self {
            current_page: 1,
            page_size,
            total_pages: 0,
            last_criteria: None,
        }
    }
}

/// What the pagination footer shows; purely a function of pager state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageControls {
    pub prev_enabled: bool,
    pub next_enabled: bool,
    pub label: String,
}

impl PageControls {
    fn from_pager(pager: &PagerState) -> Option<Self> {
        pager.last_criteria.as_ref()?;
        Some(Self {
            prev_enabled: pager.current_page > 1,
            next_enabled: pager.current_page < pager.total_pages,
            label: format!("Page {} of {}", pager.current_page, pager.total_pages),
        })
    }
}

/// Main application model containing all state
pub struct AppModel {
    ui_state: Arc<Mutex<UiState>>,
    content_state: Arc<Mutex<ContentState>>,
    pager: Arc<Mutex<PagerState>>,
    should_quit: Arc<Mutex<bool>>,
}

impl AppModel {
    pub fn new(page_size: u32) -> Self {
        Self {
            ui_state: Arc::new(Mutex::new(UiState::default())),
            content_state: Arc::new(Mutex::new(ContentState::default())),
            pager: Arc::new(Mutex::new(PagerState::new(page_size))),
            should_quit: Arc::new(Mutex::new(false)),
        }
    }

    pub async fn get_ui_state(&self) -> UiState {
        self.ui_state.lock().await.clone()
    }

    pub async fn get_content_state(&self) -> ContentState {
        self.content_state.lock().await.clone()
    }

    pub async fn should_quit(&self) -> bool {
        *self.should_quit.lock().await
    }

    pub async fn set_should_quit(&self, quit: bool) {
        *self.should_quit.lock().await = quit;
    }

    // ========================================================================
    // Errors and overlays
    // ========================================================================

    pub async fn set_error(&self, message: String) {
        let mut ui_state = self.ui_state.lock().await;
        ui_state.error_message = Some(message);
    }

    pub async fn clear_error(&self) {
        let mut ui_state = self.ui_state.lock().await;
        ui_state.error_message = None;
    }

    pub async fn has_error(&self) -> bool {
        self.ui_state.lock().await.error_message.is_some()
    }

    pub async fn show_help_popup(&self) {
        self.ui_state.lock().await.show_help_popup = true;
    }

    pub async fn hide_help_popup(&self) {
        self.ui_state.lock().await.show_help_popup = false;
    }

    pub async fn is_help_popup_open(&self) -> bool {
        self.ui_state.lock().await.show_help_popup
    }

    pub async fn open_lyrics_modal(&self, title: String, body: String) {
        let mut ui_state = self.ui_state.lock().await;
        ui_state.lyrics_modal = Some(LyricsModal {
            title,
            body,
            scroll: 0,
        });
    }

    pub async fn close_lyrics_modal(&self) {
        self.ui_state.lock().await.lyrics_modal = None;
    }

    pub async fn is_lyrics_modal_open(&self) -> bool {
        self.ui_state.lock().await.lyrics_modal.is_some()
    }

    pub async fn scroll_lyrics(&self, down: bool) {
        let mut ui_state = self.ui_state.lock().await;
        if let Some(modal) = &mut ui_state.lyrics_modal {
            modal.scroll = if down {
                modal.scroll.saturating_add(1)
            } else {
                modal.scroll.saturating_sub(1)
            };
        }
    }

    // ========================================================================
    // Form editing
    // ========================================================================

    pub async fn set_active_section(&self, section: ActiveSection) {
        self.ui_state.lock().await.active_section = section;
    }

    pub async fn cycle_section(&self, forward: bool) {
        let mut ui_state = self.ui_state.lock().await;
        let filters_visible = ui_state.form.filters_visible();
        ui_state.active_section = if forward {
            ui_state.active_section.next(filters_visible)
        } else {
            ui_state.active_section.prev(filters_visible)
        };
    }

    pub async fn append_to_term(&self, c: char) {
        self.ui_state.lock().await.form.term.push(c);
    }

    pub async fn backspace_term(&self) {
        self.ui_state.lock().await.form.term.pop();
    }

    pub async fn clear_term(&self) {
        self.ui_state.lock().await.form.term.clear();
    }

    pub async fn cycle_entity_selection(&self, forward: bool) {
        let mut ui_state = self.ui_state.lock().await;
        ui_state.form.entity = cycle_entity(ui_state.form.entity, forward);
        // Leaving the album type hides the filter bar; move focus off it.
        if !ui_state.form.filters_visible()
            && ui_state.active_section == ActiveSection::Filters
        {
            ui_state.active_section = ActiveSection::TypeSelect;
        }
    }

    pub async fn cycle_filter_field(&self, forward: bool) {
        let mut ui_state = self.ui_state.lock().await;
        ui_state.form.filter_field = if forward {
            ui_state.form.filter_field.next()
        } else {
            ui_state.form.filter_field.prev()
        };
    }

    pub async fn append_to_filter(&self, c: char) {
        self.ui_state.lock().await.form.filter_value_mut().push(c);
    }

    pub async fn backspace_filter(&self) {
        self.ui_state.lock().await.form.filter_value_mut().pop();
    }

    // ========================================================================
    // Search lifecycle
    // ========================================================================

    /// Disable or re-enable the form controls around an in-flight search.
    /// Re-enabling restores focus to the search input.
    pub async fn set_controls_enabled(&self, enabled: bool) {
        let mut ui_state = self.ui_state.lock().await;
        ui_state.controls_enabled = enabled;
        if enabled {
            ui_state.active_section = ActiveSection::SearchInput;
        }
    }

    pub async fn controls_enabled(&self) -> bool {
        self.ui_state.lock().await.controls_enabled
    }

    pub async fn set_content_loading(&self, loading: bool) {
        self.content_state.lock().await.is_loading = loading;
    }

    /// Install a successful search result: record pagination, remember the
    /// criteria for page changes, rebuild the content view and reset the
    /// presentation order and selection to the origin.
    pub async fn apply_search_outcome(&self, criteria: SearchCriteria, outcome: SearchOutcome) {
        {
            let mut pager = self.pager.lock().await;
            pager.current_page = criteria.page;
            pager.total_pages = outcome.pagination.total_pages;
            pager.last_criteria = Some(criteria);
        }

        let item_count = outcome.payload.len();
        let view = match outcome.payload {
            SearchPayload::Artists(artists) => ContentView::Artists {
                artists,
                expanded: Default::default(),
                album_tracks: Default::default(),
            },
            SearchPayload::Albums(albums) => ContentView::Albums { albums },
            SearchPayload::Tracks(tracks) => ContentView::Tracks { tracks },
        };

        let mut content = self.content_state.lock().await;
        content.view = view;
        content.display_order = (0..item_count).collect();
        content.selected = 0;
        content.is_loading = false;
    }

    pub async fn active_entity(&self) -> Option<EntityType> {
        self.pager
            .lock()
            .await
            .last_criteria
            .as_ref()
            .map(|c| c.entity)
    }

    // ========================================================================
    // Pagination
    // ========================================================================

    pub async fn page_size(&self) -> u32 {
        self.pager.lock().await.page_size
    }

    pub async fn page_controls(&self) -> Option<PageControls> {
        PageControls::from_pager(&*self.pager.lock().await)
    }

    /// Guarded page change: returns the criteria to re-issue when `n` is
    /// within `[1, total_pages]`, `None` otherwise (a no-op).
    pub async fn go_to_page(&self, n: u32) -> Option<SearchCriteria> {
        let mut pager = self.pager.lock().await;
        if n < 1 || n > pager.total_pages {
            return None;
        }
        let criteria = pager.last_criteria.as_ref()?.with_page(n);
        pager.current_page = n;
        Some(criteria)
    }

    pub async fn current_page(&self) -> u32 {
        self.pager.lock().await.current_page
    }

    // ========================================================================
    // Selection and expansion
    // ========================================================================

    pub async fn move_selection(&self, down: bool) {
        let mut content = self.content_state.lock().await;
        let count = content.row_count();
        if count == 0 {
            return;
        }
        content.selected = if down {
            (content.selected + 1).min(count - 1)
        } else {
            content.selected.saturating_sub(1)
        };
    }

    pub async fn selected_row(&self) -> Option<Row> {
        self.content_state.lock().await.selected_row()
    }

    /// Toggle an artist block. Collapsing also discards any fetched track
    /// lists under it, so re-expanding refetches.
    pub async fn toggle_artist(&self, artist_idx: usize) {
        let mut content = self.content_state.lock().await;
        if let ContentView::Artists {
            expanded,
            album_tracks,
            ..
        } = &mut content.view
        {
            if expanded.remove(&artist_idx) {
                album_tracks.retain(|(a, _), _| *a != artist_idx);
            } else {
                expanded.insert(artist_idx);
            }
        }
        let count = content.row_count();
        if content.selected >= count && count > 0 {
            content.selected = count - 1;
        }
    }

    /// Whether an album under an artist currently shows its track list.
    pub async fn album_expanded(&self, artist_idx: usize, album_idx: usize) -> bool {
        match &self.content_state.lock().await.view {
            ContentView::Artists { album_tracks, .. } => {
                album_tracks.contains_key(&(artist_idx, album_idx))
            }
            _ => false,
        }
    }

    pub async fn set_album_tracks(&self, artist_idx: usize, album_idx: usize, tracks: Vec<Track>) {
        if let ContentView::Artists { album_tracks, .. } =
            &mut self.content_state.lock().await.view
        {
            album_tracks.insert((artist_idx, album_idx), tracks);
        }
    }

    pub async fn collapse_album(&self, artist_idx: usize, album_idx: usize) {
        if let ContentView::Artists { album_tracks, .. } =
            &mut self.content_state.lock().await.view
        {
            album_tracks.remove(&(artist_idx, album_idx));
        }
    }

    /// Catalog id of an album in the artist view, needed for the lazy
    /// track fetch.
    pub async fn album_id_at(&self, artist_idx: usize, album_idx: usize) -> Option<u64> {
        match &self.content_state.lock().await.view {
            ContentView::Artists { artists, .. } => artists
                .get(artist_idx)
                .and_then(|a| a.albums.get(album_idx))
                .map(|album| album.id),
            _ => None,
        }
    }

    /// The (artist, song) pair for a selected track row, used by the
    /// lyrics fetch.
    pub async fn track_identity(&self, track_idx: usize) -> Option<(String, String)> {
        match &self.content_state.lock().await.view {
            ContentView::Tracks { tracks } => tracks
                .get(track_idx)
                .map(|t| (t.artist_name.clone(), t.name.clone())),
            _ => None,
        }
    }

    // ========================================================================
    // Client-side sorting
    // ========================================================================

    /// Reorder the presentation of the loaded top-level blocks by name,
    /// case-insensitively. The dataset itself is never touched, and the
    /// order is rebuilt on the next search or page change.
    pub async fn sort_by_name(&self, order: SortOrder) {
        let mut content = self.content_state.lock().await;
        let keys: Vec<String> = match &content.view {
            ContentView::Empty => return,
            ContentView::Artists { artists, .. } => {
                artists.iter().map(|a| a.name.to_lowercase()).collect()
            }
            ContentView::Albums { albums } => {
                albums.iter().map(|a| a.title.to_lowercase()).collect()
            }
            ContentView::Tracks { tracks } => {
                tracks.iter().map(|t| t.name.to_lowercase()).collect()
            }
        };
        content.display_order.sort_by(|&a, &b| {
            let ordering = keys[a].cmp(&keys[b]);
            match order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });
        content.selected = 0;
    }

    pub async fn toggle_sort_order(&self) -> SortOrder {
        let mut ui_state = self.ui_state.lock().await;
        ui_state.sort_order = ui_state.sort_order.toggled();
        ui_state.sort_order
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::content::{Pagination, Track};
    use crate::model::criteria::SearchFilters;

    fn criteria(page: u32) -> SearchCriteria {
        SearchCriteria {
            entity: EntityType::Track,
            term: "arrival".to_string(),
            filters: SearchFilters::default(),
            page,
            page_size: 5,
        }
    }

    fn track(name: &str) -> Track {
        Track {
            name: name.to_string(),
            ..Track::default()
        }
    }

    async fn model_with_tracks(names: &[&str], total_pages: u32) -> AppModel {
        let model = AppModel::new(5);
        let outcome = SearchOutcome {
            payload: SearchPayload::Tracks(names.iter().map(|n| track(n)).collect()),
            pagination: Pagination {
                total_pages,
                current_page: 1,
            },
        };
        model.apply_search_outcome(criteria(1), outcome).await;
        model
    }

    #[tokio::test]
    async fn go_to_page_rejects_out_of_range_targets() {
        let model = model_with_tracks(&["a"], 3).await;
        assert!(model.go_to_page(0).await.is_none());
        assert!(model.go_to_page(4).await.is_none());
        assert_eq!(model.current_page().await, 1);
    }

    #[tokio::test]
    async fn go_to_page_is_idempotent_for_valid_targets() {
        let model = model_with_tracks(&["a"], 3).await;
        let first = model.go_to_page(2).await.unwrap();
        let second = model.go_to_page(2).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(model.current_page().await, 2);
    }

    #[tokio::test]
    async fn go_to_page_without_a_prior_search_is_a_no_op() {
        let model = AppModel::new(5);
        assert!(model.go_to_page(1).await.is_none());
    }

    #[tokio::test]
    async fn page_controls_disable_at_boundaries() {
        let model = model_with_tracks(&["a"], 1).await;
        let controls = model.page_controls().await.unwrap();
        assert!(!controls.prev_enabled);
        assert!(!controls.next_enabled);
        assert_eq!(controls.label, "Page 1 of 1");
    }

    #[tokio::test]
    async fn page_controls_enable_in_the_middle() {
        let model = model_with_tracks(&["a"], 3).await;
        model.go_to_page(2).await.unwrap();
        let controls = model.page_controls().await.unwrap();
        assert!(controls.prev_enabled);
        assert!(controls.next_enabled);
        assert_eq!(controls.label, "Page 2 of 3");
    }

    #[tokio::test]
    async fn page_controls_absent_before_first_search() {
        let model = AppModel::new(5);
        assert!(model.page_controls().await.is_none());
    }

    #[tokio::test]
    async fn sorting_an_empty_result_set_is_a_no_op() {
        let model = model_with_tracks(&[], 1).await;
        model.sort_by_name(SortOrder::Asc).await;
        assert!(model.get_content_state().await.display_order.is_empty());
    }

    #[tokio::test]
    async fn sorting_twice_with_alternating_order_reverses() {
        let model = model_with_tracks(&["banana", "Apple", "cherry"], 1).await;
        model.sort_by_name(SortOrder::Asc).await;
        let ascending = model.get_content_state().await.display_order.clone();
        model.sort_by_name(SortOrder::Desc).await;
        let descending = model.get_content_state().await.display_order.clone();
        let mut reversed = ascending.clone();
        reversed.reverse();
        assert_eq!(descending, reversed);
        // Case-insensitive: "Apple" sorts before "banana".
        assert_eq!(ascending, vec![1, 0, 2]);
    }

    #[tokio::test]
    async fn sorting_never_mutates_the_dataset() {
        let model = model_with_tracks(&["b", "a"], 1).await;
        model.sort_by_name(SortOrder::Asc).await;
        let content = model.get_content_state().await;
        match &content.view {
            ContentView::Tracks { tracks } => {
                let names: Vec<&str> = tracks.iter().map(|t| t.name.as_str()).collect();
                assert_eq!(names, vec!["b", "a"]);
            }
            _ => panic!("expected tracks view"),
        }
        assert_eq!(content.display_order, vec![1, 0]);
    }

    #[tokio::test]
    async fn new_results_reset_order_and_selection() {
        let model = model_with_tracks(&["b", "a"], 2).await;
        model.sort_by_name(SortOrder::Asc).await;
        model.move_selection(true).await;
        let outcome = SearchOutcome {
            payload: SearchPayload::Tracks(vec![track("z"), track("y"), track("x")]),
            pagination: Pagination {
                total_pages: 2,
                current_page: 2,
            },
        };
        model.apply_search_outcome(criteria(2), outcome).await;
        let content = model.get_content_state().await;
        assert_eq!(content.display_order, vec![0, 1, 2]);
        assert_eq!(content.selected, 0);
    }

    #[tokio::test]
    async fn collapsing_an_artist_discards_fetched_album_tracks() {
        let model = AppModel::new(5);
        let outcome = SearchOutcome {
            payload: SearchPayload::Artists(vec![crate::model::content::Artist {
                name: "ABBA".to_string(),
                albums: vec![crate::model::content::Album {
                    id: 7,
                    title: "Arrival".to_string(),
                    ..Default::default()
                }],
            }]),
            pagination: Pagination {
                total_pages: 1,
                current_page: 1,
            },
        };
        model.apply_search_outcome(criteria(1), outcome).await;

        model.toggle_artist(0).await;
        model.set_album_tracks(0, 0, vec![track("Dancing Queen")]).await;
        assert!(model.album_expanded(0, 0).await);

        model.toggle_artist(0).await; // collapse
        model.toggle_artist(0).await; // re-expand
        assert!(!model.album_expanded(0, 0).await);
    }
}
