//! Page changes, expansion, sorting and lyrics.

use crate::model::Row;

use super::AppController;

impl AppController {
    /// Step to the adjacent page. Out-of-range targets are a no-op; a
    /// valid target re-issues the last search with the new page number,
    /// which also resets the result selection to the origin.
    pub async fn change_page(&self, forward: bool) {
        let current = self.model.current_page().await;
        let target = if forward {
            current.saturating_add(1)
        } else {
            current.saturating_sub(1)
        };
        if let Some(criteria) = self.model.go_to_page(target).await {
            self.run_search(criteria).await;
        }
    }

    /// Flip the sort direction and re-apply the in-place name sort over
    /// the rendered result order.
    pub async fn toggle_sort(&self) {
        let order = self.model.toggle_sort_order().await;
        self.model.sort_by_name(order).await;
    }

    /// Act on the selected result row: artists expand or collapse, albums
    /// under an artist lazily load their tracks, tracks open lyrics.
    pub async fn activate_selected(&self) {
        let Some(row) = self.model.selected_row().await else {
            return;
        };
        match row {
            Row::Artist { artist } => self.model.toggle_artist(artist).await,
            Row::ArtistAlbum { artist, album } => {
                if self.model.album_expanded(artist, album).await {
                    self.model.collapse_album(artist, album).await;
                } else {
                    self.expand_album(artist, album).await;
                }
            }
            Row::Track { track } => self.open_lyrics_for_track(track).await,
            Row::Album { .. } => {} // album blocks are already expanded
        }
    }

    /// Fetch an album's tracks on expand. Every expand refetches; a
    /// failed fetch degrades to an empty list so browsing continues.
    async fn expand_album(&self, artist_idx: usize, album_idx: usize) {
        let Some(album_id) = self.model.album_id_at(artist_idx, album_idx).await else {
            return;
        };
        let tracks = match self.gateway.album_tracks(album_id).await {
            Ok(tracks) => tracks,
            Err(err) => {
                tracing::error!(album_id, error = %err, "album track fetch failed");
                Vec::new()
            }
        };
        self.model
            .set_album_tracks(artist_idx, album_idx, tracks)
            .await;
    }

    async fn open_lyrics_for_track(&self, track_idx: usize) {
        let Some((artist, song)) = self.model.track_identity(track_idx).await else {
            return;
        };
        match self.gateway.lyrics(&artist, &song).await {
            Ok(body) => {
                self.model
                    .open_lyrics_modal(format!("{artist} - {song}"), body)
                    .await;
            }
            Err(err) => {
                tracing::error!(%artist, %song, error = %err, "lyrics fetch failed");
                self.model
                    .set_error("Failed to fetch lyrics. Please try again later.".to_string())
                    .await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::super::test_support::{StubGateway, StubSearch};
    use super::*;
    use crate::model::{
        Album, AppModel, Artist, EntityType, Pagination, SearchCriteria, SearchFilters,
        SearchOutcome, SearchPayload, SortOrder, Track,
    };

    fn criteria() -> SearchCriteria {
        SearchCriteria {
            entity: EntityType::Artist,
            term: "abba".to_string(),
            filters: SearchFilters::default(),
            page: 1,
            page_size: 5,
        }
    }

    fn artist_outcome() -> SearchOutcome {
        SearchOutcome {
            payload: SearchPayload::Artists(vec![Artist {
                name: "ABBA".to_string(),
                albums: vec![Album {
                    id: 42,
                    title: "Arrival".to_string(),
                    ..Album::default()
                }],
            }]),
            pagination: Pagination {
                total_pages: 1,
                current_page: 1,
            },
        }
    }

    async fn artist_controller(
        stub: StubGateway,
    ) -> (AppController, Arc<AppModel>, Arc<StubGateway>) {
        let model = Arc::new(AppModel::new(5));
        model.apply_search_outcome(criteria(), artist_outcome()).await;
        let gateway = Arc::new(stub);
        let controller = AppController::new(model.clone(), gateway.clone());
        (controller, model, gateway)
    }

    #[tokio::test]
    async fn failed_lazy_fetch_degrades_to_an_empty_track_list() {
        let (controller, model, gateway) =
            artist_controller(StubGateway::with_search(StubSearch::Transport)).await;

        // Expand the artist, select its album, expand it.
        controller.activate_selected().await;
        model.move_selection(true).await;
        controller.activate_selected().await;

        assert_eq!(gateway.album_track_calls.load(std::sync::atomic::Ordering::SeqCst), 1);
        // The failure is swallowed: the album shows an empty list and no
        // error popup appears.
        assert!(model.album_expanded(0, 0).await);
        assert!(model.get_ui_state().await.error_message.is_none());
    }

    #[tokio::test]
    async fn re_expanding_an_album_refetches() {
        let mut stub = StubGateway::with_search(StubSearch::Transport);
        stub.album_tracks = Some(vec![Track {
            name: "Dancing Queen".to_string(),
            ..Track::default()
        }]);
        let (controller, model, gateway) = artist_controller(stub).await;

        controller.activate_selected().await; // expand artist
        model.move_selection(true).await; // album row
        controller.activate_selected().await; // expand (fetch 1)
        controller.activate_selected().await; // collapse
        controller.activate_selected().await; // expand again (fetch 2)

        assert_eq!(gateway.album_track_calls.load(std::sync::atomic::Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn page_change_is_a_no_op_at_the_boundary() {
        let (controller, model, gateway) =
            artist_controller(StubGateway::with_search(StubSearch::Transport)).await;

        controller.change_page(true).await; // already on the last page
        controller.change_page(false).await; // already on the first page

        assert_eq!(gateway.searches(), 0);
        assert_eq!(model.current_page().await, 1);
    }

    #[tokio::test]
    async fn page_change_reissues_the_last_criteria() {
        let stub = StubGateway::with_search(StubSearch::Ok(SearchOutcome {
            payload: SearchPayload::Tracks(vec![]),
            pagination: Pagination {
                total_pages: 3,
                current_page: 2,
            },
        }));
        let model = Arc::new(AppModel::new(5));
        model
            .apply_search_outcome(
                criteria(),
                SearchOutcome {
                    payload: SearchPayload::Tracks(vec![]),
                    pagination: Pagination {
                        total_pages: 3,
                        current_page: 1,
                    },
                },
            )
            .await;
        let gateway = Arc::new(stub);
        let controller = AppController::new(model.clone(), gateway.clone());

        controller.change_page(true).await;

        assert_eq!(gateway.searches(), 1);
        assert_eq!(model.current_page().await, 2);
    }

    #[tokio::test]
    async fn selecting_a_track_opens_the_lyrics_modal() {
        let mut stub = StubGateway::with_search(StubSearch::Transport);
        stub.lyrics_body = Some("Some lyrics<br>line two".to_string());
        let model = Arc::new(AppModel::new(5));
        model
            .apply_search_outcome(
                criteria(),
                SearchOutcome {
                    payload: SearchPayload::Tracks(vec![Track {
                        name: "Dancing Queen".to_string(),
                        artist_name: "ABBA".to_string(),
                        ..Track::default()
                    }]),
                    pagination: Pagination {
                        total_pages: 1,
                        current_page: 1,
                    },
                },
            )
            .await;
        let controller = AppController::new(model.clone(), Arc::new(stub));

        controller.activate_selected().await;

        let ui_state = model.get_ui_state().await;
        let modal = ui_state.lyrics_modal.expect("modal should be open");
        assert_eq!(modal.title, "ABBA - Dancing Queen");
        assert_eq!(modal.body, "Some lyrics<br>line two");
    }

    #[tokio::test]
    async fn failed_lyrics_fetch_surfaces_retry_later_error() {
        let model = Arc::new(AppModel::new(5));
        model
            .apply_search_outcome(
                criteria(),
                SearchOutcome {
                    payload: SearchPayload::Tracks(vec![Track {
                        name: "Dancing Queen".to_string(),
                        artist_name: "ABBA".to_string(),
                        ..Track::default()
                    }]),
                    pagination: Pagination {
                        total_pages: 1,
                        current_page: 1,
                    },
                },
            )
            .await;
        let controller = AppController::new(
            model.clone(),
            Arc::new(StubGateway::with_search(StubSearch::Transport)),
        );

        controller.activate_selected().await;

        let ui_state = model.get_ui_state().await;
        assert!(ui_state.lyrics_modal.is_none());
        assert_eq!(
            ui_state.error_message.as_deref(),
            Some("Failed to fetch lyrics. Please try again later.")
        );
    }

    #[tokio::test]
    async fn sort_toggle_flips_direction_each_press() {
        let (controller, model, _gateway) =
            artist_controller(StubGateway::with_search(StubSearch::Transport)).await;

        controller.toggle_sort().await;
        assert_eq!(model.get_ui_state().await.sort_order, SortOrder::Desc);
        controller.toggle_sort().await;
        assert_eq!(model.get_ui_state().await.sort_order, SortOrder::Asc);
    }
}
