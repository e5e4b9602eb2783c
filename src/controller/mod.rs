//! Controller module - Application logic and event handling
//!
//! This module contains the application controller that handles user
//! input and coordinates between the model and the catalog gateway. It is
//! organized into submodules by responsibility:
//!
//! - `input`: Key event handling
//! - `search`: Search submission and outcome handling
//! - `navigation`: Page changes, expansion, sorting and lyrics

mod input;
mod search;
mod navigation;

use std::sync::Arc;

use crate::model::{AppModel, CatalogGateway};

#[derive(Clone)]
pub struct AppController {
    pub(crate) model: Arc<AppModel>,
    pub(crate) gateway: Arc<dyn CatalogGateway>,
}

impl AppController {
    pub fn new(model: Arc<AppModel>, gateway: Arc<dyn CatalogGateway>) -> Self {
        Self { model, gateway }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use crate::error::SearchError;
    use crate::model::{CatalogGateway, SearchCriteria, SearchOutcome, Track};

    /// What the stub answers to `search` calls.
    pub(crate) enum StubSearch {
        Ok(SearchOutcome),
        Application(Option<String>),
        Transport,
    }

    /// In-memory gateway recording call counts.
    pub(crate) struct StubGateway {
        pub search_response: StubSearch,
        /// `None` simulates a failed lazy fetch.
        pub album_tracks: Option<Vec<Track>>,
        pub lyrics_body: Option<String>,
        pub search_calls: AtomicUsize,
        pub album_track_calls: AtomicUsize,
    }

    impl StubGateway {
        pub fn with_search(response: StubSearch) -> Self {
            Self {
                search_response: response,
                album_tracks: None,
                lyrics_body: None,
                search_calls: AtomicUsize::new(0),
                album_track_calls: AtomicUsize::new(0),
            }
        }

        pub fn searches(&self) -> usize {
            self.search_calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CatalogGateway for StubGateway {
        async fn search(
            &self,
            _criteria: &SearchCriteria,
        ) -> Result<SearchOutcome, SearchError> {
            self.search_calls.fetch_add(1, Ordering::SeqCst);
            match &self.search_response {
                StubSearch::Ok(outcome) => Ok(outcome.clone()),
                StubSearch::Application(detail) => Err(SearchError::Application {
                    detail: detail.clone(),
                }),
                StubSearch::Transport => {
                    Err(SearchError::Transport("stub offline".to_string()))
                }
            }
        }

        async fn album_tracks(&self, _album_id: u64) -> Result<Vec<Track>, SearchError> {
            self.album_track_calls.fetch_add(1, Ordering::SeqCst);
            match &self.album_tracks {
                Some(tracks) => Ok(tracks.clone()),
                None => Err(SearchError::Transport("stub offline".to_string())),
            }
        }

        async fn lyrics(&self, _artist: &str, _song: &str) -> Result<String, SearchError> {
            match &self.lyrics_body {
                Some(body) => Ok(body.clone()),
                None => Err(SearchError::Transport("stub offline".to_string())),
            }
        }
    }
}
