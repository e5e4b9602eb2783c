//! Model module - Application state and data types
//!
//! This module contains the data structures and state management for the
//! application. It is organized into submodules by responsibility:
//!
//! - `types`: Core type definitions (enums, form state, UI state)
//! - `criteria`: Search criteria construction and validation
//! - `content`: Catalog data models and content view state
//! - `catalog_client`: Gateway trait and HTTP client for the catalog API
//! - `app_model`: Main application model with state management methods

mod types;
mod criteria;
mod content;
mod catalog_client;
mod app_model;

// Re-export all public types for convenient access
pub use types::{
    ActiveSection, EntityType, FilterField, LyricsModal, SearchForm, SortOrder, UiState,
};

pub use criteria::{SearchCriteria, SearchFilters};

pub use content::{
    Album, Artist, ContentState, ContentView, DiscGroup, Pagination, Row, SearchOutcome,
    SearchPayload, Track, group_tracks_by_disc, visible_rows,
};

pub use catalog_client::{CatalogClient, CatalogGateway};

pub use app_model::{AppModel, PageControls};
