//! Catalog data models and content view state.
//!
//! Wire shapes follow the catalog server: snake_case fields, envelopes of
//! `{ "artist" | "albums" | "tracks": [...], "pagination": {...} }`, and a
//! bare track array for the per-album lazy endpoint.

use std::collections::{HashMap, HashSet};

use serde::Deserialize;

/// Server-supplied paging block, trusted as-is.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub current_page: u32,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct Track {
    #[serde(default)]
    pub number: u32,
    #[serde(default = "default_disc")]
    pub disc: u32,
    pub name: String,
    #[serde(default)]
    pub artist_name: String,
    #[serde(default)]
    pub album_name: String,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub time_millis: u64,
    #[serde(default)]
    pub preview_url: Option<String>,
}

fn default_disc() -> u32 {
    1
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct Album {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub artist_name: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub tracks: Vec<Track>,
}

impl Album {
    /// The catalog hands out small thumbnails; swap in the large artwork
    /// variant the detail views link to.
    pub fn upgrade_artwork(&mut self) {
        if self.image_url.contains("100x100") {
            self.image_url = self.image_url.replace("100x100", "600x600");
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct Artist {
    pub name: String,
    #[serde(default)]
    pub albums: Vec<Album>,
}

#[derive(Debug, Deserialize)]
pub struct ArtistSearchResponse {
    #[serde(default)]
    pub artist: Vec<Artist>,
    #[serde(default)]
    pub pagination: Pagination,
}

#[derive(Debug, Deserialize)]
pub struct AlbumSearchResponse {
    #[serde(default)]
    pub albums: Vec<Album>,
    #[serde(default)]
    pub pagination: Pagination,
}

#[derive(Debug, Deserialize)]
pub struct TrackSearchResponse {
    #[serde(default)]
    pub tracks: Vec<Track>,
    #[serde(default)]
    pub pagination: Pagination,
}

/// A successful search, discriminated by entity type.
#[derive(Clone, Debug)]
pub enum SearchPayload {
    Artists(Vec<Artist>),
    Albums(Vec<Album>),
    Tracks(Vec<Track>),
}

impl SearchPayload {
    pub fn len(&self) -> usize {
        match self {
            SearchPayload::Artists(artists) => artists.len(),
            SearchPayload::Albums(albums) => albums.len(),
            SearchPayload::Tracks(tracks) => tracks.len(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct SearchOutcome {
    pub payload: SearchPayload,
    pub pagination: Pagination,
}

/// An album's tracks partitioned by disc number, first-seen disc order,
/// original order within a disc.
pub struct DiscGroup<'a> {
    pub disc: u32,
    pub tracks: Vec<&'a Track>,
}

pub fn group_tracks_by_disc(tracks: &[Track]) -> Vec<DiscGroup<'_>> {
    let mut groups: Vec<DiscGroup<'_>> = Vec::new();
    for track in tracks {
        match groups.iter_mut().find(|g| g.disc == track.disc) {
            Some(group) => group.tracks.push(track),
            None => groups.push(DiscGroup {
                disc: track.disc,
                tracks: vec![track],
            }),
        }
    }
    groups
}

/// Represents the current view in the main content area
#[derive(Clone, Debug, Default)]
pub enum ContentView {
    #[default]
    Empty,
    Artists {
        artists: Vec<Artist>,
        /// Dataset indices of expanded artist blocks.
        expanded: HashSet<usize>,
        /// Lazily fetched track lists, keyed by (artist, album) dataset
        /// indices. Collapsing removes the entry; re-expanding refetches.
        album_tracks: HashMap<(usize, usize), Vec<Track>>,
    },
    Albums {
        albums: Vec<Album>,
    },
    Tracks {
        tracks: Vec<Track>,
    },
}

/// One selectable row of the result area, identifying the dataset item it
/// was rendered from. Actions dispatch on this identity rather than on
/// widget-tree position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Row {
    Artist { artist: usize },
    ArtistAlbum { artist: usize, album: usize },
    Album { album: usize },
    Track { track: usize },
}

/// State for the main content area
#[derive(Clone, Debug, Default)]
pub struct ContentState {
    pub view: ContentView,
    /// Presentation order over the top-level blocks; an index permutation
    /// rebuilt as identity whenever a new dataset lands. Sorting reorders
    /// only this, never the dataset.
    pub display_order: Vec<usize>,
    /// Selected position within [`visible_rows`].
    pub selected: usize,
    pub is_loading: bool,
}

impl ContentState {
    pub fn selected_row(&self) -> Option<Row> {
        visible_rows(&self.view, &self.display_order)
            .get(self.selected)
            .copied()
    }

    pub fn row_count(&self) -> usize {
        visible_rows(&self.view, &self.display_order).len()
    }
}

/// Flatten the current view into its selectable rows, honoring the display
/// order and the expansion state.
pub fn visible_rows(view: &ContentView, display_order: &[usize]) -> Vec<Row> {
    let mut rows = Vec::new();
    match view {
        ContentView::Empty => {}
        ContentView::Artists {
            artists, expanded, ..
        } => {
            for &artist_idx in display_order {
                rows.push(Row::Artist { artist: artist_idx });
                if expanded.contains(&artist_idx) {
                    let album_count = artists
                        .get(artist_idx)
                        .map(|a| a.albums.len())
                        .unwrap_or(0);
                    for album_idx in 0..album_count {
                        rows.push(Row::ArtistAlbum {
                            artist: artist_idx,
                            album: album_idx,
                        });
                    }
                }
            }
        }
        ContentView::Albums { .. } => {
            for &album_idx in display_order {
                rows.push(Row::Album { album: album_idx });
            }
        }
        ContentView::Tracks { .. } => {
            for &track_idx in display_order {
                rows.push(Row::Track { track: track_idx });
            }
        }
    }
    rows
}
