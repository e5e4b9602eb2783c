//! Catalog server gateway: endpoint selection, request execution and
//! outcome classification.

use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde_json::Value;

use crate::error::SearchError;

use super::content::{
    AlbumSearchResponse, ArtistSearchResponse, SearchOutcome, SearchPayload, Track,
    TrackSearchResponse,
};
use super::criteria::SearchCriteria;
use super::types::EntityType;

/// The search pipeline's view of the backend. The production
/// implementation is [`CatalogClient`]; tests drive the controller with an
/// in-memory stub.
#[async_trait]
pub trait CatalogGateway: Send + Sync {
    async fn search(&self, criteria: &SearchCriteria) -> Result<SearchOutcome, SearchError>;

    /// Tracks for one album, used by the lazy expand in the artist view.
    async fn album_tracks(&self, album_id: u64) -> Result<Vec<Track>, SearchError>;

    /// Raw lyrics markup for a song.
    async fn lyrics(&self, artist: &str, song: &str) -> Result<String, SearchError>;
}

/// HTTP client for the catalog REST API.
#[derive(Clone)]
pub struct CatalogClient {
    http: Client,
    base: Url,
}

impl CatalogClient {
    pub fn new(base: Url) -> Self {
        Self {
            http: Client::new(),
            base,
        }
    }

    /// Build an endpoint URL from path segments; user-supplied terms are
    /// percent-encoded by the segment writer. A trailing empty segment
    /// yields a trailing slash.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, SearchError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| SearchError::Transport("server URL cannot hold a path".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

/// Non-2xx responses optionally carry a JSON body with a `detail` field;
/// surface it verbatim when present.
async fn application_error(response: Response) -> SearchError {
    let status = response.status();
    let detail = response
        .json::<Value>()
        .await
        .ok()
        .and_then(|body| {
            body.get("detail")
                .and_then(Value::as_str)
                .map(str::to_string)
        });
    tracing::warn!(
        %status,
        detail = detail.as_deref().unwrap_or(""),
        "catalog request rejected"
    );
    SearchError::Application { detail }
}

#[async_trait]
impl CatalogGateway for CatalogClient {
    async fn search(&self, criteria: &SearchCriteria) -> Result<SearchOutcome, SearchError> {
        let paging = [("page", criteria.page), ("page_size", criteria.page_size)];

        let request = match criteria.entity {
            EntityType::Artist => self
                .http
                .get(self.endpoint(&["artist", &criteria.term])?)
                .query(&paging),
            EntityType::Track => self
                .http
                .get(self.endpoint(&["tracks", &criteria.term])?)
                .query(&paging),
            EntityType::Album => {
                let mut request = self
                    .http
                    .get(self.endpoint(&["albums", ""])?)
                    .query(&[("album_name", criteria.term.as_str())]);
                if let Some(year) = criteria.filters.release_year {
                    request = request.query(&[("release_year", year)]);
                }
                if let Some(genre) = &criteria.filters.genre {
                    request = request.query(&[("genre", genre.as_str())]);
                }
                if let Some(min) = criteria.filters.min_duration_ms {
                    request = request.query(&[("min_duration", min)]);
                }
                if let Some(max) = criteria.filters.max_duration_ms {
                    request = request.query(&[("max_duration", max)]);
                }
                request.query(&paging)
            }
        };

        tracing::debug!(
            entity = criteria.entity.plural(),
            term = %criteria.term,
            page = criteria.page,
            "catalog search"
        );

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(application_error(response).await);
        }

        let outcome = match criteria.entity {
            EntityType::Artist => {
                let body: ArtistSearchResponse = response.json().await?;
                let mut artists = body.artist;
                for artist in &mut artists {
                    for album in &mut artist.albums {
                        album.upgrade_artwork();
                    }
                }
                SearchOutcome {
                    payload: SearchPayload::Artists(artists),
                    pagination: body.pagination,
                }
            }
            EntityType::Album => {
                let body: AlbumSearchResponse = response.json().await?;
                let mut albums = body.albums;
                for album in &mut albums {
                    album.upgrade_artwork();
                }
                SearchOutcome {
                    payload: SearchPayload::Albums(albums),
                    pagination: body.pagination,
                }
            }
            EntityType::Track => {
                let body: TrackSearchResponse = response.json().await?;
                SearchOutcome {
                    payload: SearchPayload::Tracks(body.tracks),
                    pagination: body.pagination,
                }
            }
        };

        tracing::info!(
            entity = criteria.entity.plural(),
            results = outcome.payload.len(),
            total_pages = outcome.pagination.total_pages,
            "catalog search completed"
        );
        Ok(outcome)
    }

    async fn album_tracks(&self, album_id: u64) -> Result<Vec<Track>, SearchError> {
        let url = self.endpoint(&["albums", &album_id.to_string(), "tracks"])?;
        tracing::debug!(album_id, "fetching album tracks");

        let response = self.http.get(url).send().await?;
        if !response.status().is_success() {
            return Err(application_error(response).await);
        }
        let tracks: Vec<Track> = response.json().await?;
        tracing::debug!(album_id, count = tracks.len(), "album tracks loaded");
        Ok(tracks)
    }

    async fn lyrics(&self, artist: &str, song: &str) -> Result<String, SearchError> {
        let url = self.endpoint(&["lyrics", artist, song])?;
        tracing::debug!(artist, song, "fetching lyrics");

        let response = self.http.get(url).send().await?;
        if !response.status().is_success() {
            return Err(application_error(response).await);
        }
        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> CatalogClient {
        CatalogClient::new(Url::parse("http://localhost:8000").unwrap())
    }

    #[test]
    fn endpoint_encodes_user_terms() {
        let url = client().endpoint(&["artist", "AC/DC & friends"]).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8000/artist/AC%2FDC%20&%20friends"
        );
    }

    #[test]
    fn album_endpoint_keeps_trailing_slash() {
        let url = client().endpoint(&["albums", ""]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/albums/");
    }

    #[test]
    fn album_tracks_endpoint_nests_under_album_id() {
        let url = client().endpoint(&["albums", "981", "tracks"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/albums/981/tracks");
    }
}
