//! Search criteria construction and validation (the query builder).
//!
//! Raw form values become an immutable [`SearchCriteria`] here, or the
//! submission is rejected with a validation error before any request is
//! made. Duration filters are entered in minutes and normalized to
//! milliseconds; numeric fields that do not parse are treated as absent.

use crate::error::SearchError;

use super::types::{EntityType, SearchForm};

const MILLIS_PER_MINUTE: u64 = 60_000;

/// Optional narrowing criteria, only sent for album searches.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchFilters {
    pub release_year: Option<u32>,
    pub genre: Option<String>,
    pub min_duration_ms: Option<u64>,
    pub max_duration_ms: Option<u64>,
}

impl SearchFilters {
    pub fn is_empty(&self) -> bool {
        *self == SearchFilters::default()
    }
}

/// A validated search request. Immutable once built; page changes clone
/// the last criteria with a new page number.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchCriteria {
    pub entity: EntityType,
    pub term: String,
    pub filters: SearchFilters,
    pub page: u32,
    pub page_size: u32,
}

impl SearchCriteria {
    pub fn with_page(&self, page: u32) -> Self {
        Self {
            page,
            ..self.clone()
        }
    }
}

impl SearchForm {
    /// Validate the form and produce criteria for the given page.
    ///
    /// Fails when the trimmed term is empty or no entity type has been
    /// selected; the gateway must not be called in that case.
    pub fn build_criteria(
        &self,
        page: u32,
        page_size: u32,
    ) -> Result<SearchCriteria, SearchError> {
        let term = self.term.trim();
        if term.is_empty() {
            return Err(SearchError::Validation(
                "Please enter a search term.".to_string(),
            ));
        }
        let Some(entity) = self.entity else {
            return Err(SearchError::Validation(
                "Please select what to search for.".to_string(),
            ));
        };

        let filters = if entity == EntityType::Album {
            SearchFilters {
                release_year: parse_number(&self.release_year),
                genre: non_empty(&self.genre),
                min_duration_ms: parse_number::<u64>(&self.min_duration)
                    .map(|mins| mins * MILLIS_PER_MINUTE),
                max_duration_ms: parse_number::<u64>(&self.max_duration)
                    .map(|mins| mins * MILLIS_PER_MINUTE),
            }
        } else {
            SearchFilters::default()
        };

        Ok(SearchCriteria {
            entity,
            term: term.to_string(),
            filters,
            page,
            page_size,
        })
    }
}

fn parse_number<T: std::str::FromStr>(raw: &str) -> Option<T> {
    raw.trim().parse().ok()
}

fn non_empty(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
