//! Core type definitions for the application

/// Which entity a search targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityType {
    Artist,
    Album,
    Track,
}

impl EntityType {
    /// Plural label used in endpoints hints and user-facing messages.
    pub fn plural(self) -> &'static str {
        match self {
            EntityType::Artist => "artists",
            EntityType::Album => "albums",
            EntityType::Track => "tracks",
        }
    }
}

/// Cycle the form's entity selector, `None` being the unselected state.
pub fn cycle_entity(current: Option<EntityType>, forward: bool) -> Option<EntityType> {
    if forward {
        match current {
            None => Some(EntityType::Artist),
            Some(EntityType::Artist) => Some(EntityType::Album),
            Some(EntityType::Album) => Some(EntityType::Track),
            Some(EntityType::Track) => None,
        }
    } else {
        match current {
            None => Some(EntityType::Track),
            Some(EntityType::Track) => Some(EntityType::Album),
            Some(EntityType::Album) => Some(EntityType::Artist),
            Some(EntityType::Artist) => None,
        }
    }
}

/// Sort direction for the in-place name sort.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortOrder::Asc => "Asc",
            SortOrder::Desc => "Desc",
        }
    }
}

/// Which section of the UI is currently active/focused
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ActiveSection {
    #[default]
    SearchInput,
    TypeSelect,
    Filters,
    Results,
}

impl ActiveSection {
    /// Tab order; the filter bar is skipped unless it is visible
    /// (album searches only).
    pub fn next(self, filters_visible: bool) -> Self {
        let candidate = match self {
            ActiveSection::SearchInput => ActiveSection::TypeSelect,
            ActiveSection::TypeSelect => ActiveSection::Filters,
            ActiveSection::Filters => ActiveSection::Results,
            ActiveSection::Results => ActiveSection::SearchInput,
        };
        if candidate == ActiveSection::Filters && !filters_visible {
            ActiveSection::Results
        } else {
            candidate
        }
    }

    pub fn prev(self, filters_visible: bool) -> Self {
        let candidate = match self {
            ActiveSection::SearchInput => ActiveSection::Results,
            ActiveSection::TypeSelect => ActiveSection::SearchInput,
            ActiveSection::Filters => ActiveSection::TypeSelect,
            ActiveSection::Results => ActiveSection::Filters,
        };
        if candidate == ActiveSection::Filters && !filters_visible {
            ActiveSection::TypeSelect
        } else {
            candidate
        }
    }
}

/// One of the advanced filter inputs (album searches only).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FilterField {
    #[default]
    ReleaseYear,
    Genre,
    MinDuration,
    MaxDuration,
}

impl FilterField {
    pub fn next(self) -> Self {
        match self {
            FilterField::ReleaseYear => FilterField::Genre,
            FilterField::Genre => FilterField::MinDuration,
            FilterField::MinDuration => FilterField::MaxDuration,
            FilterField::MaxDuration => FilterField::ReleaseYear,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            FilterField::ReleaseYear => FilterField::MaxDuration,
            FilterField::Genre => FilterField::ReleaseYear,
            FilterField::MinDuration => FilterField::Genre,
            FilterField::MaxDuration => FilterField::MinDuration,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FilterField::ReleaseYear => "Year",
            FilterField::Genre => "Genre",
            FilterField::MinDuration => "Min (min)",
            FilterField::MaxDuration => "Max (min)",
        }
    }
}

/// Raw form control values, edited by the input handler and consumed by
/// the query builder. Numeric fields stay free text until validation.
#[derive(Clone, Debug, Default)]
pub struct SearchForm {
    pub term: String,
    pub entity: Option<EntityType>,
    pub release_year: String,
    pub genre: String,
    pub min_duration: String,
    pub max_duration: String,
    pub filter_field: FilterField,
}

impl SearchForm {
    /// The advanced filter bar is shown for album searches only.
    pub fn filters_visible(&self) -> bool {
        self.entity == Some(EntityType::Album)
    }

    pub fn filter_value_mut(&mut self) -> &mut String {
        match self.filter_field {
            FilterField::ReleaseYear => &mut self.release_year,
            FilterField::Genre => &mut self.genre,
            FilterField::MinDuration => &mut self.min_duration,
            FilterField::MaxDuration => &mut self.max_duration,
        }
    }

    pub fn filter_value(&self, field: FilterField) -> &str {
        match field {
            FilterField::ReleaseYear => &self.release_year,
            FilterField::Genre => &self.genre,
            FilterField::MinDuration => &self.min_duration,
            FilterField::MaxDuration => &self.max_duration,
        }
    }
}

/// Lyrics modal content. The body keeps the markup as fetched; the view
/// normalizes line breaks at render time.
#[derive(Clone, Debug)]
pub struct LyricsModal {
    pub title: String,
    pub body: String,
    pub scroll: u16,
}

/// UI state for the application
#[derive(Clone, Debug)]
pub struct UiState {
    pub active_section: ActiveSection,
    pub form: SearchForm,
    pub sort_order: SortOrder,
    /// All form controls are disabled while a search is in flight.
    pub controls_enabled: bool,
    pub error_message: Option<String>,
    pub show_help_popup: bool,
    pub lyrics_modal: Option<LyricsModal>,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            active_section: ActiveSection::SearchInput,
            form: SearchForm::default(),
            sort_order: SortOrder::Asc,
            controls_enabled: true,
            error_message: None,
            show_help_popup: false,
            lyrics_modal: None,
        }
    }
}
