//! Panel state and wire types.
//!
//! `FilterState` and `SortState` are the in-memory interaction state of a
//! panel. `SuggestionsRequest` / `SuggestionsResponse` are the JSON bodies
//! exchanged with the suggestions endpoint.

use serde::{Deserialize, Deserializer, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Slider value used when the page has no BPM slider.
pub const DEFAULT_BPM_RANGE: i64 = 10;

/// Column the table is sorted by when a panel is created.
pub const DEFAULT_SORT_FIELD: &str = "title";

/// Value of the checked `genre-mode` radio, forwarded to the endpoint as is.
///
/// The track page offers `exact`, `same` and `secondary`; the endpoint decides
/// what each one filters on.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct GenreMode(String);

impl GenreMode {
    pub const EXACT: &'static str = "exact";

    /// Blank values fall back to `exact`, as with no radio checked.
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Self::default();
        }
        Self(trimmed.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for GenreMode {
    fn default() -> Self {
        Self(Self::EXACT.to_string())
    }
}

impl fmt::Display for GenreMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for GenreMode {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(GenreMode::new(s))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
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

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(format!("unknown sort order '{}'", other)),
        }
    }
}

/// The single active sort column and direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortState {
    pub field: String,
    pub order: SortOrder,
}

impl SortState {
    pub fn new(field: impl Into<String>, order: SortOrder) -> Self {
        Self {
            field: field.into(),
            order,
        }
    }

    /// Apply a header click: the active column flips its order, any other
    /// column becomes active in ascending order.
    pub fn click(&mut self, field: &str) {
        if self.field == field {
            self.order = self.order.toggled();
        } else {
            self.field = field.to_string();
            self.order = SortOrder::Asc;
        }
    }
}

impl Default for SortState {
    fn default() -> Self {
        Self::new(DEFAULT_SORT_FIELD, SortOrder::Asc)
    }
}

/// Filter values as read from the form controls at refresh time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    pub track_id: i64,
    pub bpm_range: i64,
    pub genre_mode: GenreMode,
}

impl FilterState {
    pub fn new(track_id: i64) -> Self {
        Self {
            track_id,
            bpm_range: DEFAULT_BPM_RANGE,
            genre_mode: GenreMode::default(),
        }
    }
}

/// Body POSTed to the suggestions endpoint.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SuggestionsRequest {
    pub track_id: i64,
    pub bpm_range: i64,
    pub genre_mode: GenreMode,
    pub sort_by: String,
    pub sort_order: SortOrder,
}

impl SuggestionsRequest {
    pub fn new(filter: &FilterState, sort: &SortState) -> Self {
        Self {
            track_id: filter.track_id,
            bpm_range: filter.bpm_range,
            genre_mode: filter.genre_mode.clone(),
            sort_by: sort.field.clone(),
            sort_order: sort.order,
        }
    }
}

/// One suggested track as returned by the server.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct SuggestionRow {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub artist: String,
    /// Stored as a float by the track library, usually integral
    #[serde(default)]
    pub bpm: Option<f64>,
    #[serde(default)]
    pub musical_key: Option<String>,
    /// Star score, 0 to 5
    #[serde(default)]
    pub ranking: Option<i64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct SuggestionsResponse {
    pub suggestions: Vec<SuggestionRow>,
    pub count: i64,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
