//! Table body rendering for the suggestions table.

use crate::markup::{Element, Node};
use crate::model::SuggestionRow;

/// Column keys carried by the sortable headers, in table order.
pub const SORTABLE_FIELDS: [&str; 5] = ["title", "artist", "bpm", "musical_key", "ranking"];

/// Number of columns in the suggestions table.
pub const TABLE_COLUMNS: usize = SORTABLE_FIELDS.len();

pub const NO_SUGGESTIONS_MESSAGE: &str = "No suggestions found";

/// Shown in a cell whose value is absent.
pub const PLACEHOLDER: &str = "--";

pub const MAX_RANKING: i64 = 5;
const FILLED_STAR: char = '★';
const EMPTY_STAR: char = '☆';

/// Rendered `<tbody>` contents plus the track ids of the rows that can be
/// clicked. The placeholder row is not clickable.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TableBody {
    pub html: String,
    pub row_ids: Vec<i64>,
}

impl TableBody {
    pub fn is_placeholder(&self) -> bool {
        self.row_ids.is_empty()
    }
}

pub fn render_table_body(suggestions: &[SuggestionRow]) -> TableBody {
    if suggestions.is_empty() {
        return TableBody {
            html: placeholder_row().render(),
            row_ids: Vec::new(),
        };
    }

    let html = suggestions.iter().map(|s| render_row(s).render()).collect();
    TableBody {
        html,
        row_ids: suggestions.iter().map(|s| s.id).collect(),
    }
}

fn placeholder_row() -> Node {
    Element::new("tr")
        .child(
            Element::new("td")
                .attr("colspan", TABLE_COLUMNS)
                .class("no-suggestions")
                .text(NO_SUGGESTIONS_MESSAGE),
        )
        .into()
}

pub fn render_row(suggestion: &SuggestionRow) -> Node {
    // f64 Display drops the fraction of integral values: 128.0 renders as "128"
    let bpm = match suggestion.bpm {
        Some(bpm) if bpm != 0.0 => bpm.to_string(),
        _ => PLACEHOLDER.to_string(),
    };
    let key = match suggestion.musical_key.as_deref() {
        Some(key) if !key.is_empty() => key.to_string(),
        _ => PLACEHOLDER.to_string(),
    };

    Element::new("tr")
        .class("suggestion-row")
        .attr("data-track-id", suggestion.id)
        .child(Element::new("td").class("track-title").text(suggestion.title.as_str()))
        .child(
            Element::new("td").class("track-artist").child(
                Element::new("span")
                    .class("artist_green_flashy")
                    .text(suggestion.artist.as_str()),
            ),
        )
        .child(Element::new("td").class("track-bpm").text(bpm))
        .child(Element::new("td").class("track-key").text(key))
        .child(
            Element::new("td")
                .class("track-ranking")
                .text(render_stars(suggestion.ranking)),
        )
        .into()
}

/// `ranking` filled stars followed by the remaining empty ones, or the
/// placeholder when there is no ranking. Out of range values are clamped.
pub fn render_stars(ranking: Option<i64>) -> String {
    let filled = match ranking {
        Some(r) if r > 0 => r.min(MAX_RANKING) as usize,
        _ => return PLACEHOLDER.to_string(),
    };
    let empty = MAX_RANKING as usize - filled;
    let mut stars = String::with_capacity((filled + empty) * FILLED_STAR.len_utf8());
    stars.extend(std::iter::repeat(FILLED_STAR).take(filled));
    stars.extend(std::iter::repeat(EMPTY_STAR).take(empty));
    stars
}
