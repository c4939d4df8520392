//! Track suggestions panel: filter and sort controls over a suggestions
//! endpoint, rendered into an HTML table body.

pub mod client;
pub mod error;
pub mod logging;
pub mod markup;
pub mod model;
pub mod panel;
pub mod render;
pub mod runtime;
pub mod view;

pub use client::{HttpBackend, SuggestionsBackend};
pub use error::SuggestionsError;
pub use model::{
    FilterState, GenreMode, SortOrder, SortState, SuggestionRow, SuggestionsRequest,
    SuggestionsResponse,
};
pub use panel::{FilterControls, PanelContext, RefreshOutcome, RefreshTicket, SuggestionsPanel};
pub use runtime::{PanelEvent, PanelHandle};
pub use view::{MemoryView, PanelView};
