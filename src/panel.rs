//! The suggestions panel controller.
//!
//! A panel owns the interaction state of one suggestions block: the sort
//! column and direction, the current values of the filter controls, and the
//! sequence number of the last refresh it issued. Page events are plain
//! method calls. A handler that needs new data returns a [`RefreshTicket`];
//! whoever runs the request hands the result back through
//! [`SuggestionsPanel::apply_response`], which drops anything older than the
//! newest ticket.

use crate::client::SuggestionsBackend;
use crate::error::Result;
use crate::model::{
    FilterState, GenreMode, SortState, SuggestionsRequest, SuggestionsResponse, DEFAULT_BPM_RANGE,
};
use crate::render::render_table_body;
use crate::view::PanelView;

/// Values of the container's `data-track-id` and `data-ajax-url` attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PanelContext {
    pub track_id: Option<i64>,
    pub endpoint: Option<String>,
}

impl PanelContext {
    pub fn new(track_id: i64, endpoint: impl Into<String>) -> Self {
        Self {
            track_id: Some(track_id),
            endpoint: Some(endpoint.into()),
        }
    }

    /// Empty attributes and a track id that is not an integer count as missing.
    pub fn from_data_attributes(track_id: Option<&str>, ajax_url: Option<&str>) -> Self {
        let track_id = track_id.and_then(|id| id.trim().parse::<i64>().ok());
        let endpoint = ajax_url
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map(str::to_string);
        Self { track_id, endpoint }
    }
}

/// Which optional filter controls the page has, and their current values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterControls {
    /// Current slider value, `None` when the page has no BPM slider
    pub bpm_slider: Option<i64>,
    pub has_bpm_label: bool,
    /// Value of the checked `genre-mode` radio
    pub checked_genre: Option<GenreMode>,
}

impl FilterControls {
    /// Slider plus its paired label, as rendered by the track page.
    pub fn with_bpm_slider(mut self, value: i64) -> Self {
        self.bpm_slider = Some(value);
        self.has_bpm_label = true;
        self
    }

    pub fn with_checked_genre(mut self, mode: GenreMode) -> Self {
        self.checked_genre = Some(mode);
        self
    }
}

/// One issued refresh: the request to send and where to send it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshTicket {
    pub seq: u64,
    pub endpoint: String,
    pub request: SuggestionsRequest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Rendered { count: i64 },
    /// A newer ticket was issued before this response arrived
    Stale,
    Failed,
}

pub type SelectionHandler = Box<dyn FnMut(i64) + Send>;

pub struct SuggestionsPanel<V> {
    context: PanelContext,
    controls: FilterControls,
    sort: SortState,
    view: V,
    on_select: SelectionHandler,
    bound_rows: Vec<i64>,
    last_issued: u64,
}

impl<V: PanelView> SuggestionsPanel<V> {
    pub fn new(context: PanelContext, view: V) -> Self {
        let mut panel = Self {
            context,
            controls: FilterControls::default(),
            sort: SortState::default(),
            view,
            on_select: Box::new(log_selection),
            bound_rows: Vec::new(),
            last_issued: 0,
        };
        panel.view.update_sort_indicators(&panel.sort);
        panel
    }

    pub fn with_controls(mut self, controls: FilterControls) -> Self {
        self.controls = controls;
        self
    }

    /// Replace the default selection handler, which only logs the id.
    pub fn with_selection_handler<F>(mut self, handler: F) -> Self
    where
        F: FnMut(i64) + Send + 'static,
    {
        self.on_select = Box::new(handler);
        self
    }

    pub fn context(&self) -> &PanelContext {
        &self.context
    }

    pub fn controls(&self) -> &FilterControls {
        &self.controls
    }

    pub fn sort(&self) -> &SortState {
        &self.sort
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn into_view(self) -> V {
        self.view
    }

    /// Track ids of the rows currently rendered and clickable.
    pub fn bound_rows(&self) -> &[i64] {
        &self.bound_rows
    }

    /// BPM slider moved.
    ///
    /// The page only listens to the slider when it has a paired label, so
    /// without one the value is stored but nothing is refreshed.
    pub fn on_bpm_input(&mut self, value: i64) -> Option<RefreshTicket> {
        if self.controls.bpm_slider.is_none() {
            tracing::debug!(value, "bpm input ignored, panel has no slider");
            return None;
        }
        self.controls.bpm_slider = Some(value);
        if !self.controls.has_bpm_label {
            return None;
        }
        self.view.set_bpm_label(value);
        self.request_refresh()
    }

    pub fn on_genre_mode_change(&mut self, mode: GenreMode) -> Option<RefreshTicket> {
        self.controls.checked_genre = Some(mode);
        self.request_refresh()
    }

    pub fn on_header_click(&mut self, field: &str) -> Option<RefreshTicket> {
        self.sort.click(field);
        self.view.update_sort_indicators(&self.sort);
        tracing::debug!(field = %self.sort.field, order = %self.sort.order, "sort changed");
        self.request_refresh()
    }

    /// Dispatch a click on a rendered row. Returns false when the id does not
    /// belong to a row currently in the table.
    pub fn on_row_click(&mut self, track_id: i64) -> bool {
        if !self.bound_rows.contains(&track_id) {
            return false;
        }
        (self.on_select)(track_id);
        true
    }

    /// Filter values as they would be sent now, `None` without a track id.
    pub fn filter_state(&self) -> Option<FilterState> {
        let track_id = self.context.track_id?;
        Some(FilterState {
            track_id,
            bpm_range: self.controls.bpm_slider.unwrap_or(DEFAULT_BPM_RANGE),
            genre_mode: self.controls.checked_genre.clone().unwrap_or_default(),
        })
    }

    /// Issue a new ticket, or `None` when the panel has no track id or
    /// endpoint to query.
    pub fn request_refresh(&mut self) -> Option<RefreshTicket> {
        let endpoint = self.context.endpoint.clone()?;
        let filter = self.filter_state()?;

        self.last_issued += 1;
        let ticket = RefreshTicket {
            seq: self.last_issued,
            endpoint,
            request: SuggestionsRequest::new(&filter, &self.sort),
        };
        tracing::debug!(seq = ticket.seq, track_id = filter.track_id, "refresh issued");
        Some(ticket)
    }

    /// Render the result of the ticket numbered `seq`. Failures are logged
    /// and leave the table as it was.
    pub fn apply_response(
        &mut self,
        seq: u64,
        result: Result<SuggestionsResponse>,
    ) -> RefreshOutcome {
        if seq < self.last_issued {
            tracing::debug!(seq, latest = self.last_issued, "discarding stale suggestions response");
            return RefreshOutcome::Stale;
        }

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(error = %e, "failed to fetch suggestions");
                return RefreshOutcome::Failed;
            }
        };

        if self.view.has_table_body() {
            let body = render_table_body(&response.suggestions);
            self.view.replace_table_body(&body);
            self.bound_rows = body.row_ids;
        }
        self.view.set_count(response.count);
        RefreshOutcome::Rendered {
            count: response.count,
        }
    }

    /// Issue a ticket and run it to completion against `backend`.
    pub async fn refresh<B>(&mut self, backend: &B) -> Option<RefreshOutcome>
    where
        B: SuggestionsBackend + ?Sized,
    {
        let ticket = self.request_refresh()?;
        let result = backend.fetch(&ticket.endpoint, &ticket.request).await;
        Some(self.apply_response(ticket.seq, result))
    }
}

fn log_selection(track_id: i64) {
    tracing::info!(track_id, "track selected");
}
