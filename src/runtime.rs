//! Async driver for a shared panel.
//!
//! Handlers run under the panel lock; the request itself runs in a spawned
//! task without it, so further events can be dispatched while earlier
//! requests are still in flight.

use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::client::SuggestionsBackend;
use crate::model::GenreMode;
use crate::panel::{RefreshOutcome, RefreshTicket, SuggestionsPanel};
use crate::view::PanelView;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelEvent {
    BpmInput(i64),
    GenreModeChange(GenreMode),
    HeaderClick(String),
    Refresh,
}

pub struct PanelHandle<V, B> {
    panel: Arc<Mutex<SuggestionsPanel<V>>>,
    backend: Arc<B>,
}

impl<V, B> Clone for PanelHandle<V, B> {
    fn clone(&self) -> Self {
        Self {
            panel: self.panel.clone(),
            backend: self.backend.clone(),
        }
    }
}

impl<V, B> PanelHandle<V, B>
where
    V: PanelView + 'static,
    B: SuggestionsBackend + 'static,
{
    pub fn new(panel: SuggestionsPanel<V>, backend: B) -> Self {
        Self {
            panel: Arc::new(Mutex::new(panel)),
            backend: Arc::new(backend),
        }
    }

    pub fn panel(&self) -> &Arc<Mutex<SuggestionsPanel<V>>> {
        &self.panel
    }

    /// Run the handler for `event` and, if it issued a ticket, start the
    /// request. The returned task resolves once the response was applied.
    pub async fn dispatch(&self, event: PanelEvent) -> Option<JoinHandle<RefreshOutcome>> {
        let ticket = {
            let mut panel = self.panel.lock().await;
            match event {
                PanelEvent::BpmInput(value) => panel.on_bpm_input(value),
                PanelEvent::GenreModeChange(mode) => panel.on_genre_mode_change(mode),
                PanelEvent::HeaderClick(field) => panel.on_header_click(&field),
                PanelEvent::Refresh => panel.request_refresh(),
            }
        }?;
        Some(self.spawn_fetch(ticket))
    }

    pub async fn select_row(&self, track_id: i64) -> bool {
        self.panel.lock().await.on_row_click(track_id)
    }

    fn spawn_fetch(&self, ticket: RefreshTicket) -> JoinHandle<RefreshOutcome> {
        let panel = self.panel.clone();
        let backend = self.backend.clone();
        tokio::spawn(async move {
            let result = backend.fetch(&ticket.endpoint, &ticket.request).await;
            panel.lock().await.apply_response(ticket.seq, result)
        })
    }
}
