//! The page elements a panel writes to.
//!
//! A `PanelView` stands in for the DOM around one suggestions block: the BPM
//! label, the count display, the `suggestions-tbody` element and the sort
//! indicators. `MemoryView` keeps all of it in memory, which is what the CLI
//! and the tests render into.

use std::collections::BTreeMap;

use crate::model::SortState;
use crate::render::TableBody;

pub const SORT_INDICATOR_CLASS: &str = "sort-indicator";

pub trait PanelView: Send {
    fn set_bpm_label(&mut self, value: i64);

    fn set_count(&mut self, count: i64);

    /// Whether the page has a table body to render into.
    fn has_table_body(&self) -> bool {
        true
    }

    fn replace_table_body(&mut self, body: &TableBody);

    /// Reset every indicator, then mark the one whose field is active.
    fn update_sort_indicators(&mut self, sort: &SortState);
}

#[derive(Debug, Clone, Default)]
pub struct MemoryView {
    pub bpm_label: Option<String>,
    pub count: Option<String>,
    /// `None` when the page has no table body element
    pub table_body: Option<TableBody>,
    /// Indicator class keyed by its `data-field`
    pub indicators: BTreeMap<String, String>,
}

impl MemoryView {
    /// A view with a table body and one indicator per sortable field.
    pub fn new<I, S>(indicator_fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            table_body: Some(TableBody::default()),
            indicators: indicator_fields
                .into_iter()
                .map(|f| (f.into(), SORT_INDICATOR_CLASS.to_string()))
                .collect(),
            ..Self::default()
        }
    }

    pub fn without_table_body(mut self) -> Self {
        self.table_body = None;
        self
    }

    pub fn tbody_html(&self) -> Option<&str> {
        self.table_body.as_ref().map(|b| b.html.as_str())
    }

    /// Fields whose indicator currently shows a direction.
    pub fn active_indicators(&self) -> Vec<(&str, &str)> {
        self.indicators
            .iter()
            .filter_map(|(field, class)| {
                class
                    .strip_prefix(SORT_INDICATOR_CLASS)
                    .map(str::trim)
                    .filter(|order| !order.is_empty())
                    .map(|order| (field.as_str(), order))
            })
            .collect()
    }
}

impl PanelView for MemoryView {
    fn set_bpm_label(&mut self, value: i64) {
        self.bpm_label = Some(value.to_string());
    }

    fn set_count(&mut self, count: i64) {
        self.count = Some(count.to_string());
    }

    fn has_table_body(&self) -> bool {
        self.table_body.is_some()
    }

    fn replace_table_body(&mut self, body: &TableBody) {
        if let Some(existing) = self.table_body.as_mut() {
            *existing = body.clone();
        }
    }

    fn update_sort_indicators(&mut self, sort: &SortState) {
        for class in self.indicators.values_mut() {
            *class = SORT_INDICATOR_CLASS.to_string();
        }
        if let Some(class) = self.indicators.get_mut(&sort.field) {
            *class = format!("{} {}", SORT_INDICATOR_CLASS, sort.order);
        }
    }
}
