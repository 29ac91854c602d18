// src/config/state.rs
use std::collections::BTreeSet;

use super::consts::{SCORE_MAX, SCORE_MIN};
use super::options::AppOptions;
use crate::data::SortSpec;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Table,
    Sentiment,
    Sources,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Table, Tab::Sentiment, Tab::Sources];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Table => "Nicknames",
            Tab::Sentiment => "Sentiment",
            Tab::Sources => "Top sources",
        }
    }
}

/// Raw widget values of the filter panel. Turned into a `FilterSpec`
/// by `App::filter_spec()` whenever something changes.
#[derive(Clone, Debug, PartialEq)]
pub struct FilterState {
    pub search_text: String,
    pub source_types: BTreeSet<String>,
    pub score_lo: f64,
    pub score_hi: f64,
    pub tags: BTreeSet<String>,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            search_text: s!(),
            source_types: BTreeSet::new(),
            score_lo: SCORE_MIN,
            score_hi: SCORE_MAX,
            tags: BTreeSet::new(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct GuiState {
    pub filters: FilterState,
    pub sort: Option<SortSpec>,
    /// 1-indexed; clamped on every rebuild
    pub page: usize,
    pub tab: Tab,

    pub window_w: u32,
    pub window_h: u32,
}

impl Default for GuiState {
    fn default() -> Self {
        Self {
            filters: FilterState::default(),
            sort: None,
            page: 1,
            tab: Tab::Table,
            window_w: 1200,
            window_h: 760,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub options: AppOptions,
    pub gui: GuiState,
}
