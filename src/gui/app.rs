// src/gui/app.rs
use std::{collections::HashSet, error::Error, path::PathBuf};

use eframe::egui;

use crate::{
    config::state::{AppState, FilterState, Tab},
    data::{TableView, paginate},
    query::{self, Aggregates, FilterSpec},
    sentiment::SentimentRange,
    store::{self, MasterTable},
};

use super::components;

pub fn run(
    options: eframe::NativeOptions,
    state: AppState,
    table: Option<MasterTable>,
) -> Result<(), Box<dyn Error>> {
    eframe::run_native(
        "Nickname Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(App::new(state, table)))),
    )?;
    Ok(())
}

pub struct App {
    // single source of truth (UI thread only)
    pub state: AppState,

    // immutable snapshot; replaced wholesale on reload
    pub table: MasterTable,
    pub master_path: PathBuf,

    // result of the last query over `table` (indices in display order)
    pub row_ix: Vec<usize>,
    pub aggregates: Aggregates,
    dirty: bool,

    // output text field UX (we map this <-> ExportOptions)
    pub out_path_text: String,
    pub out_path_dirty: bool,

    pub status: String,
}

impl App {
    pub fn new(state: AppState, table: Option<MasterTable>) -> Self {
        let master_path = state.options.merge.master_path();

        let (table, status) = match table {
            Some(t) => {
                let msg = format!("Loaded {} nicknames from {}", t.len(), master_path.display());
                (t, msg)
            }
            None => (
                MasterTable::default(),
                format!("No master table at {}; run the merge step, then Reload", master_path.display()),
            ),
        };

        let out_path_text = state.options.export.out_path().to_string_lossy().into();

        logf!(
            "Init: master v{} rows={} source_types={} tags={}",
            table.version(),
            table.len(),
            table.source_types().len(),
            table.tags().len()
        );

        let mut app = Self {
            state,
            table,
            master_path,
            row_ix: Vec::new(),
            aggregates: Aggregates::default(),
            dirty: true,
            out_path_text,
            out_path_dirty: false,
            status,
        };
        app.rebuild_view();
        app
    }

    /* ---------- tiny helpers ---------- */

    #[inline]
    pub fn status<T: Into<String>>(&mut self, msg: T) {
        self.status = msg.into();
    }

    /// Any filter/sort change: re-run the query before the next paint.
    #[inline]
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Widget values → query predicates.
    pub fn filter_spec(&self) -> FilterSpec {
        let f = &self.state.gui.filters;
        let sentiment_range = match SentimentRange::new(f.score_lo, f.score_hi) {
            Ok(r) => r,
            Err(e) => {
                // The sliders keep lo <= hi, so this only happens if state was set programmatically.
                loge!("Filter: {}", e);
                SentimentRange::unchecked(f.score_lo, f.score_hi)
            }
        };
        FilterSpec {
            text: Some(f.search_text.clone()),
            source_types: f.source_types.iter().cloned().collect(),
            sentiment_range,
            tags: f.tags.iter().cloned().collect(),
        }
    }

    /// Re-evaluate the query over the whole table and re-apply the sort.
    pub fn rebuild_view(&mut self) {
        let spec = self.filter_spec();
        let top_n = self.state.options.dashboard.top_n;

        let result = query::query_top_n(&self.table, &spec, top_n);
        let mut view = result.view;
        if let Some(sort) = self.state.gui.sort {
            view.sort(sort);
        }
        self.row_ix = view.row_ix;
        self.aggregates = result.aggregates;

        let pages = paginate(self.row_ix.len(), self.state.options.dashboard.page_size, self.state.gui.page);
        self.state.gui.page = pages.page;
        self.dirty = false;

        logd!(
            "Query: matched {}/{} (text={:?}, types={}, range=[{}, {}], tags={})",
            self.row_ix.len(),
            self.table.len(),
            spec.text.as_deref().unwrap_or(""),
            spec.source_types.len(),
            spec.sentiment_range.lo(),
            spec.sentiment_range.hi(),
            spec.tags.len()
        );
    }

    /// The active view (filtered + sorted), borrowing the current snapshot.
    pub fn current_view(&self) -> TableView<'_> {
        TableView::from_indices(&self.table, self.row_ix.clone())
    }

    /// Re-read the master file and swap the snapshot in.
    /// Filter selections that no longer exist in the new table are dropped.
    pub fn reload(&mut self) {
        match store::load_master(&self.master_path) {
            Ok(t) => {
                let old = self.table.version();
                self.table = t;
                prune_selection(&mut self.state.gui.filters, &self.table);
                self.mark_dirty();
                logf!("Reload: master v{} → v{} ({} rows)", old, self.table.version(), self.table.len());
                let msg = format!("Reloaded {} nicknames", self.table.len());
                self.status(msg);
            }
            Err(e) => {
                loge!("Reload: {}", e);
                self.status(format!("Reload failed: {e}"));
            }
        }
    }

    pub fn reset_filters(&mut self) {
        self.state.gui.filters = FilterState::default();
        self.state.gui.page = 1;
        self.mark_dirty();
    }
}

fn prune_selection(filters: &mut FilterState, table: &MasterTable) {
    let types: HashSet<&str> = table.source_types().iter().map(String::as_str).collect();
    filters.source_types.retain(|t| types.contains(t.as_str()));
    let tags: HashSet<&str> = table.tags().iter().map(String::as_str).collect();
    filters.tags.retain(|t| tags.contains(t.as_str()));
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::SidePanel::left("filters")
            .resizable(false)
            .default_width(230.0)
            .show(ctx, |ui| {
                components::filter_panel::draw(ui, self);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            components::tabs::draw(ui, self);

            ui.separator();

            components::export_bar::draw(ui, self);

            ui.separator();

            match self.state.gui.tab {
                Tab::Table => components::data_table::draw(ui, self),
                Tab::Sentiment => components::charts::draw_sentiment(ui, self),
                Tab::Sources => components::charts::draw_sources(ui, self),
            }
        });

        // One query per interaction, then paint the new result.
        if self.dirty {
            self.rebuild_view();
            ctx.request_repaint();
        }
    }
}
