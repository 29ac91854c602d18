// src/gui/components/filter_panel.rs
//
// Left panel: the four filter widgets. Any change marks the query dirty;
// the app re-runs it once at the end of the frame.

use std::collections::BTreeSet;

use eframe::egui::{self, RichText};

use crate::config::consts::{SCORE_MAX, SCORE_MIN};
use crate::gui::app::App;

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    ui.heading("Filters");
    ui.separator();

    // Vocabularies come from the loaded snapshot.
    let source_types = app.table.source_types().to_vec();
    let tags = app.table.tags().to_vec();

    let mut changed = false;

    {
        let f = &mut app.state.gui.filters;

        ui.label(RichText::new("Search").strong());
        changed |= ui
            .add(egui::TextEdit::singleline(&mut f.search_text).hint_text("any column"))
            .changed();

        ui.add_space(6.0);
        ui.label(RichText::new("Source type").strong());
        if source_types.is_empty() {
            ui.weak("(none)");
        }
        changed |= checkbox_set(ui, &source_types, &mut f.source_types);

        ui.add_space(6.0);
        ui.label(RichText::new("Sentiment score").strong());
        let lo_changed = ui
            .add(egui::Slider::new(&mut f.score_lo, SCORE_MIN..=SCORE_MAX).text("min").fixed_decimals(2))
            .changed();
        let hi_changed = ui
            .add(egui::Slider::new(&mut f.score_hi, SCORE_MIN..=SCORE_MAX).text("max").fixed_decimals(2))
            .changed();
        // Keep lo <= hi: the handle being dragged pushes the other one.
        if f.score_lo > f.score_hi {
            if lo_changed {
                f.score_hi = f.score_lo;
            } else {
                f.score_lo = f.score_hi;
            }
        }
        changed |= lo_changed || hi_changed;

        ui.add_space(6.0);
        ui.label(RichText::new("Tags").strong());
        if tags.is_empty() {
            ui.weak("(none)");
        }
    }

    egui::ScrollArea::vertical()
        .id_salt("tag_list")
        .max_height((ui.available_height() - 40.0).max(60.0))
        .show(ui, |ui| {
            changed |= checkbox_set(ui, &tags, &mut app.state.gui.filters.tags);
        });

    ui.separator();
    if ui.button("Reset filters").clicked() {
        logf!("UI: Filters reset");
        app.reset_filters();
        return;
    }

    if changed {
        // Filter change invalidates the current page position.
        app.state.gui.page = 1;
        app.mark_dirty();
        logd!("UI: Filters → {:?}", app.state.gui.filters);
    }
}

/// One checkbox per value; `selected` holds the checked ones.
fn checkbox_set(ui: &mut egui::Ui, values: &[String], selected: &mut BTreeSet<String>) -> bool {
    let mut changed = false;
    for v in values {
        let mut on = selected.contains(v);
        if ui.checkbox(&mut on, v.as_str()).changed() {
            if on {
                selected.insert(v.clone());
            } else {
                selected.remove(v);
            }
            changed = true;
        }
    }
    changed
}
