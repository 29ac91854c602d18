// src/gui/components/tabs.rs
//
// Renders the top tabs. All tabs share one query result; switching
// only changes which part of it is drawn.

use eframe::egui;
use crate::config::state::Tab;
use crate::gui::app::App;

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    ui.horizontal_wrapped(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        let cur = app.state.gui.tab;
        for tab in Tab::ALL {
            let selected = tab == cur;
            if ui.selectable_label(selected, tab.title()).clicked() && !selected {
                logf!("UI: Tab switch {:?} → {:?}", cur, tab);
                app.state.gui.tab = tab;
            }
        }

        ui.separator();
        ui.label(format!(
            "{} of {} nicknames match",
            app.aggregates.matched,
            app.table.len()
        ));
    });
}
