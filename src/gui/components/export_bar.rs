// src/gui/components/export_bar.rs

use eframe::egui;
use crate::{
    config::options::{ExportFormat, ExportScope},
    file,
    gui::app::App,
};

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    {
        let export = &mut app.state.options.export;

        // --- Format + Include headers + Scope ---
        let prev_fmt = export.format;
        ui.horizontal(|ui| {
            ui.label("Format:");
            ui.selectable_value(&mut export.format, ExportFormat::Csv, "CSV");
            ui.selectable_value(&mut export.format, ExportFormat::Tsv, "TSV");

            ui.separator();

            let before_headers = export.include_headers;
            ui.checkbox(&mut export.include_headers, "Include headers");
            if export.include_headers != before_headers {
                logf!("UI: Include_headers → {}", export.include_headers);
            }

            ui.separator();

            let prev_scope = export.scope;
            ui.radio_value(&mut export.scope, ExportScope::Filtered, "Filtered view");
            ui.radio_value(&mut export.scope, ExportScope::All, "Whole table");
            if export.scope != prev_scope {
                logf!("UI: Export scope → {:?}", export.scope);
            }
        });

        if export.format != prev_fmt {
            logf!("UI: Export format → {:?}", export.format);
            if !app.out_path_dirty {
                app.out_path_text = export.out_path().to_string_lossy().into_owned();
            }
        }
    }

    // --- Output field ---
    ui.horizontal(|ui| {
        ui.label("Output:");
        if ui
            .add(egui::TextEdit::singleline(&mut app.out_path_text)
                .font(egui::TextStyle::Monospace)
                .desired_width(320.0))
            .changed()
        {
            app.out_path_dirty = true;
            logd!("UI: out_path_text changed (dirty=true) → {}", app.out_path_text);
        }
    });

    // --- Actions (Copy / Export / Reload) ---
    ui.horizontal(|ui| {
        let rows_in_scope = match app.state.options.export.scope {
            ExportScope::Filtered => app.row_ix.len(),
            ExportScope::All => app.table.len(),
        };

        // Copy
        if ui.button("Copy").clicked() {
            if rows_in_scope == 0 {
                app.status("Nothing to copy");
                logd!("Copy: Clicked, but there's nothing to copy");
            } else {
                let view = app.current_view();
                let txt = file::to_export_string(&app.state.options.export, &app.table, &view);
                logf!("Copy: rows={}, scope={:?}", rows_in_scope, app.state.options.export.scope);
                ui.ctx().copy_text(txt);
                app.status(format!("Copied {rows_in_scope} rows to clipboard"));
            }
        }

        // Export
        if ui.button("Export").clicked() {
            if app.out_path_dirty {
                app.state.options.export.set_path(&app.out_path_text);
                // Reflect the normalized path (extension follows format).
                app.out_path_text = app.state.options.export.out_path().to_string_lossy().into_owned();
                logf!("Export: Out path set → {}", app.out_path_text);
                app.out_path_dirty = false;
            }

            let view = app.current_view();
            logf!(
                "Export: Begin rows={}, scope={:?}, format={:?}",
                rows_in_scope,
                app.state.options.export.scope,
                app.state.options.export.format
            );
            match file::write_export(&app.state.options.export, &app.table, &view) {
                Ok(path) => {
                    logf!("Export: OK {}", path.display());
                    app.status(format!("Exported {rows_in_scope} rows to {}", path.display()));
                }
                Err(e) => {
                    loge!("Export: Error: {}", e);
                    app.status(format!("Export error: {e}"));
                }
            }
        }

        ui.separator();

        if ui
            .button("Reload")
            .on_hover_text("Re-read the master file written by the merge step")
            .clicked()
        {
            app.reload();
        }

        ui.label(format!("Status: {}", app.status));
    });
}
