// src/gui/components/data_table.rs
//
// The paginated nickname table. Canonical columns sort on header click
// (asc → desc → off); extra columns are shown but not sortable.

use std::borrow::Cow;

use eframe::egui::{self, Align, Color32, Layout, RichText, Sense, TextWrapMode};
use egui_extras::{Column as TableColumn, TableBuilder};

use crate::data::{SortOrder, SortSpec, paginate};
use crate::gui::app::App;
use crate::record::NicknameRecord;
use crate::schema::Column;
use crate::sentiment::Sentiment;

fn preferred_width(col: Option<Column>) -> f32 {
    match col {
        Some(Column::Nickname) | Some(Column::SpecificSource) => 170.0,
        Some(Column::Context) | Some(Column::UsedBy) => 240.0,
        Some(Column::Tags) => 150.0,
        Some(Column::SentimentScore) | Some(Column::Popularity) => 80.0,
        _ => 110.0,
    }
}

fn sentiment_color(s: Sentiment) -> Color32 {
    match s {
        Sentiment::Positive => Color32::from_rgb(0x4C, 0xAF, 0x50),
        Sentiment::Neutral => Color32::from_rgb(0x9E, 0x9E, 0x9E),
        Sentiment::Negative => Color32::from_rgb(0xDC, 0x61, 0x49),
    }
}

/// Display text of column `ci` (canonical first, then extras).
fn cell_text<'r>(rec: &'r NicknameRecord, ci: usize, extras: &[String]) -> Cow<'r, str> {
    match Column::ALL.get(ci) {
        Some(col) => rec.get(*col),
        None => {
            let name = extras.get(ci - Column::COUNT).map(String::as_str).unwrap_or("");
            Cow::Borrowed(rec.extra(name).unwrap_or(""))
        }
    }
}

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    let page_size = app.state.options.dashboard.page_size;
    let pages = paginate(app.row_ix.len(), page_size, app.state.gui.page);

    // --- Page controls ---
    ui.horizontal(|ui| {
        if ui.add_enabled(pages.page > 1, egui::Button::new("◀ Prev")).clicked() {
            app.state.gui.page = pages.page - 1;
        }
        ui.label(format!("Page {} / {}", pages.page, pages.total_pages));
        if ui.add_enabled(pages.page < pages.total_pages, egui::Button::new("Next ▶")).clicked() {
            app.state.gui.page = pages.page + 1;
        }
        if let Some(spec) = app.state.gui.sort {
            ui.separator();
            let dir = match spec.order { SortOrder::Ascending => "ascending", SortOrder::Descending => "descending" };
            ui.label(format!("Sorted by {} ({dir})", spec.column));
        }
    });
    if app.state.gui.page != pages.page {
        logd!("UI: Page {} → {}", pages.page, app.state.gui.page);
        // Page slice changes next frame; no re-query needed.
        ui.ctx().request_repaint();
    }

    ui.separator();

    if app.row_ix.is_empty() {
        ui.label("No nicknames match the current filters.");
        return;
    }

    let headers = app.table.headers();
    let extras = app.table.extra_columns().to_vec();
    let sort = app.state.gui.sort;
    let mut clicked: Option<Column> = None;

    let mut table = TableBuilder::new(ui)
        .striped(true)
        .min_scrolled_height(0.0)
        .id_salt(("nickname_table", app.table.version()));
    for ci in 0..headers.len() {
        let w = preferred_width(Column::ALL.get(ci).copied());
        table = table.column(TableColumn::initial(w).resizable(true).clip(true).at_least(40.0));
    }

    table
        .header(24.0, |mut header| {
            for (ci, name) in headers.iter().enumerate() {
                let canon = Column::ALL.get(ci).copied();
                header.col(|ui| {
                    ui.style_mut().wrap_mode = Some(TextWrapMode::Extend);
                    let arrow = match (canon, sort) {
                        (Some(c), Some(s)) if s.column == c => match s.order {
                            SortOrder::Ascending => " ▲",
                            SortOrder::Descending => " ▼",
                        },
                        _ => "",
                    };
                    let text = RichText::new(join!(name, arrow)).strong();
                    match canon {
                        Some(c) => {
                            let resp = ui.add(egui::Label::new(text).sense(Sense::click()).selectable(false));
                            if resp.on_hover_text("Click to sort").clicked() {
                                clicked = Some(c);
                            }
                        }
                        None => {
                            ui.add(egui::Label::new(text).selectable(false));
                        }
                    }
                });
            }
        })
        .body(|body| {
            body.rows(20.0, pages.len, |mut row| {
                let Some(rec) = app
                    .row_ix
                    .get(pages.offset + row.index())
                    .and_then(|&ix| app.table.record(ix))
                else {
                    return;
                };
                for ci in 0..headers.len() {
                    let canon = Column::ALL.get(ci).copied();
                    let mut rt = RichText::new(cell_text(rec, ci, &extras));
                    if let (Some(Column::Sentiment), Some(s)) = (canon, rec.sentiment) {
                        rt = rt.color(sentiment_color(s));
                    }
                    row.col(|ui| {
                        ui.style_mut().wrap_mode = Some(TextWrapMode::Extend);
                        if canon.is_some_and(|c| c.is_numeric()) {
                            ui.centered_and_justified(|ui| { ui.label(rt); });
                        } else {
                            ui.with_layout(Layout::left_to_right(Align::Center), |ui| { ui.label(rt); });
                        }
                    });
                }
            });
        });

    if let Some(col) = clicked {
        app.state.gui.sort = SortSpec::cycle(sort, col);
        logf!("UI: Sort → {:?}", app.state.gui.sort);
        app.mark_dirty();
    }
}
