// src/gui/components/charts.rs
//
// Aggregate views over the current query result: the sentiment
// distribution as proportion bars, and the top specific sources as
// horizontal bars. Both read `app.aggregates` only.

use eframe::egui::{self, Align2, Color32, FontId, Pos2, Rect, RichText, Sense, Vec2};

use crate::gui::app::App;
use crate::query::ScoreCount;
use crate::record::format_score;
use crate::sentiment::Sentiment;

const BAR_H: f32 = 26.0;
const UNSCORED: Color32 = Color32::from_rgb(0x60, 0x60, 0x60);

fn label_color(s: Option<Sentiment>) -> Color32 {
    match s {
        Some(Sentiment::Positive) => Color32::from_rgb(0x4C, 0xAF, 0x50),
        Some(Sentiment::Neutral) => Color32::from_rgb(0x9E, 0x9E, 0x9E),
        Some(Sentiment::Negative) => Color32::from_rgb(0xDC, 0x61, 0x49),
        None => UNSCORED,
    }
}

/// Red (-1) → grey (0) → green (+1).
fn score_color(score: Option<f64>) -> Color32 {
    let Some(v) = score else { return UNSCORED };
    let t = v.clamp(-1.0, 1.0) as f32;
    let grey = [0x9E as f32, 0x9E as f32, 0x9E as f32];
    let end = if t >= 0.0 { [0x4C as f32, 0xAF as f32, 0x50 as f32] } else { [0xDC as f32, 0x61 as f32, 0x49 as f32] };
    let k = t.abs();
    let mix = |i: usize| (grey[i] + (end[i] - grey[i]) * k).round() as u8;
    Color32::from_rgb(mix(0), mix(1), mix(2))
}

/// One full-width bar split into segments proportional to `parts`.
fn proportion_bar(ui: &mut egui::Ui, parts: &[(f64, Color32)]) {
    let width = ui.available_width().max(100.0);
    let (rect, _) = ui.allocate_exact_size(Vec2::new(width, BAR_H), Sense::hover());
    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 3.0, ui.visuals().extreme_bg_color);

    let mut x = rect.left();
    for &(share, color) in parts {
        let w = (share as f32) * rect.width();
        if w <= 0.0 {
            continue;
        }
        let seg = Rect::from_min_size(Pos2::new(x, rect.top()), Vec2::new(w, rect.height()));
        painter.rect_filled(seg, 0.0, color);
        x += w;
    }
}

fn legend_swatch(ui: &mut egui::Ui, color: Color32) {
    let (rect, _) = ui.allocate_exact_size(Vec2::splat(12.0), Sense::hover());
    ui.painter().rect_filled(rect, 2.0, color);
}

fn pct(share: f64) -> String {
    format!("{:.1}%", share * 100.0)
}

pub fn draw_sentiment(ui: &mut egui::Ui, app: &mut App) {
    let agg = &app.aggregates;
    ui.heading(format!("Sentiment distribution ({} nicknames)", agg.matched));

    if agg.matched == 0 {
        ui.label("Nothing to chart: no nicknames match the current filters.");
        return;
    }

    // --- By label ---
    ui.add_space(6.0);
    ui.label(RichText::new("By label").strong());
    let parts: Vec<(f64, Color32)> = agg
        .sentiment_breakdown
        .iter()
        .map(|(s, n)| (agg.share(*n), label_color(*s)))
        .collect();
    proportion_bar(ui, &parts);
    ui.horizontal_wrapped(|ui| {
        for (s, n) in &agg.sentiment_breakdown {
            legend_swatch(ui, label_color(*s));
            let name = s.map(|s| s.label()).unwrap_or("Unscored");
            ui.label(format!("{name}: {n} ({})", pct(agg.share(*n))));
            ui.add_space(10.0);
        }
    });

    // --- By score ---
    ui.add_space(12.0);
    ui.label(RichText::new("By score").strong());

    // Bar and legend go low → high so the colour ramp reads left to right.
    let mut by_score: Vec<&ScoreCount> = agg.score_distribution.iter().collect();
    by_score.sort_by(|a, b| match (a.score, b.score) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });

    let parts: Vec<(f64, Color32)> = by_score
        .iter()
        .map(|sc| (agg.share(sc.count), score_color(sc.score)))
        .collect();
    proportion_bar(ui, &parts);

    ui.add_space(4.0);
    egui::ScrollArea::vertical().id_salt("score_legend").show(ui, |ui| {
        egui::Grid::new("score_grid").striped(true).num_columns(4).show(ui, |ui| {
            ui.label(RichText::new("").strong());
            ui.label(RichText::new("Score").strong());
            ui.label(RichText::new("Count").strong());
            ui.label(RichText::new("Share").strong());
            ui.end_row();
            for sc in by_score {
                legend_swatch(ui, score_color(sc.score));
                ui.label(sc.score.map(format_score).unwrap_or_else(|| s!("(none)")));
                ui.label(sc.count.to_string());
                ui.label(pct(agg.share(sc.count)));
                ui.end_row();
            }
        });
    });
}

pub fn draw_sources(ui: &mut egui::Ui, app: &mut App) {
    let agg = &app.aggregates;
    let top_n = app.state.options.dashboard.top_n;
    ui.heading(format!("Top {top_n} specific sources"));

    if agg.top_sources.is_empty() {
        ui.label("Nothing to chart: no nicknames match the current filters.");
        return;
    }

    let max = agg.top_sources.iter().map(|(_, n)| *n).max().unwrap_or(1).max(1);
    let bar_color = ui.visuals().selection.bg_fill;
    let text_color = ui.visuals().strong_text_color();

    ui.add_space(6.0);
    egui::Grid::new("top_sources").num_columns(2).spacing([12.0, 6.0]).show(ui, |ui| {
        for (name, n) in &agg.top_sources {
            ui.label(name);

            let width = (ui.available_width() - 8.0).max(120.0);
            let (rect, resp) = ui.allocate_exact_size(Vec2::new(width, BAR_H - 6.0), Sense::hover());
            let painter = ui.painter_at(rect);
            let w = rect.width() * (*n as f32 / max as f32);
            painter.rect_filled(Rect::from_min_size(rect.min, Vec2::new(w, rect.height())), 2.0, bar_color);
            painter.text(
                Pos2::new(rect.left() + 6.0, rect.center().y),
                Align2::LEFT_CENTER,
                n.to_string(),
                FontId::proportional(13.0),
                text_color,
            );
            resp.on_hover_text(format!("{name}: {n} ({})", pct(agg.share(*n))));
            ui.end_row();
        }
    });
}
