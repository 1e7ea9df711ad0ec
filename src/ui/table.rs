use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::state::AppState;

const HEADERS: [&str; 6] = ["depth", "qt", "fs", "u2", "Qtn", "Fr (%)"];

/// Table of the loaded records with their normalized SBT coordinates.
pub fn points_table(ui: &mut Ui, state: &AppState) {
    ui.heading("Normalized points");
    ui.separator();

    let Some(dataset) = &state.dataset else {
        ui.label("No dataset loaded.");
        return;
    };

    let points = dataset.normalized();

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .columns(Column::auto().at_least(56.0), HEADERS.len())
        .header(20.0, |mut header| {
            for title in HEADERS {
                header.col(|ui: &mut Ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, points.len(), |mut row| {
                let p = &points[row.index()];
                for value in [p.depth, p.qt, p.fs, p.u2, p.qtn, p.fr] {
                    row.col(|ui: &mut Ui| {
                        ui.monospace(format_cell(value));
                    });
                }
            });
        });
}

/// Fixed-precision cell text; non-finite values are shown as-is.
fn format_cell(value: f64) -> String {
    if value.is_finite() {
        format!("{value:.3}")
    } else {
        format!("{value}")
    }
}
