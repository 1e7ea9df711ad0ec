use eframe::egui::{self, Align2, Color32, RichText, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        let plot_enabled = !state.is_loading();
        if ui
            .add_enabled(plot_enabled, egui::Button::new("Plot"))
            .clicked()
        {
            state.request_plot();
        }

        if ui
            .selectable_label(state.show_table, "Table")
            .clicked()
        {
            state.show_table = !state.show_table;
        }

        ui.separator();

        if state.is_loading() {
            ui.spinner();
            ui.label("Loading…");
        } else if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} records loaded from {}",
                ds.len(),
                ds.source.as_deref().unwrap_or("<memory>")
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Blocking notice
// ---------------------------------------------------------------------------

/// Centered message window that stays up until acknowledged.
pub fn notice_window(ctx: &egui::Context, state: &mut AppState) {
    let Some(message) = state.notice.clone() else {
        return;
    };

    let mut acknowledged = false;
    egui::Window::new("Notice")
        .collapsible(false)
        .resizable(false)
        .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui: &mut Ui| {
            ui.label(&message);
            ui.add_space(8.0);
            ui.vertical_centered(|ui: &mut Ui| {
                if ui.button("OK").clicked() {
                    acknowledged = true;
                }
            });
        });

    if acknowledged {
        state.dismiss_notice();
    }
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open CPTu sounding")
        .add_filter("Supported files", &["csv", "txt", "tsv", "json", "parquet", "pq"])
        .add_filter("Delimited text", &["csv", "txt", "tsv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.begin_load(path);
    }
}
