use eframe::egui;

use crate::config::ChartConfig;
use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct SbtApp {
    pub state: AppState,
}

impl SbtApp {
    pub fn new(config: ChartConfig) -> Self {
        Self {
            state: AppState::new(config),
        }
    }
}

impl eframe::App for SbtApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.poll_load();
        if self.state.is_loading() {
            // Keep polling until the worker hands the dataset back.
            ctx.request_repaint();
        }

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Right side panel: normalized points ----
        if self.state.show_table {
            egui::SidePanel::right("table_panel")
                .default_width(420.0)
                .resizable(true)
                .show(ctx, |ui| {
                    table::points_table(ui, &self.state);
                });
        }

        // ---- Central panel: SBT chart ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::sbt_plot(ui, &self.state);
        });

        panels::notice_window(ctx, &mut self.state);
    }
}
