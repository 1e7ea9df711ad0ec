use std::ops::RangeInclusive;

use eframe::egui::Ui;
use egui_plot::{
    log_grid_spacer, Corner, GridMark, Legend, Line, LineStyle, MarkerShape, Plot, PlotPoint,
    Points,
};

use crate::chart::{AxisScale, SbtChart, Series, SeriesKind};
use crate::color::named_color;
use crate::config::LineDash;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// SBT plot (central panel)
// ---------------------------------------------------------------------------

/// Render the last plotted SBT chart in the central panel.
pub fn sbt_plot(ui: &mut Ui, state: &AppState) {
    let chart = match &state.chart {
        Some(chart) => chart,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                if state.dataset.is_some() {
                    ui.heading("Press Plot to draw the SBT chart");
                } else {
                    ui.heading("Open a CPTu file to begin  (File → Open…)");
                }
            });
            return;
        }
    };

    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(&chart.title);
    });

    let x_scale = chart.x_axis.scale;
    let y_scale = chart.y_axis.scale;

    Plot::new("sbt_plot")
        .legend(Legend::default().position(Corner::RightTop))
        .x_axis_label(chart.x_axis.title.clone())
        .y_axis_label(chart.y_axis.title.clone())
        .x_axis_formatter(move |mark, range| axis_tick(x_scale, mark, range))
        .y_axis_formatter(move |mark, range| axis_tick(y_scale, mark, range))
        .x_grid_spacer(log_grid_spacer(10))
        .y_grid_spacer(log_grid_spacer(10))
        .label_formatter(move |name: &str, value: &PlotPoint| {
            let fr = x_scale.unproject(value.x);
            let qtn = y_scale.unproject(value.y);
            if name.is_empty() {
                format!("Fr = {fr:.3} %\nQtn = {qtn:.2}")
            } else {
                format!("{name}\nFr = {fr:.3} %\nQtn = {qtn:.2}")
            }
        })
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for series in &chart.series {
                let points = plot_points(chart, series);
                let color = named_color(&series.color);
                match series.kind {
                    SeriesKind::Markers { radius } => {
                        plot_ui.points(
                            Points::new(points)
                                .name(&series.name)
                                .color(color)
                                .shape(MarkerShape::Circle)
                                .filled(true)
                                .radius(radius),
                        );
                    }
                    SeriesKind::Line { width, dash } => {
                        plot_ui.line(
                            Line::new(points)
                                .name(&series.name)
                                .color(color)
                                .width(width)
                                .style(line_style(dash)),
                        );
                    }
                }
            }
        });
}

/// Project a series into plot space, dropping points the axes cannot show.
fn plot_points(chart: &SbtChart, series: &Series) -> Vec<[f64; 2]> {
    series
        .points
        .iter()
        .filter_map(|&(x, y)| {
            Some([
                chart.x_axis.scale.project(x)?,
                chart.y_axis.scale.project(y)?,
            ])
        })
        .collect()
}

fn line_style(dash: LineDash) -> LineStyle {
    match dash {
        LineDash::Solid => LineStyle::Solid,
        LineDash::Dash => LineStyle::dashed_loose(),
        LineDash::Dot => LineStyle::dotted_dense(),
    }
}

/// Tick label in data units. On a log axis only whole decades are labelled.
fn axis_tick(scale: AxisScale, mark: GridMark, _range: &RangeInclusive<f64>) -> String {
    match scale {
        AxisScale::Linear => format!("{}", mark.value),
        AxisScale::Log => {
            let exponent = mark.value.round();
            if (mark.value - exponent).abs() > 1e-6 {
                return String::new();
            }
            let exponent = exponent as i32;
            let value = 10f64.powi(exponent);
            if exponent >= 0 {
                format!("{value}")
            } else {
                format!("{value:.*}", exponent.unsigned_abs() as usize)
            }
        }
    }
}
