use crate::config::{ChartConfig, LineDash};
use crate::data::model::Dataset;
use crate::error::{SbtError, SbtResult};
use crate::sbt::{boundary_cd70, boundary_ib, fr_grid};

// ---------------------------------------------------------------------------
// Chart description handed to the renderer
// ---------------------------------------------------------------------------

/// How values map onto a plot axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisScale {
    Linear,
    Log,
}

impl AxisScale {
    /// Position of `value` in plot space, or `None` when it cannot be drawn
    /// (NaN, infinities, and non-positive values on a log axis).
    pub fn project(self, value: f64) -> Option<f64> {
        if !value.is_finite() {
            return None;
        }
        match self {
            AxisScale::Linear => Some(value),
            AxisScale::Log if value > 0.0 => Some(value.log10()),
            AxisScale::Log => None,
        }
    }

    /// Inverse of [`Self::project`].
    pub fn unproject(self, position: f64) -> f64 {
        match self {
            AxisScale::Linear => position,
            AxisScale::Log => 10f64.powf(position),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    pub title: String,
    pub scale: AxisScale,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SeriesKind {
    /// Circular markers, no connecting line.
    Markers { radius: f32 },
    Line { width: f32, dash: LineDash },
}

/// One labelled series of (Fr, Qtn) points in data coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub kind: SeriesKind,
    /// SVG/CSS colour keyword.
    pub color: String,
    pub points: Vec<(f64, f64)>,
}

/// Complete, renderer-agnostic description of an SBT chart.
#[derive(Debug, Clone, PartialEq)]
pub struct SbtChart {
    pub title: String,
    pub x_axis: Axis,
    pub y_axis: Axis,
    /// Data scatter first, then the boundary lines.
    pub series: Vec<Series>,
}

impl SbtChart {
    pub fn series(&self, name: &str) -> Option<&Series> {
        self.series.iter().find(|s| s.name == name)
    }
}

// ---------------------------------------------------------------------------
// Orchestration
// ---------------------------------------------------------------------------

pub const DATA_SERIES: &str = "CPTu Data";
pub const CD70_SERIES: &str = "CD = 70";

/// Legend label of an IB boundary, e.g. `IB = 22`.
pub fn ib_series_name(ib: f64) -> String {
    format!("IB = {ib}")
}

/// Normalize the dataset and trace every boundary over the Fr grid.
///
/// Fails with [`SbtError::NoDataLoaded`] when there is nothing to plot.
pub fn build_chart(dataset: Option<&Dataset>, config: &ChartConfig) -> SbtResult<SbtChart> {
    let dataset = match dataset {
        Some(ds) if !ds.is_empty() => ds,
        _ => return Err(SbtError::NoDataLoaded),
    };

    let data_points: Vec<(f64, f64)> = dataset
        .normalized()
        .iter()
        .map(|p| (p.fr, p.qtn))
        .collect();

    let grid = fr_grid(config.grid.start, config.grid.end, config.grid.ratio);

    let mut series = Vec::with_capacity(2 + config.ib_curves.len());
    series.push(Series {
        name: DATA_SERIES.to_string(),
        kind: SeriesKind::Markers {
            radius: config.marker_radius,
        },
        color: config.data_color.clone(),
        points: data_points,
    });
    series.push(Series {
        name: CD70_SERIES.to_string(),
        kind: SeriesKind::Line {
            width: config.line_width,
            dash: LineDash::Solid,
        },
        color: config.cd70_color.clone(),
        points: boundary_cd70(&grid),
    });
    for style in &config.ib_curves {
        series.push(Series {
            name: ib_series_name(style.ib),
            kind: SeriesKind::Line {
                width: config.line_width,
                dash: style.dash,
            },
            color: style.color.clone(),
            points: boundary_ib(style.ib, &grid),
        });
    }

    for s in &series {
        log::debug!("series '{}': {} points", s.name, s.points.len());
    }

    Ok(SbtChart {
        title: config.title.clone(),
        x_axis: Axis {
            title: "Fr (%)".to_string(),
            scale: AxisScale::Log,
        },
        y_axis: Axis {
            title: "Qtn".to_string(),
            scale: AxisScale::Log,
        },
        series,
    })
}
