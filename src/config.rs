use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{SbtError, SbtResult};
use crate::sbt::boundary::{FR_GRID_END, FR_GRID_RATIO, FR_GRID_START};

/// Environment variable naming an optional JSON chart configuration.
pub const CONFIG_ENV_VAR: &str = "CPTU_SBT_CONFIG";

// ---------------------------------------------------------------------------
// Chart configuration
// ---------------------------------------------------------------------------

/// Line pattern of a boundary curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineDash {
    Solid,
    Dash,
    Dot,
}

/// One member of the IB boundary family and how it is drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IbCurveStyle {
    pub ib: f64,
    pub color: String,
    pub dash: LineDash,
}

/// Geometric Fr sampling grid used for all boundary curves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub start: f64,
    pub end: f64,
    pub ratio: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            start: FR_GRID_START,
            end: FR_GRID_END,
            ratio: FR_GRID_RATIO,
        }
    }
}

/// Everything the chart needs besides the data itself.
///
/// Defaults reproduce the standard chart: blue circular markers, a solid red
/// CD = 70 line, dashed green IB = 22 and dotted orange IB = 32.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub title: String,
    pub grid: GridConfig,
    /// Marker size of the data series, in points.
    pub marker_radius: f32,
    /// Width of every boundary line.
    pub line_width: f32,
    pub data_color: String,
    pub cd70_color: String,
    pub ib_curves: Vec<IbCurveStyle>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            title: "Robertson SBT Chart (Qtn vs. Fr)".to_string(),
            grid: GridConfig::default(),
            marker_radius: 3.0,
            line_width: 2.0,
            data_color: "blue".to_string(),
            cd70_color: "red".to_string(),
            ib_curves: vec![
                IbCurveStyle {
                    ib: 22.0,
                    color: "green".to_string(),
                    dash: LineDash::Dash,
                },
                IbCurveStyle {
                    ib: 32.0,
                    color: "orange".to_string(),
                    dash: LineDash::Dot,
                },
            ],
        }
    }
}

impl ChartConfig {
    /// Read a JSON configuration file. Missing fields take their defaults.
    pub fn load(path: &Path) -> SbtResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| SbtError::Config(format!("reading {}: {e}", path.display())))?;
        let config: Self = serde_json::from_str(&text)
            .map_err(|e| SbtError::Config(format!("parsing {}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    /// Configuration named by `CPTU_SBT_CONFIG`, or the defaults.
    pub fn from_env() -> Self {
        let Some(path) = std::env::var_os(CONFIG_ENV_VAR) else {
            return Self::default();
        };
        match Self::load(Path::new(&path)) {
            Ok(config) => {
                log::info!("Using chart config from {}", Path::new(&path).display());
                config
            }
            Err(e) => {
                log::warn!("{e}; falling back to default chart config");
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> SbtResult<()> {
        let g = &self.grid;
        if !(g.start > 0.0) {
            return Err(SbtError::Config(format!(
                "grid start must be positive, got {}",
                g.start
            )));
        }
        if !(g.ratio > 1.0) {
            return Err(SbtError::Config(format!(
                "grid ratio must be greater than 1, got {}",
                g.ratio
            )));
        }
        if !(g.end > g.start) || !g.end.is_finite() {
            return Err(SbtError::Config(format!(
                "grid end ({}) must be finite and greater than start ({})",
                g.end, g.start
            )));
        }
        Ok(())
    }
}
