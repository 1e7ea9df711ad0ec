use std::path::PathBuf;

use crate::chart::{build_chart, SbtChart};
use crate::config::ChartConfig;
use crate::data::loader::LoadTask;
use crate::data::model::Dataset;
use crate::error::SbtError;

pub const LOAD_OK_NOTICE: &str = "File loaded successfully!";
pub const LOAD_FAILED_NOTICE: &str = "Error loading file.";

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Loaded dataset (None until the first successful load).
    pub dataset: Option<Dataset>,

    /// File load running in the background, if any.
    pub pending: Option<LoadTask>,

    /// Chart built by the last successful plot request.
    pub chart: Option<SbtChart>,

    /// Blocking message the user has to acknowledge.
    pub notice: Option<String>,

    /// Error detail shown in the status bar.
    pub status_message: Option<String>,

    /// Whether the normalized-points table is shown.
    pub show_table: bool,

    pub config: ChartConfig,
}

impl AppState {
    pub fn new(config: ChartConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Whether a file loading operation is in progress.
    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Start loading `path` in the background. A load already in flight is
    /// abandoned.
    pub fn begin_load(&mut self, path: PathBuf) {
        log::info!("Loading {}", path.display());
        self.pending = Some(LoadTask::spawn(path));
    }

    /// Collect the result of a finished background load, if any.
    /// Returns `true` when state changed.
    pub fn poll_load(&mut self) -> bool {
        let Some(result) = self.pending.as_ref().and_then(LoadTask::try_take) else {
            return false;
        };
        self.pending = None;
        match result {
            Ok(dataset) => self.install_dataset(dataset),
            Err(e) => self.load_failed(e),
        }
        true
    }

    /// Replace the current dataset wholesale.
    pub fn install_dataset(&mut self, dataset: Dataset) {
        log::info!(
            "Loaded {} records from {}",
            dataset.len(),
            dataset.source.as_deref().unwrap_or("<memory>")
        );
        self.dataset = Some(dataset);
        self.status_message = None;
        self.notice = Some(LOAD_OK_NOTICE.to_string());
    }

    /// Report a failed load. The previous dataset stays plottable.
    pub fn load_failed(&mut self, error: SbtError) {
        log::error!("Failed to load file: {error}");
        self.status_message = Some(format!("Error: {error}"));
        self.notice = Some(LOAD_FAILED_NOTICE.to_string());
    }

    /// Rebuild the chart from the current dataset.
    pub fn request_plot(&mut self) {
        match build_chart(self.dataset.as_ref(), &self.config) {
            Ok(chart) => {
                log::info!("Plotted {} series", chart.series.len());
                self.chart = Some(chart);
            }
            Err(e) => {
                log::warn!("Plot request rejected: {e}");
                self.notice = Some(e.to_string());
            }
        }
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::SoundingRecord;

    fn dataset(qt: f64) -> Dataset {
        Dataset::new(vec![SoundingRecord {
            depth: 1.0,
            qt,
            fs: 2.0,
            u2: 0.0,
            sigma_vo_eff: 50.0,
        }])
    }

    fn load_error() -> SbtError {
        SbtError::LoadFailure {
            path: "bad.csv".to_string(),
            message: "broken".to_string(),
        }
    }

    #[test]
    fn test_plot_without_data() {
        let mut state = AppState::default();
        state.request_plot();
        assert!(state.chart.is_none());
        assert_eq!(
            state.notice.as_deref(),
            Some("No data to plot. Please load a file first.")
        );
    }

    #[test]
    fn test_install_replaces_dataset() {
        let mut state = AppState::default();
        state.install_dataset(dataset(100.0));
        state.install_dataset(dataset(200.0));
        let ds = state.dataset.as_ref().unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.records[0].qt, 200.0);
        assert_eq!(state.notice.as_deref(), Some(LOAD_OK_NOTICE));
    }

    #[test]
    fn test_failed_load_keeps_previous_dataset() {
        let mut state = AppState::default();
        state.install_dataset(dataset(100.0));
        state.dismiss_notice();

        state.load_failed(load_error());
        assert_eq!(state.notice.as_deref(), Some(LOAD_FAILED_NOTICE));
        assert!(state.status_message.is_some());
        assert_eq!(state.dataset.as_ref().unwrap().records[0].qt, 100.0);

        state.request_plot();
        let chart = state.chart.as_ref().unwrap();
        assert_eq!(chart.series[0].points.len(), 1);
    }

    #[test]
    fn test_plot_uses_latest_dataset() {
        let mut state = AppState::default();
        state.install_dataset(dataset(100.0));
        state.request_plot();
        state.install_dataset(dataset(200.0));
        state.request_plot();
        let (fr, qtn) = state.chart.as_ref().unwrap().series[0].points[0];
        assert!((qtn - 4.0).abs() < 1e-12);
        assert!((fr - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_poll_without_pending_load() {
        let mut state = AppState::default();
        assert!(!state.is_loading());
        assert!(!state.poll_load());
    }
}
