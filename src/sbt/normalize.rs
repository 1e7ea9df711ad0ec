use serde::Serialize;

use crate::data::model::SoundingRecord;

/// A sounding record placed on the SBT chart.
///
/// `qtn` and `fr` are plain IEEE-754 quotients: a zero `sigma_vo_eff` or
/// `qt` yields an infinity or NaN here, and the log-scaled chart drops it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NormalizedPoint {
    pub depth: f64,
    pub qt: f64,
    pub fs: f64,
    pub u2: f64,
    /// Normalized cone resistance, `qt / sigma_vo_eff`.
    pub qtn: f64,
    /// Normalized friction ratio in percent, `100 * fs / qt`.
    pub fr: f64,
}

impl SoundingRecord {
    pub fn normalized(&self) -> NormalizedPoint {
        NormalizedPoint {
            depth: self.depth,
            qt: self.qt,
            fs: self.fs,
            u2: self.u2,
            qtn: self.qt / self.sigma_vo_eff,
            fr: (self.fs / self.qt) * 100.0,
        }
    }
}

/// Normalize every record, one output point per input record, in order.
pub fn normalize(records: &[SoundingRecord]) -> Vec<NormalizedPoint> {
    records.iter().map(SoundingRecord::normalized).collect()
}
