use serde::{Deserialize, Serialize};

use crate::sbt::normalize::{normalize, NormalizedPoint};

// ---------------------------------------------------------------------------
// SoundingRecord – one depth sample of a CPTu sounding
// ---------------------------------------------------------------------------

/// One row of the source file. Units are taken as consistent and are not
/// validated; missing cells arrive as `NaN`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SoundingRecord {
    /// Depth below ground surface.
    pub depth: f64,
    /// Corrected cone resistance.
    pub qt: f64,
    /// Sleeve friction.
    pub fs: f64,
    /// Pore pressure behind the cone.
    pub u2: f64,
    /// Effective vertical stress.
    pub sigma_vo_eff: f64,
}

impl SoundingRecord {
    /// Column names recognized in input files, in file order.
    pub const COLUMNS: [&'static str; 5] = ["depth", "qt", "fs", "u2", "sigma_vo_eff"];

    /// Build a record from values ordered as [`Self::COLUMNS`].
    pub fn from_columns(values: [f64; 5]) -> Self {
        let [depth, qt, fs, u2, sigma_vo_eff] = values;
        Self {
            depth,
            qt,
            fs,
            u2,
            sigma_vo_eff,
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset – the sounding currently loaded
// ---------------------------------------------------------------------------

/// The full set of records from one successfully loaded file.
///
/// A dataset is never merged or edited: loading another file produces a new
/// `Dataset` that replaces this one wholesale.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    /// Records in file order.
    pub records: Vec<SoundingRecord>,
    /// File name the records were read from, if any.
    pub source: Option<String>,
}

impl Dataset {
    pub fn new(records: Vec<SoundingRecord>) -> Self {
        Self {
            records,
            source: None,
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Normalized (Fr, Qtn) coordinates for every record, recomputed on each call.
    pub fn normalized(&self) -> Vec<NormalizedPoint> {
        normalize(&self.records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_columns_order() {
        let r = SoundingRecord::from_columns([1.5, 100.0, 2.0, 30.0, 50.0]);
        assert_eq!(r.depth, 1.5);
        assert_eq!(r.qt, 100.0);
        assert_eq!(r.fs, 2.0);
        assert_eq!(r.u2, 30.0);
        assert_eq!(r.sigma_vo_eff, 50.0);
    }

    #[test]
    fn test_dataset_len_and_source() {
        let ds = Dataset::new(vec![SoundingRecord::from_columns([0.0; 5])]).with_source("a.csv");
        assert_eq!(ds.len(), 1);
        assert!(!ds.is_empty());
        assert_eq!(ds.source.as_deref(), Some("a.csv"));
        assert!(Dataset::default().is_empty());
    }
}
