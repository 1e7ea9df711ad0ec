//! Boundary curves of the SBT chart.
//!
//! Both boundaries are traced over a geometric grid of Fr values so that the
//! sample density looks uniform on the logarithmic x axis.

/// First Fr sample of the default grid (%).
pub const FR_GRID_START: f64 = 0.1;
/// Upper bound of the default grid (%).
pub const FR_GRID_END: f64 = 10.0;
/// Growth factor between consecutive samples.
pub const FR_GRID_RATIO: f64 = 1.1;

/// Geometric sequence `start, start*ratio, start*ratio², …` while `<= end`.
///
/// Values are accumulated by repeated multiplication, so rounding near `end`
/// decides whether the last sample is kept. Returns an empty grid when the
/// sequence would never terminate.
pub fn fr_grid(start: f64, end: f64, ratio: f64) -> Vec<f64> {
    if !(start > 0.0) || !(ratio > 1.0) || end == f64::INFINITY {
        return Vec::new();
    }
    let mut values = Vec::new();
    let mut value = start;
    while value <= end {
        values.push(value);
        value *= ratio;
    }
    values
}

/// The 0.1 % – 10 % grid shared by all boundary curves.
pub fn default_fr_grid() -> Vec<f64> {
    fr_grid(FR_GRID_START, FR_GRID_END, FR_GRID_RATIO)
}

/// `Qtn = 11 + 70 / (1 + 0.06 Fr)^17`, one point per sample.
pub fn boundary_cd70(fr_values: &[f64]) -> Vec<(f64, f64)> {
    fr_values
        .iter()
        .map(|&fr| {
            let denom = (1.0 + 0.06 * fr).powi(17);
            (fr, 11.0 + 70.0 / denom)
        })
        .collect()
}

/// Curve of constant `IB = 100 (Qtn + 10) / (70 + Qtn Fr)`.
///
/// Solved for Qtn: `Qtn = (1000 - 70 IB) / (IB Fr - 100)`. Samples where the
/// denominator is exactly zero or where Qtn is not strictly positive are
/// omitted, leaving a gap in the polyline.
pub fn boundary_ib(ib: f64, fr_values: &[f64]) -> Vec<(f64, f64)> {
    let numerator = 1000.0 - 70.0 * ib;
    fr_values
        .iter()
        .filter_map(|&fr| {
            let denominator = ib * fr - 100.0;
            if denominator == 0.0 {
                return None;
            }
            let qtn = numerator / denominator;
            (qtn > 0.0).then_some((fr, qtn))
        })
        .collect()
}
