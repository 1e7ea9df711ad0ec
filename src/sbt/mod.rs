//! SBT core: numeric transforms behind the chart.
//!
//! ```text
//!   SoundingRecord ──► normalize ──► NormalizedPoint (Fr, Qtn)
//!
//!   fr_grid ──► boundary_cd70      ──► "CD = 70"
//!          └──► boundary_ib(k, ..) ──► "IB = k"
//! ```

pub mod boundary;
pub mod normalize;

pub use boundary::{boundary_cd70, boundary_ib, default_fr_grid, fr_grid};
pub use normalize::{normalize, NormalizedPoint};
