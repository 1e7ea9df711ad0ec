//! Soil Behavior Type (SBT) charting for CPTu soundings.
//!
//! Raw cone penetration records are normalized to (Fr, Qtn) pairs and drawn
//! on a log-log chart together with the CD = 70 and IB = k boundary curves.

pub mod app;
pub mod chart;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod sbt;
pub mod state;
pub mod ui;
