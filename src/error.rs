use thiserror::Error;

/// User-facing failures of the SBT viewer.
///
/// Numeric degeneracy (zero stresses, asymptotic boundaries) is not an
/// error: it either propagates as IEEE-754 infinity/NaN or is handled by
/// omitting boundary points.
#[derive(Debug, Error)]
pub enum SbtError {
    /// The input file could not be read or parsed. No dataset is installed.
    #[error("failed to load '{path}': {message}")]
    LoadFailure { path: String, message: String },

    /// A plot was requested before any non-empty dataset was loaded.
    #[error("No data to plot. Please load a file first.")]
    NoDataLoaded,

    /// Chart configuration is unreadable or out of range.
    #[error("config error: {0}")]
    Config(String),
}

pub type SbtResult<T> = Result<T, SbtError>;
