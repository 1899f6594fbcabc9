//! Error types for horde generation.

use thiserror::Error;

/// Failures that stop a horde request before (or outside of) the search.
///
/// Degenerate tower setups are not errors: the search still runs and the
/// report is flagged infeasible instead.
#[derive(Debug, Error)]
pub enum HordeError {
    /// The enemy catalog has no archetypes to draw from.
    #[error("enemy catalog is empty")]
    EmptyCatalog,
    /// The route interpolated to no points.
    #[error("enemy route has no points (need at least two waypoints)")]
    EmptyPath,
    /// A generation parameter is outside its valid range.
    #[error("invalid parameters: {0}")]
    InvalidParams(String),
    /// The worker thread running a deadline-bound request panicked.
    #[error("horde worker thread panicked")]
    WorkerPanicked,
    /// Scenario or sink I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Scenario or sink JSON was malformed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias for horde operations.
pub type HordeResult<T> = Result<T, HordeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(HordeError::EmptyCatalog.to_string(), "enemy catalog is empty");
        let err = HordeError::InvalidParams("population_size must be positive".into());
        assert!(err.to_string().contains("population_size"));
    }
}
