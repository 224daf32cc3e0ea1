//! Structured error types for vgrid.
//!
//! Nothing inside the engine itself is fatal: validation failures stay inline
//! in the edit session, stale results and unknown column keys are silent
//! no-ops, and out-of-range inputs clamp. Errors here cover the data boundary
//! only (loading rows, serializing derived state).

/// All errors that can occur loading data into or reading state out of the grid.
#[derive(Debug, thiserror::Error)]
pub enum VgridError {
    /// JSON (de)serialization error.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Two rows in a loaded dataset share the same id.
    #[error("duplicate row id: {0}")]
    DuplicateRowId(u64),

    /// Catch-all for string errors.
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, VgridError>;

impl From<String> for VgridError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for VgridError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}
