//! Error type shared by the pipeline seams.
//!
//! Nothing here is fatal to a layout run: fetch errors degrade to empty
//! results and solver errors degrade the reported status.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("paper source failed: {0}")]
    Fetch(String),

    #[error("solver failed: {0}")]
    Solver(String),

    #[error("cannot read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Config(String),
}
