//! Error types for flappy-sim.
//!
//! The simulation itself never fails; these cover the edges that touch the
//! outside world (score file, terminal).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FlappyError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Could not determine a local data directory")]
    NoDataDir,
}

pub type Result<T> = std::result::Result<T, FlappyError>;
