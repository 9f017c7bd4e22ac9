//! Errors raised at the configuration and transport boundaries.
//!
//! The paginate functions themselves never fail; only loading a config, running a
//! serialized job or decoding a page buffer can.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PagerError {
    #[error("Invalid page config: {0}")]
    InvalidConfig(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed page buffer: {0}")]
    BufferFormat(String),
}

pub type Result<T> = std::result::Result<T, PagerError>;
