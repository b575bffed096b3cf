use std::path::PathBuf;

use thiserror::Error;
use ttf_outline::{outline::DrawError, raw::ReadError};

/// Errors that end a `ttf-dump` command.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to load font: {0}")]
    Read(#[from] ReadError),
    #[error("failed to draw glyph: {0}")]
    Draw(#[from] DrawError),
    #[error("failed to write JSON: {0}")]
    Json(#[from] serde_json::Error),
}
