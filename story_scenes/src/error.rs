use std::path::PathBuf;

use thiserror::Error;

/// Failures while establishing a story. All of them are fatal at startup.
#[derive(Debug, Error)]
pub enum StoryError {
    #[error("cannot read story config {path}: {source}")]
    Io {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed story config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("story has no scenes")]
    Empty,
}
