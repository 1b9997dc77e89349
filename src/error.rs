use std::path::PathBuf;
use thiserror::Error;

use crate::layout::LayoutConsistencyError;

/// The main error type for sketchlayout operations.
#[derive(Debug, Error)]
pub enum SketchError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Layout invariant violated: {0}")]
    Layout(#[from] LayoutConsistencyError),

    #[error("Failed to parse canvas shapes from {path}: {source}")]
    CanvasParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to parse canvas shapes: {0}")]
    CanvasJson(#[source] serde_json::Error),

    #[error("Invalid shape at index {index}: {reason}")]
    InvalidShape { index: usize, reason: String },

    #[error("Failed to parse config from {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    #[error("Failed to write payload JSON to {path}: {source}")]
    PayloadWrite {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize JSON output: {0}")]
    JsonOutput(#[source] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed while traversing {path}: {source}")]
    BatchWalk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Output {output} for {path} was already written by {previous}")]
    OutputCollision {
        path: PathBuf,
        previous: PathBuf,
        output: PathBuf,
    },

    #[error("Batch finished with {failed} of {total} file(s) failing")]
    BatchFailed { failed: usize, total: usize },

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

impl SketchError {
    /// Returns true if the error is an internal layout invariant breach
    /// rather than bad input.
    pub fn is_layout_violation(&self) -> bool {
        matches!(self, SketchError::Layout(_))
    }
}
