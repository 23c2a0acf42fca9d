use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Batch id {0} is out of range, expected 1 to 5")]
    InvalidBatchId(u8),

    #[error("Invalid image range {start}..{end}, expected start <= end <= {limit}")]
    InvalidRange { start: usize, end: usize, limit: usize },

    #[error("Invalid image count {count}, batch holds {limit} images")]
    InvalidCount { count: usize, limit: usize },

    #[error("Invalid batch: {0}")]
    InvalidBatch(String),

    #[error("Malformed batch file {path:?}: {reason}")]
    MalformedBatch { path: PathBuf, reason: String },

    #[error("IO error on {path:?}: {source}")]
    File { path: PathBuf, source: std::io::Error },

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Array shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),

    #[error("Plotting error: {0}")]
    Plot(String),
}

impl DatasetError {
    pub(crate) fn file(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| DatasetError::File { path, source }
    }
}
