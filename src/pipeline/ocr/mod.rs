pub mod types;
pub mod provider;

pub use types::*;
pub use provider::*;

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum OcrError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("OCR result is not valid JSON: {0}")]
    JsonParsing(String),

    #[error("OCR result contains no pages")]
    NoPages,

    #[error("Invalid page dimensions {width}x{height}")]
    InvalidPage { width: f64, height: f64 },

    #[error("OCR result not found at: {0}")]
    NotFound(PathBuf),
}
