// src/error.rs

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EscherError {
    #[error("Unable to read image '{path}': {source}")]
    ImageRead {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("Unable to write image '{path}': {source}")]
    ImageWrite {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("Empty image ({width}x{height})")]
    EmptyImage { width: usize, height: usize },
    #[error("Non-RGB image: {0} (only 24-bit RGB is supported)")]
    UnsupportedPixelFormat(String),
    #[error("Dimension mismatch: source is {src_w}x{src_h}, destination is {dst_w}x{dst_h}")]
    DimensionMismatch {
        src_w: usize,
        src_h: usize,
        dst_w: usize,
        dst_h: usize,
    },
    #[error("Invalid pixel buffer: {0}")]
    InvalidBuffer(String),
    #[error("Failed to read config '{path}': {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EscherError>;
