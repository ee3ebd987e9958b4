//! Error types for chromakit operations.

use std::io;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in chromakit operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error (file operations, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// PNG decoding error.
    #[error("PNG decoding error: {0}")]
    PngDecoding(#[from] png::DecodingError),

    /// PNG encoding error.
    #[error("PNG encoding error: {0}")]
    PngEncoding(#[from] png::EncodingError),

    /// Invalid dimensions for a pixel buffer.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// Pixel data length does not match the buffer dimensions.
    #[error("Pixel buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSizeMismatch {
        /// Bytes required by the dimensions.
        expected: usize,
        /// Bytes supplied.
        actual: usize,
    },

    /// Hex color string is not exactly six hex digits (optional leading `#`).
    #[error("Invalid hex color: {0:?}")]
    InvalidHex(String),

    /// Channel or percentage outside its valid domain.
    #[error("{field} = {value} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Name of the offending component.
        field: &'static str,
        /// Value that was supplied.
        value: f64,
        /// Inclusive lower bound.
        min: f64,
        /// Inclusive upper bound.
        max: f64,
    },

    /// Invalid input parameter.
    #[error("Invalid parameter: {parameter} = {value}")]
    InvalidParameter {
        /// Parameter name.
        parameter: &'static str,
        /// Offending value.
        value: String,
    },

    /// Palette scheme name not recognized.
    #[error("Unknown palette scheme: {0}")]
    UnknownScheme(String),

    /// Harmony name not recognized.
    #[error("Unknown harmony: {0}")]
    UnknownHarmony(String),

    /// Gradient direction not recognized.
    #[error("Unknown gradient direction: {0}")]
    UnknownDirection(String),

    /// Index past the end of a stored sequence.
    #[error("Index {index} out of range (len {len})")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Sequence length.
        len: usize,
    },

    /// Image layout the decoder cannot normalize to 8-bit RGBA.
    #[error("Unsupported image: {0}")]
    UnsupportedImage(String),

    /// Configuration parsing error with line number.
    #[error("configuration error at line {line}: {message}")]
    ConfigParse {
        /// Line number where the error occurred (1-indexed, 0 if unknown).
        line: usize,
        /// Error message describing the issue.
        message: String,
    },

    /// Configuration file not found.
    #[error("configuration file not found: {0}")]
    ConfigNotFound(String),
}

impl Error {
    /// Build an [`Error::OutOfRange`] for `value` outside `[min, max]`.
    pub(crate) fn out_of_range(field: &'static str, value: f64, min: f64, max: f64) -> Self {
        Self::OutOfRange {
            field,
            value,
            min,
            max,
        }
    }

    /// Whether the error was caused by something a user typed.
    ///
    /// Front ends use this to keep the last valid state instead of reporting.
    pub fn is_user_input(&self) -> bool {
        matches!(
            self,
            Error::InvalidHex(_)
                | Error::OutOfRange { .. }
                | Error::UnknownScheme(_)
                | Error::UnknownHarmony(_)
                | Error::UnknownDirection(_)
        )
    }
}
