//! Error types for the aquascan crate.

/// Errors that can occur while decoding and analyzing water imagery.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The image bytes could not be decoded.
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    /// The decoded buffer has zero pixels. A decode failure must surface as an
    /// error, never as a zero-filled image.
    #[error("decoded image is empty ({width}x{height})")]
    EmptyImage {
        /// Decoded width in pixels.
        width: u32,
        /// Decoded height in pixels.
        height: u32,
    },

    /// An I/O error occurred while reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file extension maps to no supported image format.
    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),

    /// A report could not be serialized or parsed.
    #[error("report serialization error: {0}")]
    Report(#[from] serde_json::Error),
}

/// A specialized `Result` type for this crate.
pub type Result<T> = std::result::Result<T, Error>;
