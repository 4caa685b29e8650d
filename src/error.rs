//! Error types for color table generation.

use thiserror::Error;

/// Result type alias using ColorGenError.
pub type Result<T> = std::result::Result<T, ColorGenError>;

/// Main error type for color table generation.
///
/// Every variant is fatal: the first error aborts the run and no output
/// document is produced.
#[derive(Error, Debug)]
pub enum ColorGenError {
    /// A structural rule of the input data was broken (e.g. a state ID that
    /// does not fit in 16 bits).
    #[error("Invariant violated: {0}")]
    InvariantViolation(String),

    /// A blockstate, model or texture could not be found in the asset source.
    #[error("Missing document: {0}")]
    MissingDocument(String),

    /// No blockstate variant condition matches a state's properties.
    #[error("No variant of {block} matches state {properties}")]
    UnresolvedVariant { block: String, properties: String },

    /// A texture could not be decoded.
    #[error("Failed to decode texture: {0}")]
    DecodeFailure(#[from] image::ImageError),

    /// Failed to parse JSON data.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to read a ZIP archive.
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A model could not be turned into texture/geometry information.
    #[error("Model resolution error: {0}")]
    ModelResolution(String),

    /// Model inheritance chain too deep (circular reference protection).
    #[error("Model inheritance too deep (possible circular reference): {0}")]
    ModelInheritanceTooDeep(String),

    /// Malformed row in the color override table.
    #[error("Invalid override table row {line}: {reason}")]
    InvalidOverride { line: usize, reason: String },

    /// The asset path is neither an archive nor a usable directory.
    #[error("Invalid asset source: {0}")]
    InvalidAssetSource(String),
}
