use thiserror::Error;

/// Errors produced by the conversion engine.
///
/// Every variant maps to one [`ErrorKind`]; boundary code matches on the
/// kind and never on the message text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Missing or malformed required input (no image, no text, ragged glyph table).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Grid dimensions are zero or above the configured cap.
    #[error("Invalid dimensions: {cols}×{rows}")]
    InvalidDimension {
        /// Requested columns.
        cols: u32,
        /// Requested rows.
        rows: u32,
    },

    /// Empty palette, or a palette name that does not exist.
    #[error("Invalid palette: {0}")]
    InvalidPalette(String),

    /// The image decoder could not parse the payload.
    #[error("Could not decode image: {0}")]
    DecodeFailure(String),
}

/// Fieldless discriminant of [`CoreError`].
///
/// # Example
/// ```
/// use bp_core::error::{CoreError, ErrorKind};
/// let err = CoreError::InvalidDimension { cols: 0, rows: 4 };
/// assert_eq!(err.kind(), ErrorKind::InvalidDimension);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidInput,
    InvalidDimension,
    InvalidPalette,
    DecodeFailure,
}

impl CoreError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::InvalidDimension { .. } => ErrorKind::InvalidDimension,
            Self::InvalidPalette(_) => ErrorKind::InvalidPalette,
            Self::DecodeFailure(_) => ErrorKind::DecodeFailure,
        }
    }
}

impl ErrorKind {
    /// Stable snake_case label, used in JSON error bodies.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InvalidInput => "invalid_input",
            Self::InvalidDimension => "invalid_dimension",
            Self::InvalidPalette => "invalid_palette",
            Self::DecodeFailure => "decode_failure",
        }
    }
}

/// Result alias for the engine crates.
pub type Result<T> = std::result::Result<T, CoreError>;
