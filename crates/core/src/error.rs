//! Error types for the CRC engine and error analysis.
//!
//! Every fallible operation returns a structured error instead of
//! panicking or producing a best-effort value. Out-of-range error positions
//! are deliberately not represented here: the analysis skips them.

use thiserror::Error;

/// Top-level error type for all operations in the crate.
///
/// Each variant corresponds to a specific failure domain:
/// - Bit strings: parsing textual `0`/`1` input
/// - Polynomial: generator too short to divide by
/// - Distance: comparing sequences of different lengths
/// - CRC: nothing to divide
/// - Layout: inconsistent frame trailer description
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// Input text is not a pure bit string
    #[error("invalid bit string: {0}")]
    InvalidBitString(#[from] BitStringError),

    /// Polynomial has fewer than 2 bits once leading zeros are stripped
    #[error("invalid polynomial: {stripped_len} significant bit(s), need at least 2")]
    InvalidPolynomial { stripped_len: usize },

    /// Hamming distance requested between sequences of different lengths
    #[error("length mismatch: {left} bits vs {right} bits")]
    LengthMismatch { left: usize, right: usize },

    /// CRC requested over a frame with no bits
    #[error("cannot compute a CRC over an empty frame")]
    EmptyFrame,

    /// Frame layout widths do not nest
    #[error("invalid frame layout: {0}")]
    InvalidLayout(String),
}

/// Bit string parsing errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BitStringError {
    /// A character other than '0' or '1'
    #[error("unexpected character {found:?} at position {position}")]
    InvalidChar { position: usize, found: char },

    /// No bits where a value is required
    #[error("empty bit string")]
    Empty,
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;
