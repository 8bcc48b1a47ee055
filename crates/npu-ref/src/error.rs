//! Error types for reference computations

use thiserror::Error;

/// Result type alias for reference computations
pub type Result<T> = std::result::Result<T, RefError>;

/// Errors raised at the edges of the reference layer
///
/// The arithmetic itself never fails; these variants report inputs that do
/// not satisfy an operator's shape contract, or compressed streams this codec
/// did not produce.
#[derive(Debug, Error)]
pub enum RefError {
    /// Buffer length does not match the shape it was paired with
    #[error("Shape mismatch for {what}: expected {expected} elements, got {actual}")]
    ShapeMismatch {
        /// Which operand was wrong
        what: &'static str,
        /// Elements the shape requires
        expected: usize,
        /// Elements supplied
        actual: usize,
    },

    /// Operator parameter out of range
    #[error("Invalid parameter: {reason}")]
    InvalidParam {
        /// Reason for failure
        reason: String,
    },

    /// Compressed stream ended before the decoder was done
    #[error("Truncated stream: needed {needed} bytes, have {available}")]
    Truncated {
        /// Bytes the decoder required
        needed: usize,
        /// Bytes actually present
        available: usize,
    },

    /// Element format not accepted by this operation
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(&'static str),

    /// Compressed stream does not follow the codec layout
    #[error("Malformed stream: {reason}")]
    MalformedStream {
        /// Reason for failure
        reason: String,
    },
}

impl RefError {
    /// Create a shape mismatch error
    pub fn shape_mismatch(what: &'static str, expected: usize, actual: usize) -> Self {
        Self::ShapeMismatch {
            what,
            expected,
            actual,
        }
    }

    /// Create an invalid parameter error
    pub fn invalid_param(reason: impl Into<String>) -> Self {
        Self::InvalidParam {
            reason: reason.into(),
        }
    }

    /// Create a malformed stream error
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedStream {
            reason: reason.into(),
        }
    }

    /// Check that `actual` equals `expected`
    ///
    /// # Errors
    ///
    /// Returns [`RefError::ShapeMismatch`] when the lengths differ.
    pub fn check_len(what: &'static str, expected: usize, actual: usize) -> Result<()> {
        if expected == actual {
            Ok(())
        } else {
            Err(Self::shape_mismatch(what, expected, actual))
        }
    }
}
