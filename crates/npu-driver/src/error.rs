//! Error types for NPU driver operations

use npu_chip::ChipVariant;
use npu_ref::RefError;
use thiserror::Error;

/// Result type alias for driver operations
pub type Result<T> = std::result::Result<T, DriverError>;

/// Errors that can occur while submitting work to a backend
#[derive(Debug, Error)]
pub enum DriverError {
    /// No device at the requested index
    #[error("Device not found: index {index}")]
    DeviceNotFound {
        /// Requested device index
        index: usize,
    },

    /// Backend or command buffer in an invalid state
    #[error("Device in invalid state: {state}")]
    InvalidState {
        /// Current state description
        state: String,
    },

    /// The variant has no unit for this instruction
    #[error("{variant} cannot execute {instruction}")]
    Unsupported {
        /// Variant the buffer was submitted to
        variant: ChipVariant,
        /// Instruction name
        instruction: &'static str,
    },

    /// Device output differs from the reference
    #[error("Mismatch in {what} at index {index}: got {got}, expected {expected}")]
    Mismatch {
        /// Which check failed
        what: String,
        /// First differing element
        index: usize,
        /// Device value
        got: String,
        /// Reference value
        expected: String,
    },

    /// Reference computation rejected its inputs
    #[error("Reference error: {source}")]
    Reference {
        /// Underlying reference error
        #[from]
        source: RefError,
    },
}

impl DriverError {
    /// Create an invalid state error
    pub fn invalid_state(state: impl Into<String>) -> Self {
        Self::InvalidState { state: state.into() }
    }

    /// Create a mismatch error from the first differing element
    pub fn mismatch(what: impl Into<String>, index: usize, got: impl std::fmt::Display, expected: impl std::fmt::Display) -> Self {
        Self::Mismatch {
            what: what.into(),
            index,
            got: got.to_string(),
            expected: expected.to_string(),
        }
    }
}
