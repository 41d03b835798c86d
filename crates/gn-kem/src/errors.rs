//! KEM error types.

use thiserror::Error;

/// Key encapsulation errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KemError {
    /// Byte slice does not match the fixed size of the target type
    #[error("invalid {kind} length: expected {expected} bytes, got {actual}")]
    InvalidLength {
        /// Which object had the wrong size
        kind: &'static str,
        /// Required byte length
        expected: usize,
        /// Provided byte length
        actual: usize,
    },

    /// The backing Kyber implementation rejected its input
    #[error("post-quantum primitive failure: {0}")]
    Primitive(&'static str),
}
