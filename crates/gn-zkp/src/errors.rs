//! Prover error types.

use thiserror::Error;

/// Zero-knowledge prover errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ZkpError {
    /// Requested modulus is too small for a meaningful proof
    #[error("bit length {0} below minimum {1}")]
    BitLengthTooSmall(u32, u32),

    /// Secret hash is not valid hex
    #[error("secret hash is not valid hex")]
    InvalidSecretHash,

    /// Secret reduces to zero modulo the group order
    #[error("secret is degenerate for the chosen modulus")]
    DegenerateSecret,
}
