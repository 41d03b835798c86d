//! Address subsystem error types.

use gn_kem::KemError;
use gn_zkp::ZkpError;
use thiserror::Error;

/// Errors surfaced by address issuance and the codec boundary.
///
/// Input-validation variants (`InvalidLatitude`, `InvalidLongitude`,
/// `InvalidPrecision`, `InvalidProofBits`) are recoverable by the caller;
/// primitive failures are terminal for the attempted issuance and safe to
/// retry since issuance has no side effects on failure.
#[derive(Debug, Error)]
pub enum AddressError {
    /// Latitude outside [-90, 90]
    #[error("invalid latitude: {0}, must be between -90 and 90")]
    InvalidLatitude(f64),

    /// Longitude outside [-180, 180]
    #[error("invalid longitude: {0}, must be between -180 and 180")]
    InvalidLongitude(f64),

    /// Quantization precision must be positive
    #[error("precision must be greater than zero, got {0}")]
    InvalidPrecision(f64),

    /// Proof bit length must be positive
    #[error("proof bits must be positive")]
    InvalidProofBits,

    /// A native cryptographic primitive failed during key derivation
    #[error("key generation failed: {0}")]
    KeyGeneration(#[from] KemError),

    /// The proof collaborator rejected its input
    #[error("proof generation failed: {0}")]
    Proof(#[from] ZkpError),

    /// The OS randomness source failed
    #[error("randomness source failure")]
    Randomness,

    /// Binary record did not split into the expected fields
    #[error("malformed binary record: expected 3 zero-separated fields, found {0}")]
    MalformedRecord(usize),

    /// Structured encoding/decoding failed (bad base64, bad UTF-8, bad JSON)
    #[error("encoding error: {0}")]
    Encoding(String),

    /// A spawned issuance sub-task panicked or was cancelled
    #[error("issuance task aborted: {0}")]
    TaskAborted(String),
}
