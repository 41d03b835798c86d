//! # GN-ZKP: Proof of a Committed Secret
//!
//! Schnorr-style zero-knowledge prover over a fresh prime modulus.
//!
//! ## Components
//!
//! - `prime` - Miller-Rabin probable-prime generation
//! - `prover` - Proof generation (Fiat-Shamir, opaque two-integer artifact)
//!
//! Consumers see only the `(response, modulus)` pair; the challenge/response
//! protocol behind it is this crate's private business.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
pub mod prime;
pub mod prover;

pub use errors::ZkpError;
pub use prover::{Proof, Prover, MIN_BIT_LENGTH};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    #[test]
    fn test_version() {
        assert!(!super::VERSION.is_empty());
    }
}
