//! # Proof Binder
//!
//! Binds the opaque prover to a quantized location.
//!
//! The location's deterministic byte form is hashed with BLAKE3; the digest
//! doubles as the prover's secret integer and its context string.

use crate::errors::AddressError;
use crate::geo::QuantizedLocation;
use gn_zkp::Prover;
use num_bigint::BigUint;

/// Two-integer proof artifact over a quantized location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProofArtifact {
    /// Blinded response integer.
    pub response: BigUint,
    /// Prime modulus the response lives under.
    pub modulus: BigUint,
}

impl ProofArtifact {
    /// Wire form: `hex(response)|hex(modulus)`.
    pub fn to_wire(&self) -> String {
        format!(
            "{}|{}",
            self.response.to_str_radix(16),
            self.modulus.to_str_radix(16)
        )
    }
}

/// Prove knowledge of the secret committed to `location`.
///
/// `bits` is the modulus bit length requested from the prover; the
/// orchestrator has already rejected zero, and the prover enforces its own
/// minimum.
pub fn bind_proof(location: &QuantizedLocation, bits: u32) -> Result<ProofArtifact, AddressError> {
    let digest = blake3::hash(&location.to_bytes());
    let secret = BigUint::from_bytes_be(digest.as_bytes());

    let prover = Prover::new(&hex::encode(digest.as_bytes()), bits)?;
    let proof = prover.prove(&secret)?;

    Ok(ProofArtifact {
        response: proof.response,
        modulus: proof.modulus,
    })
}
