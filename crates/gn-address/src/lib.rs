//! # GN-Address: Address Generation Subsystem
//!
//! Privacy-preserving network identities binding a quantized geolocation to
//! a hybrid classical/post-quantum public key, a zero-knowledge proof of a
//! committed secret, and a time-bounded anti-replay nonce.
//!
//! ## Components
//!
//! | Module | Role |
//! |--------|------|
//! | `group` | Classical group capability surface (Ristretto) |
//! | `hybrid` | Hybrid key derivation (classical + Kyber seeding) |
//! | `geo` | Location quantization, precision policy, commitment |
//! | `proof` | Binds the opaque prover to a quantized location |
//! | `nonce` | Time-expiring anti-replay registry |
//! | `cache` | Bounded LRU of issued records |
//! | `identity` | Holder-side address with full key material |
//! | `orchestrator` | Single and batched concurrent issuance |
//! | `codec` | Binary and JSON wire forms of the issued record |
//!
//! ## Concurrency
//!
//! Issuance fans out four parallel sub-tasks (keys, geo+commitment, proof,
//! nonce) and joins all before assembling the record; batches run one
//! pipeline per coordinate under a shared in-flight bound. Failures are
//! terminal for the attempt, never retried, and never leave the cache or
//! nonce registry partially updated.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cache;
pub mod codec;
pub mod errors;
pub mod geo;
pub mod group;
pub mod hybrid;
pub mod identity;
pub mod nonce;
pub mod orchestrator;
pub mod proof;

// Re-exports
pub use cache::{AddressCache, DEFAULT_CACHE_CAPACITY};
pub use codec::AddressInfo;
pub use errors::AddressError;
pub use geo::{
    quantize, FixedPrecision, PrecisionPolicy, QuantizedLocation, DEFAULT_PRECISION_METERS,
};
pub use group::{GroupPoint, GroupScalar};
pub use hybrid::{generate_hybrid_keypair, HybridKeyPair};
pub use identity::NetworkAddress;
pub use nonce::{Nonce, NonceRegistry, NONCE_LIFETIME_SECS, NONCE_SIZE};
pub use orchestrator::{
    coordinate_key, AddressOrchestrator, OrchestratorConfig, DEFAULT_MAX_IN_FLIGHT,
};
pub use proof::{bind_proof, ProofArtifact};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    #[test]
    fn test_version() {
        assert!(!super::VERSION.is_empty());
    }
}
