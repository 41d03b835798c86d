//! # Hybrid Key Service
//!
//! Classical/post-quantum hybrid key material.
//!
//! The public key is the sum of a classical public point and a point
//! deterministically derived from fresh Kyber key material: the service
//! self-encapsulates against the new Kyber public key (a seeding mechanism,
//! not a key exchange), hashes the shared secret together with the Kyber
//! secret key into a 32-byte seed, and maps that seed onto the group.

use crate::errors::AddressError;
use crate::group::{GroupPoint, GroupScalar};
use gn_kem::QuantumPublicKey;
use sha2::{Digest, Sha256};

/// Hybrid keypair: a classical private scalar and the combined public point.
#[derive(Clone)]
pub struct HybridKeyPair {
    private: GroupScalar,
    public: GroupPoint,
}

impl HybridKeyPair {
    /// Classical private scalar.
    pub fn private(&self) -> &GroupScalar {
        &self.private
    }

    /// Combined classical + quantum-derived public point.
    pub fn public(&self) -> &GroupPoint {
        &self.public
    }
}

/// Generate a fresh hybrid keypair.
///
/// Any failure of the post-quantum primitive surfaces as
/// [`AddressError::KeyGeneration`] and aborts the issuance.
pub fn generate_hybrid_keypair() -> Result<HybridKeyPair, AddressError> {
    let private = GroupScalar::random();
    let classical_public = GroupPoint::mul_base(&private);

    let (quantum_public, quantum_secret) = gn_kem::generate_keypair()?;
    let derived = derive_point_from_quantum(&quantum_public, quantum_secret.as_bytes())?;

    Ok(HybridKeyPair {
        private,
        public: classical_public.add(&derived),
    })
}

/// Derive a group point from quantum key material and arbitrary seed input.
///
/// Encapsulates against `quantum_public` for a fresh shared secret, then
/// hashes `shared secret || material` into the seed for the group's
/// deterministic point derivation. The encapsulation makes the output
/// nondeterministic even for fixed `material`; only the derivation from
/// seed to point is deterministic (see [`derive_group_point_from_seed`]).
pub fn derive_point_from_quantum(
    quantum_public: &QuantumPublicKey,
    material: &[u8],
) -> Result<GroupPoint, AddressError> {
    let (_ciphertext, shared_secret) = gn_kem::encapsulate(quantum_public)?;

    let mut hasher = Sha256::new();
    hasher.update(shared_secret.as_bytes());
    hasher.update(material);
    let seed: [u8; 32] = hasher.finalize().into();

    Ok(derive_group_point_from_seed(&seed))
}

/// Deterministic seed-to-point derivation: equal seeds yield equal points.
pub fn derive_group_point_from_seed(seed: &[u8]) -> GroupPoint {
    GroupPoint::from_seed(seed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_hybrid_keypair() {
        let keys = generate_hybrid_keypair().unwrap();
        // The hybrid public point must not collapse to the bare classical key.
        let classical = GroupPoint::mul_base(keys.private());
        assert_ne!(*keys.public(), classical);
    }

    #[test]
    fn test_keypairs_are_unique() {
        let a = generate_hybrid_keypair().unwrap();
        let b = generate_hybrid_keypair().unwrap();
        assert_ne!(a.public().to_bytes(), b.public().to_bytes());
    }

    #[test]
    fn test_seed_derivation_is_deterministic() {
        let seed = [7u8; 32];
        assert_eq!(
            derive_group_point_from_seed(&seed),
            derive_group_point_from_seed(&seed)
        );
    }

    #[test]
    fn test_quantum_derivation_is_fresh_per_call() {
        let (pk, sk) = gn_kem::generate_keypair().unwrap();
        let p1 = derive_point_from_quantum(&pk, sk.as_bytes()).unwrap();
        let p2 = derive_point_from_quantum(&pk, sk.as_bytes()).unwrap();
        // Each call encapsulates afresh, so the derived points differ.
        assert_ne!(p1, p2);
    }
}
