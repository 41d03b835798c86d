//! # Classical Group (Ristretto)
//!
//! Capability-bounded wrapper around the Ristretto group over Curve25519:
//! scalar generation, point addition, scalar multiplication, canonical
//! 32-byte marshaling, and deterministic point derivation from a seed.
//! Everything the address subsystem needs from an elliptic-curve group and
//! nothing else, so the concrete curve stays a one-module decision.

use crate::errors::AddressError;
use curve25519_dalek::ristretto::{CompressedRistretto, RistrettoPoint};
use curve25519_dalek::scalar::Scalar;
use rand::rngs::OsRng;

/// Canonical encoded size of a group element (compressed Ristretto).
pub const POINT_SIZE: usize = 32;

/// Private scalar in the group's scalar field.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct GroupScalar(Scalar);

impl GroupScalar {
    /// Generate a uniformly random scalar.
    pub fn random() -> Self {
        Self(Scalar::random(&mut OsRng))
    }

    /// Canonical 32-byte little-endian encoding.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0.to_bytes()
    }

    pub(crate) fn inner(&self) -> &Scalar {
        &self.0
    }
}

impl std::fmt::Debug for GroupScalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print secret scalar material.
        f.write_str("GroupScalar(..)")
    }
}

/// Group element (Ristretto point).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GroupPoint(RistrettoPoint);

impl GroupPoint {
    /// Base-point multiplication: the public point of `scalar`.
    pub fn mul_base(scalar: &GroupScalar) -> Self {
        Self(RistrettoPoint::mul_base(scalar.inner()))
    }

    /// Group addition law.
    pub fn add(&self, other: &GroupPoint) -> Self {
        Self(self.0 + other.0)
    }

    /// Scalar multiplication.
    pub fn mul(&self, scalar: &GroupScalar) -> Self {
        Self(self.0 * scalar.inner())
    }

    /// Deterministically derive a point from a seed.
    ///
    /// The seed is expanded to 64 uniform bytes with the BLAKE3 XOF and
    /// mapped to the group, so equal seeds always yield equal points.
    pub fn from_seed(seed: &[u8]) -> Self {
        let mut wide = [0u8; 64];
        blake3::Hasher::new()
            .update(seed)
            .finalize_xof()
            .fill(&mut wide);
        Self(RistrettoPoint::from_uniform_bytes(&wide))
    }

    /// Canonical 32-byte encoding.
    pub fn to_bytes(&self) -> [u8; POINT_SIZE] {
        self.0.compress().to_bytes()
    }

    /// Decode from canonical bytes, rejecting non-canonical encodings.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AddressError> {
        let compressed = CompressedRistretto::from_slice(bytes)
            .map_err(|_| AddressError::Encoding(format!("group element must be {POINT_SIZE} bytes")))?;
        compressed
            .decompress()
            .map(Self)
            .ok_or_else(|| AddressError::Encoding("non-canonical group element".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_from_seed_is_deterministic() {
        let a = GroupPoint::from_seed(b"seed material");
        let b = GroupPoint::from_seed(b"seed material");
        let c = GroupPoint::from_seed(b"other seed");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_marshal_roundtrip() {
        let scalar = GroupScalar::random();
        let point = GroupPoint::mul_base(&scalar);
        let restored = GroupPoint::from_bytes(&point.to_bytes()).unwrap();
        assert_eq!(point, restored);
    }

    #[test]
    fn test_from_bytes_rejects_bad_input() {
        assert!(GroupPoint::from_bytes(&[0u8; 16]).is_err());
        // All-ones is not a canonical Ristretto encoding.
        assert!(GroupPoint::from_bytes(&[0xFFu8; 32]).is_err());
    }

    #[test]
    fn test_addition_is_commutative() {
        let p = GroupPoint::from_seed(b"p");
        let q = GroupPoint::from_seed(b"q");
        assert_eq!(p.add(&q), q.add(&p));
    }

    #[test]
    fn test_scalar_mul_relates_to_base() {
        let s = GroupScalar::random();
        let via_base = GroupPoint::mul_base(&s);
        let generator = GroupPoint::mul_base(&GroupScalar(Scalar::ONE));
        assert_eq!(generator.mul(&s), via_base);
    }
}
