//! Schnorr-style proof of a committed secret.
//!
//! The prover fixes a fresh probable-prime modulus `p` of the requested bit
//! length and a generator, then proves knowledge of the secret exponent `s`
//! with a Fiat-Shamir challenge bound to the caller-supplied secret hash.
//! Callers treat the output as an opaque pair of integers: the blinded
//! response and the modulus it lives under.

use crate::errors::ZkpError;
use crate::prime::generate_prime;
use num_bigint::{BigUint, RandBigInt};
use num_traits::{One, Zero};
use rand::rngs::OsRng;
use sha2::{Digest, Sha256};

/// Minimum accepted modulus bit length.
pub const MIN_BIT_LENGTH: u32 = 16;

/// Proof artifact: the blinded response and the modulus it was computed under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Proof {
    /// Blinded response `k + c*s mod (p-1)`.
    pub response: BigUint,
    /// Prime modulus `p`.
    pub modulus: BigUint,
}

/// Proof-of-secret prover over a fresh prime modulus.
#[derive(Debug)]
pub struct Prover {
    modulus: BigUint,
    generator: BigUint,
    context: Vec<u8>,
}

impl Prover {
    /// Create a prover for a secret identified by its hex-encoded hash,
    /// with a modulus of `bits` bits.
    pub fn new(secret_hash_hex: &str, bits: u32) -> Result<Self, ZkpError> {
        if bits < MIN_BIT_LENGTH {
            return Err(ZkpError::BitLengthTooSmall(bits, MIN_BIT_LENGTH));
        }
        let context = hex::decode(secret_hash_hex).map_err(|_| ZkpError::InvalidSecretHash)?;
        let modulus = generate_prime(u64::from(bits));
        Ok(Self {
            modulus,
            generator: BigUint::from(2u32),
            context,
        })
    }

    /// Prime modulus chosen for this prover.
    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    /// Prove knowledge of `secret`, returning the two-integer artifact.
    pub fn prove(&self, secret: &BigUint) -> Result<Proof, ZkpError> {
        let order = &self.modulus - BigUint::one();
        let s = secret % &order;
        if s.is_zero() {
            return Err(ZkpError::DegenerateSecret);
        }

        let mut rng = OsRng;
        let k = rng.gen_biguint_below(&order);
        let commitment = self.generator.modpow(&k, &self.modulus);
        let challenge = self.challenge(&commitment) % &order;
        let response = (k + challenge * s) % &order;

        Ok(Proof {
            response,
            modulus: self.modulus.clone(),
        })
    }

    /// Fiat-Shamir challenge: H(commitment || secret hash).
    fn challenge(&self, commitment: &BigUint) -> BigUint {
        let mut hasher = Sha256::new();
        hasher.update(commitment.to_bytes_be());
        hasher.update(&self.context);
        BigUint::from_bytes_be(&hasher.finalize())
    }
}
