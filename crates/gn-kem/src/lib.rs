//! # GN-KEM: Post-Quantum Key Encapsulation
//!
//! Kyber-512 KEM behind fixed-size byte interfaces.
//!
//! The rest of the system treats this crate as an opaque service: it hands
//! out byte blobs of known sizes and never exposes the backing
//! implementation's types. Sizes match the Kyber-512 parameter set
//! (800-byte public keys, 1632-byte secret keys, 768-byte ciphertexts,
//! 32-byte shared secrets).

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;

pub use errors::KemError;

use pqcrypto_kyber::kyber512;
use pqcrypto_traits::kem::{
    Ciphertext as _, PublicKey as _, SecretKey as _, SharedSecret as _,
};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Public key size in bytes (Kyber-512).
pub const PUBLIC_KEY_SIZE: usize = 800;
/// Secret key size in bytes (Kyber-512).
pub const SECRET_KEY_SIZE: usize = 1632;
/// Ciphertext size in bytes (Kyber-512).
pub const CIPHERTEXT_SIZE: usize = 768;
/// Shared secret size in bytes.
pub const SHARED_SECRET_SIZE: usize = 32;

/// Kyber-512 public key (800 bytes).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantumPublicKey([u8; PUBLIC_KEY_SIZE]);

impl QuantumPublicKey {
    /// Create from raw bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, KemError> {
        let arr: [u8; PUBLIC_KEY_SIZE] =
            bytes.try_into().map_err(|_| KemError::InvalidLength {
                kind: "public key",
                expected: PUBLIC_KEY_SIZE,
                actual: bytes.len(),
            })?;
        Ok(Self(arr))
    }

    /// Get raw bytes.
    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_SIZE] {
        &self.0
    }
}

/// Kyber-512 secret key (1632 bytes). Zeroized on drop.
#[derive(Debug, Clone, Zeroize, ZeroizeOnDrop)]
pub struct QuantumSecretKey([u8; SECRET_KEY_SIZE]);

impl QuantumSecretKey {
    /// Create from raw bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, KemError> {
        let arr: [u8; SECRET_KEY_SIZE] =
            bytes.try_into().map_err(|_| KemError::InvalidLength {
                kind: "secret key",
                expected: SECRET_KEY_SIZE,
                actual: bytes.len(),
            })?;
        Ok(Self(arr))
    }

    /// Get raw bytes.
    pub fn as_bytes(&self) -> &[u8; SECRET_KEY_SIZE] {
        &self.0
    }
}

/// KEM ciphertext (768 bytes).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ciphertext([u8; CIPHERTEXT_SIZE]);

impl Ciphertext {
    /// Create from raw bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, KemError> {
        let arr: [u8; CIPHERTEXT_SIZE] =
            bytes.try_into().map_err(|_| KemError::InvalidLength {
                kind: "ciphertext",
                expected: CIPHERTEXT_SIZE,
                actual: bytes.len(),
            })?;
        Ok(Self(arr))
    }

    /// Get raw bytes.
    pub fn as_bytes(&self) -> &[u8; CIPHERTEXT_SIZE] {
        &self.0
    }
}

/// Encapsulated shared secret (32 bytes). Zeroized on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SharedSecret([u8; SHARED_SECRET_SIZE]);

impl SharedSecret {
    /// Get raw bytes.
    pub fn as_bytes(&self) -> &[u8; SHARED_SECRET_SIZE] {
        &self.0
    }
}

/// Generate a fresh Kyber-512 keypair.
pub fn generate_keypair() -> Result<(QuantumPublicKey, QuantumSecretKey), KemError> {
    let (pk, sk) = kyber512::keypair();
    let public = QuantumPublicKey::from_bytes(pk.as_bytes())?;
    let secret = QuantumSecretKey::from_bytes(sk.as_bytes())?;
    Ok((public, secret))
}

/// Encapsulate against a public key, producing a ciphertext and shared secret.
pub fn encapsulate(public: &QuantumPublicKey) -> Result<(Ciphertext, SharedSecret), KemError> {
    let pk = kyber512::PublicKey::from_bytes(public.as_bytes())
        .map_err(|_| KemError::Primitive("malformed public key"))?;
    let (ss, ct) = kyber512::encapsulate(&pk);
    let ciphertext = Ciphertext::from_bytes(ct.as_bytes())?;
    let mut secret = [0u8; SHARED_SECRET_SIZE];
    secret.copy_from_slice(ss.as_bytes());
    Ok((ciphertext, SharedSecret(secret)))
}

/// Recover the shared secret from a ciphertext with the secret key.
pub fn decapsulate(
    secret: &QuantumSecretKey,
    ciphertext: &Ciphertext,
) -> Result<SharedSecret, KemError> {
    let sk = kyber512::SecretKey::from_bytes(secret.as_bytes())
        .map_err(|_| KemError::Primitive("malformed secret key"))?;
    let ct = kyber512::Ciphertext::from_bytes(ciphertext.as_bytes())
        .map_err(|_| KemError::Primitive("malformed ciphertext"))?;
    let ss = kyber512::decapsulate(&ct, &sk);
    let mut out = [0u8; SHARED_SECRET_SIZE];
    out.copy_from_slice(ss.as_bytes());
    Ok(SharedSecret(out))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keypair_sizes() {
        let (pk, sk) = generate_keypair().unwrap();
        assert_eq!(pk.as_bytes().len(), PUBLIC_KEY_SIZE);
        assert_eq!(sk.as_bytes().len(), SECRET_KEY_SIZE);
    }

    #[test]
    fn test_encapsulate_decapsulate_roundtrip() {
        let (pk, sk) = generate_keypair().unwrap();
        let (ct, ss_sender) = encapsulate(&pk).unwrap();
        let ss_receiver = decapsulate(&sk, &ct).unwrap();
        assert_eq!(ss_sender.as_bytes(), ss_receiver.as_bytes());
    }

    #[test]
    fn test_shared_secrets_differ_per_encapsulation() {
        let (pk, _sk) = generate_keypair().unwrap();
        let (_, ss1) = encapsulate(&pk).unwrap();
        let (_, ss2) = encapsulate(&pk).unwrap();
        assert_ne!(ss1.as_bytes(), ss2.as_bytes());
    }

    #[test]
    fn test_from_bytes_rejects_wrong_length() {
        let err = QuantumPublicKey::from_bytes(&[0u8; 10]).unwrap_err();
        assert!(matches!(err, KemError::InvalidLength { expected: 800, .. }));

        let err = QuantumSecretKey::from_bytes(&[0u8; 10]).unwrap_err();
        assert!(matches!(err, KemError::InvalidLength { expected: 1632, .. }));

        let err = Ciphertext::from_bytes(&[0u8; 10]).unwrap_err();
        assert!(matches!(err, KemError::InvalidLength { expected: 768, .. }));
    }

    #[test]
    fn test_decapsulate_wrong_key_gives_different_secret() {
        let (pk, _sk1) = generate_keypair().unwrap();
        let (_pk2, sk2) = generate_keypair().unwrap();
        let (ct, ss) = encapsulate(&pk).unwrap();
        // Kyber decapsulation with the wrong key yields an implicit-rejection
        // secret, not an error.
        let recovered = decapsulate(&sk2, &ct).unwrap();
        assert_ne!(ss.as_bytes(), recovered.as_bytes());
    }
}
