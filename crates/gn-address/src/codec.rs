//! # Address Codec
//!
//! Wire forms of the issued address record.
//!
//! Two boundaries:
//! - **Binary**: the pre-encoded string forms of public key, commitment and
//!   proof, concatenated with single zero-byte separators.
//! - **Structured (JSON)**: camelCase object with the four key/nonce fields
//!   base64-wrapped once more for transport safety; the proof string rides
//!   as-is (it is already hex-and-pipe).

use crate::errors::AddressError;
use base64::engine::general_purpose::{STANDARD, STANDARD_NO_PAD};
use base64::Engine as _;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Externally visible address record.
///
/// All fields are string-encoded: base64 (unpadded) group elements, base64
/// (padded) nonce bytes, and the `response|modulus` hex proof. Immutable
/// once constructed; cached entries are shared read-only and replaced whole
/// on regeneration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AddressInfo {
    /// Hybrid public key (unpadded base64 of the compressed point).
    pub public_key: String,
    /// Location commitment (unpadded base64 of the compressed point).
    pub location_commitment: String,
    /// Proof artifact, `hex(response)|hex(modulus)`.
    pub proof: String,
    /// Nonce value (padded base64 of 32 bytes).
    pub nonce_value: String,
    /// Nonce hash (padded base64 of 32 bytes).
    pub nonce_hash: String,
}

/// String form of a group element.
pub(crate) fn encode_group_element(bytes: &[u8]) -> String {
    STANDARD_NO_PAD.encode(bytes)
}

/// String form of nonce value/hash bytes.
pub(crate) fn encode_nonce_bytes(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

impl AddressInfo {
    /// Binary wire form: `publicKey || 0x00 || commitment || 0x00 || proof`.
    pub fn to_binary(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(
            self.public_key.len() + self.location_commitment.len() + self.proof.len() + 2,
        );
        buf.extend_from_slice(self.public_key.as_bytes());
        buf.push(0);
        buf.extend_from_slice(self.location_commitment.as_bytes());
        buf.push(0);
        buf.extend_from_slice(self.proof.as_bytes());
        buf
    }

    /// Decode the binary wire form.
    ///
    /// Fails with [`AddressError::MalformedRecord`] unless the input splits
    /// into exactly three zero-separated parts. The nonce fields do not
    /// travel in the binary form and come back empty.
    pub fn from_binary(data: &[u8]) -> Result<Self, AddressError> {
        let parts: Vec<&[u8]> = data.split(|b| *b == 0).collect();
        if parts.len() != 3 {
            return Err(AddressError::MalformedRecord(parts.len()));
        }
        let field = |bytes: &[u8]| {
            String::from_utf8(bytes.to_vec())
                .map_err(|_| AddressError::Encoding("binary field is not UTF-8".into()))
        };
        Ok(Self {
            public_key: field(parts[0])?,
            location_commitment: field(parts[1])?,
            proof: field(parts[2])?,
            nonce_value: String::new(),
            nonce_hash: String::new(),
        })
    }

    /// Structured JSON form.
    pub fn to_json(&self) -> Result<String, AddressError> {
        serde_json::to_string(self).map_err(|e| AddressError::Encoding(e.to_string()))
    }

    /// Decode the structured JSON form.
    pub fn from_json(data: &str) -> Result<Self, AddressError> {
        serde_json::from_str(data).map_err(|e| AddressError::Encoding(e.to_string()))
    }
}

#[derive(Serialize, Deserialize)]
struct WireAddressInfo {
    #[serde(rename = "publicKey")]
    public_key: String,
    #[serde(rename = "locationCommitment")]
    location_commitment: String,
    #[serde(rename = "zkpProof")]
    proof: String,
    #[serde(rename = "nonceValue")]
    nonce_value: String,
    #[serde(rename = "nonceHash")]
    nonce_hash: String,
}

impl Serialize for AddressInfo {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        WireAddressInfo {
            public_key: STANDARD.encode(&self.public_key),
            location_commitment: STANDARD.encode(&self.location_commitment),
            proof: self.proof.clone(),
            nonce_value: STANDARD.encode(&self.nonce_value),
            nonce_hash: STANDARD.encode(&self.nonce_hash),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for AddressInfo {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let wire = WireAddressInfo::deserialize(deserializer)?;
        let unwrap = |name: &str, value: &str| {
            let bytes = STANDARD
                .decode(value)
                .map_err(|e| D::Error::custom(format!("{name}: invalid base64: {e}")))?;
            String::from_utf8(bytes)
                .map_err(|_| D::Error::custom(format!("{name}: not valid UTF-8")))
        };
        Ok(Self {
            public_key: unwrap("publicKey", &wire.public_key)?,
            location_commitment: unwrap("locationCommitment", &wire.location_commitment)?,
            proof: wire.proof,
            nonce_value: unwrap("nonceValue", &wire.nonce_value)?,
            nonce_hash: unwrap("nonceHash", &wire.nonce_hash)?,
        })
    }
}
