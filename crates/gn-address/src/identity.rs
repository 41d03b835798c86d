//! # Holder-Side Network Address
//!
//! Full-material address record for the identity holder: retains the
//! private scalar and quantized location, unlike the string-encoded
//! [`AddressInfo`](crate::codec::AddressInfo) handed to callers.

use crate::codec::{self, AddressInfo};
use crate::errors::AddressError;
use crate::geo::{self, PrecisionPolicy, QuantizedLocation};
use crate::group::GroupPoint;
use crate::hybrid::{generate_hybrid_keypair, HybridKeyPair};
use crate::nonce::{Nonce, NonceRegistry};
use crate::orchestrator::coordinate_key;
use crate::proof::{bind_proof, ProofArtifact};

/// A network address with its full key material.
///
/// The commitment here binds the location to the holder's own private
/// scalar (sequential issuance semantics); a proof is attached lazily via
/// [`NetworkAddress::attach_proof`].
pub struct NetworkAddress {
    location: QuantizedLocation,
    commitment: GroupPoint,
    keys: HybridKeyPair,
    nonce: Nonce,
    proof: Option<ProofArtifact>,
}

impl NetworkAddress {
    /// Build a holder-side address for the given coordinates.
    pub fn new(
        lat: f64,
        lon: f64,
        policy: &dyn PrecisionPolicy,
        registry: &NonceRegistry,
    ) -> Result<Self, AddressError> {
        geo::validate_coordinates(lat, lon)?;

        let keys = generate_hybrid_keypair()?;
        let precision = policy.precision_meters()?;
        let location = geo::quantize(lat, lon, precision)?;
        let commitment = geo::commit_location(keys.private(), &location.to_bytes())?;
        let nonce = registry.issue_or_refresh(&coordinate_key(lat, lon))?;

        Ok(Self {
            location,
            commitment,
            keys,
            nonce,
            proof: None,
        })
    }

    /// Generate and attach a proof over the quantized location.
    pub fn attach_proof(&mut self, bits: u32) -> Result<&ProofArtifact, AddressError> {
        if bits == 0 {
            return Err(AddressError::InvalidProofBits);
        }
        let artifact = bind_proof(&self.location, bits)?;
        Ok(&*self.proof.insert(artifact))
    }

    /// Quantized location.
    pub fn location(&self) -> &QuantizedLocation {
        &self.location
    }

    /// Location commitment point.
    pub fn commitment(&self) -> &GroupPoint {
        &self.commitment
    }

    /// Hybrid key material.
    pub fn keys(&self) -> &HybridKeyPair {
        &self.keys
    }

    /// Issued anti-replay nonce.
    pub fn nonce(&self) -> &Nonce {
        &self.nonce
    }

    /// Attached proof, if any.
    pub fn proof(&self) -> Option<&ProofArtifact> {
        self.proof.as_ref()
    }

    /// String-encode into the external record. `None` until a proof has
    /// been attached.
    pub fn to_address_info(&self) -> Option<AddressInfo> {
        let proof = self.proof.as_ref()?;
        Some(AddressInfo {
            public_key: codec::encode_group_element(&self.keys.public().to_bytes()),
            location_commitment: codec::encode_group_element(&self.commitment.to_bytes()),
            proof: proof.to_wire(),
            nonce_value: codec::encode_nonce_bytes(&self.nonce.value),
            nonce_hash: codec::encode_nonce_bytes(&self.nonce.hash),
        })
    }
}
