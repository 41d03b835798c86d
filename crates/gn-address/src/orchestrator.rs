//! # Address Orchestrator
//!
//! Coordinates hybrid key derivation, geo-privacy encoding, proof binding
//! and nonce issuance into single and batched address issuance.
//!
//! ## Issuance pipeline
//!
//! `issue` checks the LRU cache by coordinate key; on a miss it fans out
//! the four sub-operations as parallel worker tasks, joins all of them,
//! propagates the first failure (nothing is cached on failure), then
//! assembles and caches the record. Cache hits return the stored record
//! as-is, without re-deriving anything or refreshing the nonce: issuance
//! is at-most-once per coordinate, not a TTL cache.
//!
//! `issue_batch` runs one pipeline per coordinate with bounded in-flight
//! concurrency and all-or-nothing semantics.
//!
//! Two concurrent first-time callers for the same coordinates may both
//! miss and both do full work; the second store wins. Issuance is
//! idempotent in shape, not in value, and neither the cache nor the nonce
//! registry is ever left partially updated.

use crate::cache::{AddressCache, DEFAULT_CACHE_CAPACITY};
use crate::codec::{self, AddressInfo};
use crate::errors::AddressError;
use crate::geo::{self, FixedPrecision, PrecisionPolicy, DEFAULT_PRECISION_METERS};
use crate::group::GroupScalar;
use crate::hybrid::generate_hybrid_keypair;
use crate::nonce::{NonceRegistry, NONCE_LIFETIME_SECS};
use crate::proof::bind_proof;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::{JoinError, JoinHandle};
use tracing::{debug, info, warn};

/// Default bound on concurrently running issuance pipelines.
pub const DEFAULT_MAX_IN_FLIGHT: usize = 32;

/// Orchestrator tuning knobs.
#[derive(Clone, Debug)]
pub struct OrchestratorConfig {
    /// Issuance cache capacity in entries.
    pub cache_capacity: usize,
    /// Nonce lifetime in seconds.
    pub nonce_lifetime_secs: i64,
    /// Bound on concurrently running issuance pipelines in a batch.
    pub max_in_flight: usize,
    /// Quantization grid precision in meters.
    pub precision_meters: f64,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            nonce_lifetime_secs: NONCE_LIFETIME_SECS,
            max_in_flight: DEFAULT_MAX_IN_FLIGHT,
            precision_meters: DEFAULT_PRECISION_METERS,
        }
    }
}

/// Fixed-precision decimal cache key for a coordinate pair.
pub fn coordinate_key(lat: f64, lon: f64) -> String {
    format!("{lat:.6},{lon:.6}")
}

/// Issues privacy-preserving network addresses.
///
/// Cheap to clone; clones share the same cache, nonce registry and
/// concurrency limiter.
#[derive(Clone)]
pub struct AddressOrchestrator {
    nonces: Arc<NonceRegistry>,
    cache: Arc<AddressCache>,
    precision: Arc<dyn PrecisionPolicy>,
    limiter: Arc<Semaphore>,
}

impl AddressOrchestrator {
    /// Orchestrator with a fixed quantization precision from the config.
    pub fn new(config: OrchestratorConfig) -> Result<Self, AddressError> {
        let policy = FixedPrecision::new(config.precision_meters)?;
        Ok(Self::with_policy(config, Arc::new(policy)))
    }

    /// Orchestrator with a caller-supplied precision policy.
    pub fn with_policy(config: OrchestratorConfig, policy: Arc<dyn PrecisionPolicy>) -> Self {
        Self {
            nonces: Arc::new(NonceRegistry::with_lifetime(config.nonce_lifetime_secs)),
            cache: Arc::new(AddressCache::with_capacity(config.cache_capacity)),
            precision: policy,
            limiter: Arc::new(Semaphore::new(config.max_in_flight.max(1))),
        }
    }

    /// Nonce registry backing this orchestrator, for validation and
    /// periodic pruning.
    pub fn nonces(&self) -> &NonceRegistry {
        &self.nonces
    }

    /// Number of cached records.
    pub fn cached(&self) -> usize {
        self.cache.len()
    }

    /// Issue an address for the given coordinates.
    pub async fn issue(
        &self,
        lat: f64,
        lon: f64,
        proof_bits: u32,
    ) -> Result<Arc<AddressInfo>, AddressError> {
        geo::validate_coordinates(lat, lon)?;
        if proof_bits == 0 {
            return Err(AddressError::InvalidProofBits);
        }

        let key = coordinate_key(lat, lon);
        if let Some(hit) = self.cache.get(&key) {
            debug!(key = %key, "issuance cache hit");
            return Ok(hit);
        }
        debug!(key = %key, "issuance cache miss");

        // Four independent sub-operations fan out as parallel workers.
        let key_task: JoinHandle<Result<String, AddressError>> =
            tokio::task::spawn_blocking(|| {
                let keys = generate_hybrid_keypair()?;
                Ok(codec::encode_group_element(&keys.public().to_bytes()))
            });

        let policy = Arc::clone(&self.precision);
        let geo_task: JoinHandle<Result<String, AddressError>> =
            tokio::task::spawn_blocking(move || {
                let precision = policy.precision_meters()?;
                let location = geo::quantize(lat, lon, precision)?;
                // The commitment rides on its own fresh scalar, not the
                // issuance keypair's.
                let scalar = GroupScalar::random();
                let commitment = geo::commit_location(&scalar, &location.to_bytes())?;
                Ok(codec::encode_group_element(&commitment.to_bytes()))
            });

        let policy = Arc::clone(&self.precision);
        let proof_task: JoinHandle<Result<String, AddressError>> =
            tokio::task::spawn_blocking(move || {
                let precision = policy.precision_meters()?;
                let location = geo::quantize(lat, lon, precision)?;
                Ok(bind_proof(&location, proof_bits)?.to_wire())
            });

        let nonces = Arc::clone(&self.nonces);
        let nonce_key = key.clone();
        let nonce_task: JoinHandle<Result<(String, String), AddressError>> =
            tokio::task::spawn_blocking(move || {
                let nonce = nonces.issue_or_refresh(&nonce_key)?;
                Ok((
                    codec::encode_nonce_bytes(&nonce.value),
                    codec::encode_nonce_bytes(&nonce.hash),
                ))
            });

        let (keys, commitment, proof, nonce) =
            tokio::join!(key_task, geo_task, proof_task, nonce_task);

        // First failure in sub-operation order wins; nothing is cached.
        let public_key = flatten(keys)?;
        let location_commitment = flatten(commitment)?;
        let proof = flatten(proof)?;
        let (nonce_value, nonce_hash) = flatten(nonce)?;

        let info = Arc::new(AddressInfo {
            public_key,
            location_commitment,
            proof,
            nonce_value,
            nonce_hash,
        });
        self.cache.put(key, Arc::clone(&info));
        Ok(info)
    }

    /// Issue one address per coordinate, preserving input order.
    ///
    /// All-or-nothing: the first failure from any member is returned and
    /// every partial result is discarded. In-flight pipelines are bounded
    /// by the configured limiter.
    pub async fn issue_batch(
        &self,
        coordinates: &[(f64, f64)],
        proof_bits: u32,
    ) -> Result<Vec<Arc<AddressInfo>>, AddressError> {
        info!(count = coordinates.len(), "issuing address batch");

        let mut handles = Vec::with_capacity(coordinates.len());
        for &(lat, lon) in coordinates {
            let orchestrator = self.clone();
            handles.push(tokio::spawn(async move {
                let _permit = Arc::clone(&orchestrator.limiter)
                    .acquire_owned()
                    .await
                    .map_err(|_| AddressError::TaskAborted("issuance limiter closed".into()))?;
                orchestrator.issue(lat, lon, proof_bits).await
            }));
        }

        let mut addresses = Vec::with_capacity(handles.len());
        for handle in handles {
            match flatten(handle.await) {
                Ok(info) => addresses.push(info),
                Err(err) => {
                    warn!(error = %err, "batch member failed, discarding partial results");
                    return Err(err);
                }
            }
        }
        Ok(addresses)
    }
}

fn flatten<T>(joined: Result<Result<T, AddressError>, JoinError>) -> Result<T, AddressError> {
    match joined {
        Ok(inner) => inner,
        Err(err) => Err(AddressError::TaskAborted(err.to_string())),
    }
}
