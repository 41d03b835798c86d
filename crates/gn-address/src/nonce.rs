//! # Nonce Registry
//!
//! Time-expiring anti-replay tokens, one per address identity.
//!
//! Lifecycle per identity: absent → active (issue) → stale after the
//! lifetime elapses → removed by prune or overwritten by re-issue. A stale
//! entry fails validation even before prune removes it.

use crate::errors::AddressError;
use parking_lot::RwLock;
use rand::rngs::OsRng;
use rand::RngCore;
use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};

/// Nonce lifetime in seconds.
pub const NONCE_LIFETIME_SECS: i64 = 3600;

/// Nonce value size in bytes.
pub const NONCE_SIZE: usize = 32;

/// Anti-replay token bound to an identity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Nonce {
    /// Identity this nonce was issued to.
    pub owner: String,
    /// Random value.
    pub value: [u8; NONCE_SIZE],
    /// BLAKE3 hash of `owner || value`.
    pub hash: [u8; 32],
    /// Unix timestamp of issuance.
    pub issued_at: i64,
}

/// Concurrent-safe, time-expiring nonce store.
///
/// Reads (validation) take the shared lock; issuance and pruning take the
/// exclusive lock.
pub struct NonceRegistry {
    entries: RwLock<HashMap<String, Nonce>>,
    lifetime_secs: i64,
}

impl NonceRegistry {
    /// Registry with the default lifetime.
    pub fn new() -> Self {
        Self::with_lifetime(NONCE_LIFETIME_SECS)
    }

    /// Registry with a custom lifetime in seconds.
    pub fn with_lifetime(lifetime_secs: i64) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            lifetime_secs,
        }
    }

    /// Return the active nonce for `identity`, issuing a fresh one if none
    /// exists or the stored one has expired.
    pub fn issue_or_refresh(&self, identity: &str) -> Result<Nonce, AddressError> {
        let mut entries = self.entries.write();
        let now = unix_now();

        if let Some(existing) = entries.get(identity) {
            if now - existing.issued_at <= self.lifetime_secs {
                return Ok(existing.clone());
            }
        }

        let mut value = [0u8; NONCE_SIZE];
        OsRng
            .try_fill_bytes(&mut value)
            .map_err(|_| AddressError::Randomness)?;

        let nonce = Nonce {
            owner: identity.to_string(),
            value,
            hash: nonce_hash(identity, &value),
            issued_at: now,
        };
        entries.insert(identity.to_string(), nonce.clone());
        Ok(nonce)
    }

    /// True iff a stored nonce exists for `identity`, matches `candidate`
    /// byte-for-byte in both value and hash, and is still fresh.
    pub fn validate(&self, identity: &str, candidate: &Nonce) -> bool {
        let entries = self.entries.read();
        match entries.get(identity) {
            Some(stored) => {
                stored.value == candidate.value
                    && stored.hash == candidate.hash
                    && unix_now() - stored.issued_at <= self.lifetime_secs
            }
            None => false,
        }
    }

    /// Remove every entry older than the lifetime, validated or not.
    ///
    /// Intended to run periodically, decoupled from issuance.
    pub fn prune(&self) {
        let mut entries = self.entries.write();
        let now = unix_now();
        entries.retain(|_, nonce| now - nonce.issued_at <= self.lifetime_secs);
    }

    /// Number of stored entries, stale included.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// True if no entries are stored.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    #[cfg(test)]
    fn backdate(&self, identity: &str, issued_at: i64) {
        let mut entries = self.entries.write();
        if let Some(nonce) = entries.get_mut(identity) {
            nonce.issued_at = issued_at;
        }
    }
}

impl Default for NonceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Keyed hash binding a nonce value to its identity.
fn nonce_hash(identity: &str, value: &[u8]) -> [u8; 32] {
    let mut hasher = blake3::Hasher::new();
    hasher.update(identity.as_bytes());
    hasher.update(value);
    *hasher.finalize().as_bytes()
}

fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
