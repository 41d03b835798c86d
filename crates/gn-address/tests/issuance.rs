//! End-to-end issuance tests across the public API.

use gn_address::{
    coordinate_key, AddressInfo, AddressOrchestrator, FixedPrecision, NetworkAddress,
    NonceRegistry, OrchestratorConfig,
};
use std::sync::Arc;

const BITS: u32 = 64;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("gn_address=debug")
        .with_test_writer()
        .try_init();
}

fn orchestrator() -> AddressOrchestrator {
    AddressOrchestrator::new(OrchestratorConfig::default()).unwrap()
}

#[tokio::test]
async fn issue_then_roundtrip_both_codecs() {
    init_tracing();
    let info = orchestrator().issue(40.7128, -74.0060, BITS).await.unwrap();

    // Binary form carries key, commitment and proof.
    let binary = info.to_binary();
    let decoded = AddressInfo::from_binary(&binary).unwrap();
    assert_eq!(decoded.public_key, info.public_key);
    assert_eq!(decoded.location_commitment, info.location_commitment);
    assert_eq!(decoded.proof, info.proof);

    // JSON form carries everything.
    let json = info.to_json().unwrap();
    let decoded = AddressInfo::from_json(&json).unwrap();
    assert_eq!(&decoded, info.as_ref());
}

#[tokio::test]
async fn issued_nonce_validates_against_registry() {
    init_tracing();
    let o = orchestrator();
    let lat = 51.5074;
    let lon = -0.1278;
    o.issue(lat, lon, BITS).await.unwrap();

    let key = coordinate_key(lat, lon);
    let nonce = o.nonces().issue_or_refresh(&key).unwrap();
    assert!(o.nonces().validate(&key, &nonce));
    assert!(!o.nonces().validate("somewhere else", &nonce));
}

#[tokio::test]
async fn batch_issuance_fills_cache_in_order() {
    init_tracing();
    let o = orchestrator();
    let coords = [
        (40.7128, -74.0060),
        (51.5074, -0.1278),
        (35.6762, 139.6503),
        (-33.8688, 151.2093),
    ];
    let batch = o.issue_batch(&coords, BITS).await.unwrap();
    assert_eq!(batch.len(), coords.len());
    assert_eq!(o.cached(), coords.len());

    for (i, &(lat, lon)) in coords.iter().enumerate() {
        let hit = o.issue(lat, lon, BITS).await.unwrap();
        assert!(Arc::ptr_eq(&batch[i], &hit));
    }
}

#[tokio::test]
async fn distinct_coordinates_yield_distinct_records() {
    init_tracing();
    let o = orchestrator();
    let a = o.issue(10.0, 10.0, BITS).await.unwrap();
    let b = o.issue(10.0, 10.1, BITS).await.unwrap();
    assert_ne!(a.public_key, b.public_key);
    assert_ne!(a.nonce_hash, b.nonce_hash);
}

#[test]
fn holder_record_and_orchestrated_record_agree_on_shape() {
    let registry = NonceRegistry::new();
    let policy = FixedPrecision::default();
    let mut address = NetworkAddress::new(40.7128, -74.0060, &policy, &registry).unwrap();
    address.attach_proof(BITS).unwrap();

    let info = address.to_address_info().unwrap();
    let parts: Vec<&str> = info.proof.split('|').collect();
    assert_eq!(parts.len(), 2);
    assert!(!info.public_key.is_empty());
    assert!(!info.location_commitment.is_empty());

    // The holder's nonce is the registry's nonce for that coordinate key.
    assert!(registry.validate(&coordinate_key(40.7128, -74.0060), address.nonce()));
}
