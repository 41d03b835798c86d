//! # Geo-Privacy Encoder
//!
//! Quantizes raw coordinates onto a coarse grid and commits to the result.
//!
//! Quantization is many-to-one by design: privacy comes from bucket
//! coarseness, and the mapping is not invertible back to the raw
//! coordinates. The commitment binds a quantized location to a holder's
//! scalar without revealing either.

use crate::errors::AddressError;
use crate::group::{GroupPoint, GroupScalar};
use crate::hybrid;

/// Meters per degree of latitude.
pub const METERS_PER_DEGREE_LATITUDE: f64 = 111_319.9;

/// Default grid precision in meters.
pub const DEFAULT_PRECISION_METERS: f64 = 100.0;

/// Discretized, anonymized location: a pair of signed grid indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct QuantizedLocation {
    lat_index: i64,
    lon_index: i64,
}

impl QuantizedLocation {
    /// Latitude grid index.
    pub fn lat_index(&self) -> i64 {
        self.lat_index
    }

    /// Longitude grid index.
    pub fn lon_index(&self) -> i64 {
        self.lon_index
    }

    /// Deterministic serialized form, used as hashing/commitment input.
    ///
    /// Stable field order: `[lat_index,lon_index]`.
    pub fn to_bytes(&self) -> Vec<u8> {
        format!("[{},{}]", self.lat_index, self.lon_index).into_bytes()
    }
}

/// Validate raw coordinates against their legal ranges.
pub fn validate_coordinates(lat: f64, lon: f64) -> Result<(), AddressError> {
    if !(-90.0..=90.0).contains(&lat) {
        return Err(AddressError::InvalidLatitude(lat));
    }
    if !(-180.0..=180.0).contains(&lon) {
        return Err(AddressError::InvalidLongitude(lon));
    }
    Ok(())
}

/// Quantize coordinates onto a grid of `precision_meters` cells.
///
/// Latitude index is `round(lat * meters-per-degree / precision)`; the
/// longitude factor shrinks with `cos(lat)` so cells stay roughly square.
pub fn quantize(
    lat: f64,
    lon: f64,
    precision_meters: f64,
) -> Result<QuantizedLocation, AddressError> {
    if precision_meters <= 0.0 {
        return Err(AddressError::InvalidPrecision(precision_meters));
    }

    let meters_per_degree_longitude = (lat * std::f64::consts::PI / 180.0).cos()
        * METERS_PER_DEGREE_LATITUDE;

    Ok(QuantizedLocation {
        lat_index: (lat * METERS_PER_DEGREE_LATITUDE / precision_meters).round() as i64,
        lon_index: (lon * meters_per_degree_longitude / precision_meters).round() as i64,
    })
}

/// Commit to a quantized location under a private scalar.
///
/// Runs the same fresh-KEM seeding procedure as hybrid key derivation, with
/// the location bytes standing in for the secret-key input to the seed hash,
/// then scalar-multiplies the derived point. Because a fresh Kyber keypair
/// seeds every commitment, two commitments to the same location are not
/// bit-identical; only their discrete-log relationship to the scalar is
/// meaningful.
pub fn commit_location(
    private: &GroupScalar,
    location_bytes: &[u8],
) -> Result<GroupPoint, AddressError> {
    let (quantum_public, _quantum_secret) = gn_kem::generate_keypair()?;
    let base = hybrid::derive_point_from_quantum(&quantum_public, location_bytes)?;
    Ok(base.mul(private))
}

/// Pluggable source of the quantization precision.
pub trait PrecisionPolicy: Send + Sync {
    /// Grid precision in meters for the next quantization.
    fn precision_meters(&self) -> Result<f64, AddressError>;
}

/// Fixed-precision policy.
#[derive(Clone, Copy, Debug)]
pub struct FixedPrecision {
    meters: f64,
}

impl FixedPrecision {
    /// Policy with a fixed precision in meters.
    pub fn new(meters: f64) -> Result<Self, AddressError> {
        if meters <= 0.0 {
            return Err(AddressError::InvalidPrecision(meters));
        }
        Ok(Self { meters })
    }
}

impl Default for FixedPrecision {
    fn default() -> Self {
        Self {
            meters: DEFAULT_PRECISION_METERS,
        }
    }
}

impl PrecisionPolicy for FixedPrecision {
    fn precision_meters(&self) -> Result<f64, AddressError> {
        Ok(self.meters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantize_reference_vector() {
        // NYC at 100m precision.
        let loc = quantize(40.7128, -74.0060, 100.0).unwrap();
        assert_eq!(loc.lat_index(), 45321);
        assert_eq!(loc.lon_index(), -62446);
    }

    #[test]
    fn test_quantize_is_many_to_one() {
        let a = quantize(40.71280, -74.00600, 100.0).unwrap();
        let b = quantize(40.71281, -74.00601, 100.0).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_quantize_rejects_bad_precision() {
        assert!(matches!(
            quantize(40.0, -74.0, 0.0),
            Err(AddressError::InvalidPrecision(_))
        ));
        assert!(matches!(
            quantize(40.0, -74.0, -5.0),
            Err(AddressError::InvalidPrecision(_))
        ));
    }

    #[test]
    fn test_validate_coordinates() {
        assert!(validate_coordinates(90.0, 180.0).is_ok());
        assert!(validate_coordinates(-90.0, -180.0).is_ok());
        assert!(matches!(
            validate_coordinates(91.0, 0.0),
            Err(AddressError::InvalidLatitude(_))
        ));
        assert!(matches!(
            validate_coordinates(-91.0, 0.0),
            Err(AddressError::InvalidLatitude(_))
        ));
        assert!(matches!(
            validate_coordinates(0.0, 181.0),
            Err(AddressError::InvalidLongitude(_))
        ));
        assert!(matches!(
            validate_coordinates(0.0, -181.0),
            Err(AddressError::InvalidLongitude(_))
        ));
    }

    #[test]
    fn test_location_bytes_are_stable() {
        let loc = quantize(40.7128, -74.0060, 100.0).unwrap();
        assert_eq!(loc.to_bytes(), b"[45321,-62446]".to_vec());
        assert_eq!(loc.to_bytes(), loc.to_bytes());
    }

    #[test]
    fn test_commitment_binds_to_scalar() {
        let loc = quantize(40.7128, -74.0060, 100.0).unwrap();
        let scalar = GroupScalar::random();
        let commitment = commit_location(&scalar, &loc.to_bytes()).unwrap();
        // Non-degenerate and encodable.
        assert_eq!(commitment.to_bytes().len(), 32);
    }

    #[test]
    fn test_commitments_are_fresh_per_call() {
        let loc = quantize(40.7128, -74.0060, 100.0).unwrap();
        let scalar = GroupScalar::random();
        let c1 = commit_location(&scalar, &loc.to_bytes()).unwrap();
        let c2 = commit_location(&scalar, &loc.to_bytes()).unwrap();
        // Fresh KEM seeding per commitment: same inputs, different points.
        assert_ne!(c1, c2);
    }

    #[test]
    fn test_fixed_precision_policy() {
        assert_eq!(FixedPrecision::default().precision_meters().unwrap(), 100.0);
        assert_eq!(
            FixedPrecision::new(250.0).unwrap().precision_meters().unwrap(),
            250.0
        );
        assert!(FixedPrecision::new(0.0).is_err());
    }
}
