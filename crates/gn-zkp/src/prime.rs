//! Probable-prime generation.
//!
//! Miller-Rabin over `BigUint::modpow`. 30 rounds gives an error bound of
//! 4^-30 per candidate, far below the failure rate of the surrounding
//! hardware.

use num_bigint::{BigUint, RandBigInt};
use num_traits::{One, Zero};
use rand::rngs::OsRng;

/// Rounds of Miller-Rabin witnesses per candidate.
const MILLER_RABIN_ROUNDS: u32 = 30;

/// Small primes used for fast trial division before Miller-Rabin.
const SMALL_PRIMES: [u32; 15] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47];

/// Miller-Rabin primality test.
pub fn is_probable_prime(n: &BigUint) -> bool {
    let two = BigUint::from(2u32);
    if n < &two {
        return false;
    }
    for p in SMALL_PRIMES {
        let p = BigUint::from(p);
        if n == &p {
            return true;
        }
        if (n % &p).is_zero() {
            return false;
        }
    }

    // Write n - 1 as d * 2^s with d odd.
    let n_minus_one = n - BigUint::one();
    let s = n_minus_one.trailing_zeros().unwrap_or(0);
    let d = &n_minus_one >> s;

    let mut rng = OsRng;
    'witness: for _ in 0..MILLER_RABIN_ROUNDS {
        let a = rng.gen_biguint_range(&two, &n_minus_one);
        let mut x = a.modpow(&d, n);
        if x.is_one() || x == n_minus_one {
            continue;
        }
        for _ in 1..s {
            x = x.modpow(&two, n);
            if x == n_minus_one {
                continue 'witness;
            }
        }
        return false;
    }
    true
}

/// Generate a probable prime of exactly `bits` bits.
pub fn generate_prime(bits: u64) -> BigUint {
    debug_assert!(bits >= 2);
    let mut rng = OsRng;
    loop {
        let mut candidate = rng.gen_biguint(bits);
        // Force the top bit (exact bit length) and the low bit (odd).
        candidate |= BigUint::one() << (bits - 1);
        candidate |= BigUint::one();
        if is_probable_prime(&candidate) {
            return candidate;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_small_primes() {
        for p in [2u32, 3, 5, 7, 97, 101, 65537] {
            assert!(is_probable_prime(&BigUint::from(p)), "{p} is prime");
        }
    }

    #[test]
    fn test_known_composites() {
        // Includes Carmichael numbers 561 and 41041.
        for c in [0u32, 1, 4, 9, 91, 561, 41041, 65536] {
            assert!(!is_probable_prime(&BigUint::from(c)), "{c} is composite");
        }
    }

    #[test]
    fn test_generated_prime_has_exact_bit_length() {
        for bits in [32u64, 64, 128] {
            let p = generate_prime(bits);
            assert_eq!(p.bits(), bits);
            assert!(is_probable_prime(&p));
        }
    }
}
