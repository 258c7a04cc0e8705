// RSA Prime Generation
// Produces probabilistic primes of a fixed bit length from OS randomness

use num_traits::One;
use tracing::{debug, trace};

use super::bigint::{from_bytes, is_probable_prime, RsaBigInt};
use super::entropy::{random_bytes, random_u8};
use crate::config::{validate_prime_bits, validate_prime_search, Config};
use crate::error::Result;

/// Generate a probable prime of exactly `bits` bits using the default
/// primality rounds and seed mixing
pub fn generate_prime(bits: usize) -> Result<RsaBigInt> {
    let config = Config::default();
    generate_prime_with(bits, config.primality_rounds, config.seed_adds_mask)
}

/// Generate a probable prime of exactly `bits` bits.
///
/// The candidate is the sum of between 1 and `seed_adds_mask` independent
/// random draws of `bits / 8` bytes, folded back into `bits` bits with the
/// top and bottom bits set. It is then walked upward by 2 until it passes
/// `rounds` rounds of Miller-Rabin. A walk that overflows `bits` bits starts
/// over with fresh randomness.
///
/// `rounds` and `seed_adds_mask` must both be non-zero, else
/// `RsaError::InvalidConfig`.
pub fn generate_prime_with(bits: usize, rounds: u32, seed_adds_mask: u8) -> Result<RsaBigInt> {
    validate_prime_bits(bits)?;
    validate_prime_search(rounds, seed_adds_mask)?;

    let mut attempts = 0u32;
    loop {
        attempts += 1;
        let mut candidate = random_candidate(bits, seed_adds_mask)?;

        let mut steps = 0u64;
        while candidate.bits() as usize == bits {
            if is_probable_prime(&candidate, rounds) {
                debug!(bits, attempts, steps, "found probable prime");
                return Ok(candidate);
            }
            candidate += 2u8;
            steps += 1;
        }

        trace!(bits, steps, "prime search ran past the bit length, reseeding");
    }
}

/// Draw an odd candidate with bit `bits - 1` set
fn random_candidate(bits: usize, seed_adds_mask: u8) -> Result<RsaBigInt> {
    // Number of draws to sum, in [1, mask]
    let adds = loop {
        let adds = random_u8()? & seed_adds_mask;
        if adds != 0 {
            break adds;
        }
    };

    let mut sum = RsaBigInt::default();
    for _ in 0..adds {
        sum += from_bytes(&random_bytes(bits / 8)?);
    }
    trace!(adds, "mixed prime seed");

    let top = RsaBigInt::one() << (bits - 1);
    let mut candidate = sum % (&top << 1);
    candidate |= &top;
    candidate |= RsaBigInt::one();

    Ok(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RsaError;
    use num_integer::Integer;

    #[test]
    fn test_prime_is_odd_and_sized() {
        for _ in 0..4 {
            let p = generate_prime_with(128, 20, 20).unwrap();
            assert!(p.is_odd());
            assert_eq!(p.bits(), 128);
            assert!(is_probable_prime(&p, 40));
        }
    }

    #[test]
    fn test_primes_are_independent() {
        let p = generate_prime_with(256, 20, 20).unwrap();
        let q = generate_prime_with(256, 20, 20).unwrap();
        assert_ne!(p, q);
    }

    #[test]
    fn test_small_mask() {
        // Mask of 1 means a single draw every time
        let p = generate_prime_with(64, 20, 1).unwrap();
        assert_eq!(p.bits(), 64);
        assert!(is_probable_prime(&p, 40));
    }

    #[test]
    fn test_rejects_bad_bit_length() {
        assert!(generate_prime_with(100, 20, 20).is_err());
        assert!(generate_prime_with(0, 20, 20).is_err());
    }

    #[test]
    fn test_rejects_zero_seed_mask() {
        // A zero mask would spin forever drawing a count of zero
        let result = generate_prime_with(64, 20, 0);
        assert!(matches!(result, Err(RsaError::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_zero_rounds() {
        let result = generate_prime_with(64, 0, 20);
        assert!(matches!(result, Err(RsaError::InvalidConfig(_))));
    }
}
