// RSA Big Integer Operations
// Wrapper around num-bigint for RSA-specific operations

use num_bigint::{BigInt, BigUint, RandBigInt, Sign};
use num_integer::Integer;
use num_traits::{One, Signed, ToPrimitive, Zero};
use rand::thread_rng;

/// RSA Big Integer type alias
pub type RsaBigInt = BigUint;

/// Primes used to reject most candidates before Miller-Rabin
const SMALL_PRIMES: [u32; 25] = [
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89,
    97,
];

/// Create a big integer from u64
pub fn from_u64(n: u64) -> RsaBigInt {
    RsaBigInt::from(n)
}

/// Create a big integer from bytes (big-endian, unsigned)
pub fn from_bytes(bytes: &[u8]) -> RsaBigInt {
    RsaBigInt::from_bytes_be(bytes)
}

/// Convert big integer to bytes (big-endian, unsigned).
///
/// The export is minimal: no leading zero byte, except that zero itself
/// exports as a single `0x00`.
pub fn to_bytes(n: &RsaBigInt) -> Vec<u8> {
    n.to_bytes_be()
}

/// Modular exponentiation: base^exp mod modulus
pub fn mod_pow(base: &RsaBigInt, exp: &RsaBigInt, modulus: &RsaBigInt) -> RsaBigInt {
    if modulus.is_one() {
        return RsaBigInt::zero();
    }
    base.modpow(exp, modulus)
}

/// Extended Euclidean Algorithm
/// Returns (gcd, x) such that a*x ≡ gcd (mod b)
fn extended_gcd(a: &BigInt, b: &BigInt) -> (BigInt, BigInt) {
    let (mut old_r, mut r) = (a.clone(), b.clone());
    let (mut old_x, mut x) = (BigInt::one(), BigInt::zero());

    while !r.is_zero() {
        let q = &old_r / &r;

        let next_r = &old_r - &q * &r;
        old_r = std::mem::replace(&mut r, next_r);

        let next_x = &old_x - &q * &x;
        old_x = std::mem::replace(&mut x, next_x);
    }

    (old_r, old_x)
}

/// Compute modular inverse: a^(-1) mod m
/// Returns None if inverse doesn't exist
pub fn mod_inverse(a: &RsaBigInt, m: &RsaBigInt) -> Option<RsaBigInt> {
    if m.is_zero() || m.is_one() {
        return None;
    }

    let a = BigInt::from_biguint(Sign::Plus, a % m);
    let m = BigInt::from_biguint(Sign::Plus, m.clone());

    let (gcd, x) = extended_gcd(&a, &m);
    if !gcd.is_one() {
        return None;
    }

    let mut result = x % &m;
    if result.is_negative() {
        result += &m;
    }

    result.to_biguint()
}

/// Greatest common divisor
pub fn gcd(a: &RsaBigInt, b: &RsaBigInt) -> RsaBigInt {
    a.gcd(b)
}

/// Miller-Rabin primality test, preceded by trial division by small primes.
/// Returns true if n is probably prime; a composite survives `iterations`
/// rounds with probability at most 4^-iterations.
pub fn is_probable_prime(n: &RsaBigInt, iterations: u32) -> bool {
    if let Some(small) = n.to_u32() {
        if small <= SMALL_PRIMES[SMALL_PRIMES.len() - 1] {
            return SMALL_PRIMES.contains(&small);
        }
    }

    if SMALL_PRIMES.iter().any(|&p| (n % p).is_zero()) {
        return false;
    }

    // Write n-1 as d * 2^s with d odd
    let n_minus_one = n - 1u8;
    let mut d = n_minus_one.clone();
    let mut s = 0u32;
    while d.is_even() {
        d >>= 1;
        s += 1;
    }

    // Witness loop
    let mut rng = thread_rng();
    let two = RsaBigInt::from(2u8);
    let n_minus_two = n - 2u8;

    'witness: for _ in 0..iterations {
        // Pick random witness a in [2, n-2)
        let a = rng.gen_biguint_range(&two, &n_minus_two);

        let mut x = mod_pow(&a, &d, n);
        if x.is_one() || x == n_minus_one {
            continue;
        }

        for _ in 1..s {
            x = mod_pow(&x, &two, n);
            if x == n_minus_one {
                continue 'witness;
            }
        }

        // Composite
        return false;
    }

    // Probably prime
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mod_pow() {
        // 3^5 mod 7 = 243 mod 7 = 5
        let result = mod_pow(&from_u64(3), &from_u64(5), &from_u64(7));
        assert_eq!(result, from_u64(5));

        assert_eq!(mod_pow(&from_u64(9), &from_u64(9), &from_u64(1)), from_u64(0));
    }

    #[test]
    fn test_mod_inverse() {
        // 3 * 5 = 15 ≡ 1 mod 7, so inverse of 3 mod 7 is 5
        let a = from_u64(3);
        let m = from_u64(7);
        let inv = mod_inverse(&a, &m).unwrap();
        assert_eq!(inv, from_u64(5));
        assert_eq!((a * inv) % m, from_u64(1));

        // 17^-1 mod 3120 (φ of 61 * 53)
        let inv = mod_inverse(&from_u64(17), &from_u64(3120)).unwrap();
        assert_eq!(inv, from_u64(2753));
    }

    #[test]
    fn test_mod_inverse_missing() {
        assert!(mod_inverse(&from_u64(6), &from_u64(9)).is_none());
        assert!(mod_inverse(&from_u64(0), &from_u64(9)).is_none());
        assert!(mod_inverse(&from_u64(5), &from_u64(1)).is_none());
    }

    #[test]
    fn test_bytes_are_minimal_big_endian() {
        assert_eq!(to_bytes(&from_u64(0x0102)), vec![0x01, 0x02]);
        assert_eq!(to_bytes(&from_bytes(&[0, 0, 7])), vec![7]);
        assert_eq!(to_bytes(&from_u64(0)), vec![0]);
    }

    #[test]
    fn test_is_probable_prime() {
        for p in [2u64, 3, 7, 97, 101, 7919, 65537, 2_147_483_647] {
            assert!(is_probable_prime(&from_u64(p), 20), "{} is prime", p);
        }
        for c in [0u64, 1, 4, 9, 91, 7917, 561, 41041, 2_147_483_649] {
            assert!(!is_probable_prime(&from_u64(c), 20), "{} is composite", c);
        }
    }

    #[test]
    fn test_is_probable_prime_large() {
        // 2^127 - 1 is a Mersenne prime, 2^128 + 1 is not prime
        let m127 = (RsaBigInt::one() << 127u32) - 1u8;
        assert!(is_probable_prime(&m127, 30));

        let f7 = (RsaBigInt::one() << 128u32) + 1u8;
        assert!(!is_probable_prime(&f7, 30));
    }
}
