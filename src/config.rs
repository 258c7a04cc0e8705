// Engine Configuration
// Fixed constants of the engine and the builder used to override them

use crate::error::{Result, RsaError};
use crate::rsa::bigint::{from_u64, is_probable_prime};

/// Public exponent shared by every key pair
pub const PUBLIC_EXPONENT: u64 = 65537;

/// Bit length of each generated prime; the modulus is roughly twice this
pub const PRIME_BITS: usize = 2048;

/// Miller-Rabin rounds run on every prime candidate
pub const PRIMALITY_ROUNDS: u32 = 50;

/// Plaintext bytes encrypted per ciphertext block
pub const BLOCK_SIZE: usize = 128;

/// Upper bound for the number of random draws summed into a prime candidate
pub const SEED_ADDS_MASK: u8 = 20;

/// Configuration for key generation and encryption
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub public_exponent: u64,
    pub prime_bits: usize,
    pub primality_rounds: u32,
    pub block_size: usize,
    pub seed_adds_mask: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            public_exponent: PUBLIC_EXPONENT,
            prime_bits: PRIME_BITS,
            primality_rounds: PRIMALITY_ROUNDS,
            block_size: BLOCK_SIZE,
            seed_adds_mask: SEED_ADDS_MASK,
        }
    }
}

impl Config {
    pub fn with_prime_bits(mut self, bits: usize) -> Self {
        self.prime_bits = bits;
        self
    }

    pub fn with_block_size(mut self, size: usize) -> Self {
        self.block_size = size;
        self
    }

    pub fn with_primality_rounds(mut self, rounds: u32) -> Self {
        self.primality_rounds = rounds;
        self
    }

    /// Override the public exponent. `validate` accepts only primes of at
    /// least 65537: key generation never retries a missing inverse, and a
    /// small exponent such as 3 divides `φ(n)` for most prime pairs.
    pub fn with_public_exponent(mut self, e: u64) -> Self {
        self.public_exponent = e;
        self
    }

    pub fn with_seed_adds_mask(mut self, mask: u8) -> Self {
        self.seed_adds_mask = mask;
        self
    }

    /// Check that the values describe a working engine.
    ///
    /// The modulus of a generated key has at least `2 * prime_bits - 1` bits
    /// and must be strictly larger than any `block_size`-byte plaintext.
    pub fn validate(&self) -> Result<()> {
        validate_prime_bits(self.prime_bits)?;
        validate_prime_search(self.primality_rounds, self.seed_adds_mask)?;

        if self.block_size == 0 {
            return Err(RsaError::InvalidConfig("block size must be non-zero".into()));
        }
        if self.public_exponent < PUBLIC_EXPONENT
            || !is_probable_prime(&from_u64(self.public_exponent), self.primality_rounds)
        {
            return Err(RsaError::InvalidConfig(format!(
                "public exponent {} must be a prime of at least {}",
                self.public_exponent, PUBLIC_EXPONENT
            )));
        }

        let min_modulus_bits = 2 * self.prime_bits - 1;
        if min_modulus_bits <= self.block_size * 8 {
            return Err(RsaError::InvalidConfig(format!(
                "{}-bit primes give a modulus too small for {}-byte blocks",
                self.prime_bits, self.block_size
            )));
        }

        Ok(())
    }
}

/// Prime sizes are drawn as whole random bytes
pub(crate) fn validate_prime_bits(bits: usize) -> Result<()> {
    if bits < 16 || bits % 8 != 0 {
        return Err(RsaError::InvalidConfig(format!(
            "prime bit length {} must be a multiple of 8 and at least 16",
            bits
        )));
    }
    Ok(())
}

/// A zero mask never yields a draw count and zero rounds accept composites
pub(crate) fn validate_prime_search(rounds: u32, seed_adds_mask: u8) -> Result<()> {
    if rounds == 0 {
        return Err(RsaError::InvalidConfig(
            "primality test needs at least one round".into(),
        ));
    }
    if seed_adds_mask == 0 {
        return Err(RsaError::InvalidConfig("seed adds mask must be non-zero".into()));
    }
    Ok(())
}
