// RSA Key Generation
// Implements RSA key pair generation (public and private keys)

use tracing::debug;

use super::bigint::{from_u64, gcd, mod_inverse, RsaBigInt};
use super::prime::generate_prime_with;
use crate::config::{validate_prime_bits, Config};
use crate::error::{Result, RsaError};

/// The exponent/modulus pair every key is made of.
///
/// Encryption and decryption are the same modular exponentiation, so the
/// block cipher accepts any key: data is encrypted with a public key and
/// signed with a private one.
pub trait KeyParts {
    /// Exponent applied to each block (`e` or `d`)
    fn exponent(&self) -> &RsaBigInt;

    /// Modulus shared by both keys of a pair
    fn modulus(&self) -> &RsaBigInt;

    /// Rebuild a key from its two components
    fn from_parts(exponent: RsaBigInt, modulus: RsaBigInt) -> Self
    where
        Self: Sized;

    /// Bit length of the modulus
    fn modulus_bits(&self) -> u64 {
        self.modulus().bits()
    }
}

/// RSA Public Key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaPublicKey {
    pub e: RsaBigInt, // Public exponent
    pub n: RsaBigInt, // Modulus
}

/// RSA Private Key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaPrivateKey {
    pub d: RsaBigInt, // Private exponent
    pub n: RsaBigInt, // Modulus (same as public)
}

/// RSA Key Pair (both public and private keys)
#[derive(Debug, Clone)]
pub struct RsaKeyPair {
    pub public_key: RsaPublicKey,
    pub private_key: RsaPrivateKey,
    pub prime_bits: usize,
}

impl KeyParts for RsaPublicKey {
    fn exponent(&self) -> &RsaBigInt {
        &self.e
    }

    fn modulus(&self) -> &RsaBigInt {
        &self.n
    }

    fn from_parts(exponent: RsaBigInt, modulus: RsaBigInt) -> Self {
        Self { e: exponent, n: modulus }
    }
}

impl KeyParts for RsaPrivateKey {
    fn exponent(&self) -> &RsaBigInt {
        &self.d
    }

    fn modulus(&self) -> &RsaBigInt {
        &self.n
    }

    fn from_parts(exponent: RsaBigInt, modulus: RsaBigInt) -> Self {
        Self { d: exponent, n: modulus }
    }
}

impl RsaPublicKey {
    /// Encrypt a message using this public key
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<super::Ciphertext> {
        super::encrypt::encrypt(plaintext, self)
    }

    /// Check a signature made by the matching private key
    pub fn verify(&self, data: &[u8], signature: &super::Signature) -> bool {
        super::signature::verify(data, signature, self)
    }
}

impl RsaPrivateKey {
    /// Decrypt a ciphertext using this private key
    pub fn decrypt(&self, ciphertext: &super::Ciphertext) -> Result<Vec<u8>> {
        super::decrypt::decrypt(ciphertext, self)
    }

    /// Sign a message with this private key
    pub fn sign(&self, data: &[u8]) -> Result<super::Signature> {
        super::signature::sign(data, self)
    }
}

impl RsaKeyPair {
    /// Get the bit length of the modulus
    pub fn modulus_bits(&self) -> u64 {
        self.public_key.modulus_bits()
    }
}

/// Generate an RSA key pair from two `bits`-bit primes with the default
/// public exponent and primality rounds
pub fn generate_keypair(bits: usize) -> Result<RsaKeyPair> {
    validate_prime_bits(bits)?;
    let config = Config::default();
    build_keypair(bits, config.public_exponent, config.primality_rounds, config.seed_adds_mask)
}

/// Generate an RSA key pair using every value of `config`.
///
/// The configuration is validated first, including that the resulting
/// modulus can hold a full `config.block_size` plaintext block.
pub fn generate_keypair_with(config: &Config) -> Result<RsaKeyPair> {
    config.validate()?;
    build_keypair(
        config.prime_bits,
        config.public_exponent,
        config.primality_rounds,
        config.seed_adds_mask,
    )
}

fn build_keypair(bits: usize, e: u64, rounds: u32, seed_adds_mask: u8) -> Result<RsaKeyPair> {
    debug!(prime_bits = bits, "generating RSA key pair");

    // Step 1: Generate two distinct random primes p and q
    let p = generate_prime_with(bits, rounds, seed_adds_mask)?;
    let mut q = generate_prime_with(bits, rounds, seed_adds_mask)?;
    while q == p {
        debug!("second prime equals the first, drawing again");
        q = generate_prime_with(bits, rounds, seed_adds_mask)?;
    }

    let keypair = derive_keypair(&p, &q, e, bits)?;
    debug!(modulus_bits = keypair.modulus_bits(), "key pair ready");

    Ok(keypair)
}

/// Derive both keys from two primes.
///
/// A public exponent that is not invertible modulo φ(n) is fatal: the caller
/// gets `RsaError::NoModularInverse` and no new primes are drawn.
pub(crate) fn derive_keypair(
    p: &RsaBigInt,
    q: &RsaBigInt,
    e: u64,
    prime_bits: usize,
) -> Result<RsaKeyPair> {
    let e = from_u64(e);

    // Step 2: Compute n = p * q
    let n = p * q;

    // Step 3: Compute φ(n) = (p-1)(q-1)
    let phi_n = (p - 1u8) * (q - 1u8);

    // Step 4: Verify e and φ(n) are coprime
    if gcd(&e, &phi_n) != from_u64(1) {
        return Err(RsaError::NoModularInverse);
    }

    // Step 5: Compute d = e^(-1) mod φ(n)
    let d = mod_inverse(&e, &phi_n).ok_or(RsaError::NoModularInverse)?;

    // Each key holds its own copy of the modulus
    let public_key = RsaPublicKey { e, n: n.clone() };
    let private_key = RsaPrivateKey { d, n };

    Ok(RsaKeyPair {
        public_key,
        private_key,
        prime_bits,
    })
}
