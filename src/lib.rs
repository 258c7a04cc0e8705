//! Textbook RSA public-key engine.
//!
//! Key pairs are built from two probabilistic primes drawn from the OS
//! random source. Messages are split into 128-byte chunks and each chunk is
//! encrypted raw (no padding) into a length-prefixed block. Signatures are
//! the private-key encryption of a 32-bit digest. Keys, ciphertexts and
//! signatures all have a compact binary form and a lowercase hex form.
//!
//! This engine is not interoperable with standard RSA and its digest is not
//! cryptographic; it is meant for applications that control both ends.
//!
//! ```no_run
//! use rsa_pke::{decrypt, encrypt, generate_keypair, sign, verify, KeyEncoding, RsaPublicKey};
//!
//! let keypair = generate_keypair(2048)?;
//! let ciphertext = encrypt(b"hello", &keypair.public_key)?;
//! assert_eq!(decrypt(&ciphertext, &keypair.private_key)?, b"hello");
//!
//! let signature = sign(b"hello", &keypair.private_key)?;
//! let public_key = RsaPublicKey::from_hex(&keypair.public_key.to_hex())?;
//! assert!(verify(b"hello", &signature, &public_key));
//! # Ok::<(), rsa_pke::RsaError>(())
//! ```

pub mod config;
pub mod error;
pub mod rsa;
pub mod util;

pub use config::Config;
pub use error::{Result, RsaError};
pub use rsa::{
    decrypt, encrypt, generate_keypair, generate_keypair_with, generate_prime, hash32, sign,
    verify, CipherBlock, Ciphertext, KeyEncoding, KeyParts, RsaKeyPair, RsaPrivateKey,
    RsaPublicKey, Signature,
};
