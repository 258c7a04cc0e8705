// RSA Module - Main module file
// Exports all RSA-related functionality

pub mod bigint;
pub mod ciphertext;
pub mod decrypt;
pub mod encoding;
pub mod encrypt;
pub mod entropy;
pub mod hash;
pub mod keygen;
pub mod prime;
pub mod signature;

pub use ciphertext::{CipherBlock, Ciphertext};
pub use decrypt::{decrypt, decrypt_block, decrypt_to_string};
pub use encoding::KeyEncoding;
pub use encrypt::{encrypt, encrypt_string, encrypt_with_block_size};
pub use hash::{digest, hash32, DIGEST_SIZE};
pub use keygen::{
    generate_keypair, generate_keypair_with, KeyParts, RsaKeyPair, RsaPrivateKey, RsaPublicKey,
};
pub use prime::{generate_prime, generate_prime_with};
pub use signature::{sign, verify, Signature};
