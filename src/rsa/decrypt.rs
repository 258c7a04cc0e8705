// RSA Decryption Implementation
// Reverses the block cipher one record at a time, in order

use num_traits::Zero;
use tracing::{debug, trace};

use super::bigint::{from_bytes, mod_pow, to_bytes};
use super::ciphertext::{CipherBlock, Ciphertext};
use super::keygen::KeyParts;
use crate::error::{Result, RsaError};

/// Decrypt every block with `key` and concatenate the recovered chunks
pub fn decrypt<K: KeyParts>(ciphertext: &Ciphertext, key: &K) -> Result<Vec<u8>> {
    let mut plaintext = Vec::new();

    for (index, block) in ciphertext.blocks.iter().enumerate() {
        let chunk = decrypt_block(block, key)?;
        trace!(index, chunk_len = chunk.len(), "decrypted block");
        plaintext.extend_from_slice(&chunk);
    }

    debug!(blocks = ciphertext.len(), plaintext_len = plaintext.len(), "decrypted");
    Ok(plaintext)
}

/// Decrypt one block back into exactly `block.chunk_len` bytes.
///
/// The integer export drops leading zero bytes of the encrypted chunk; they
/// are restored by left-padding. A value too wide for the chunk means the
/// block was not produced by the matching key.
pub fn decrypt_block<K: KeyParts>(block: &CipherBlock, key: &K) -> Result<Vec<u8>> {
    if key.modulus().is_zero() {
        return Err(RsaError::InvalidKey("modulus is zero"));
    }

    // Encryption never accepts a chunk as wide as the modulus
    let max = (key.modulus_bits() as usize + 7) / 8;
    if block.chunk_len > max {
        return Err(RsaError::ChunkTooLong {
            chunk_len: block.chunk_len,
            max,
        });
    }

    let c = from_bytes(&block.bytes);
    let m = mod_pow(&c, key.exponent(), key.modulus());
    left_pad(to_bytes(&m), block.chunk_len)
}

/// Left-pad a minimal big-endian export to `len` bytes
fn left_pad(bytes: Vec<u8>, len: usize) -> Result<Vec<u8>> {
    // Zero exports as a single 0x00 byte
    let bytes = if bytes == [0] { Vec::new() } else { bytes };

    if bytes.len() > len {
        return Err(RsaError::BlockOverflow {
            expected: len,
            actual: bytes.len(),
        });
    }

    let mut out = vec![0u8; len - bytes.len()];
    out.extend_from_slice(&bytes);
    Ok(out)
}

/// Decrypt ciphertext to a string
pub fn decrypt_to_string<K: KeyParts>(ciphertext: &Ciphertext, key: &K) -> Result<String> {
    let plaintext = decrypt(ciphertext, key)?;
    Ok(String::from_utf8(plaintext)?)
}
