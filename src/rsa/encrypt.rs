// RSA Encryption Implementation
// Splits the plaintext into fixed-size chunks and encrypts each one raw

use tracing::{debug, trace};

use super::bigint::{from_bytes, mod_pow, to_bytes};
use super::ciphertext::{CipherBlock, Ciphertext};
use super::keygen::KeyParts;
use crate::config::BLOCK_SIZE;
use crate::error::{Result, RsaError};

/// Encrypt bytes with any key using the default 128-byte chunks.
/// Empty input produces a ciphertext with zero blocks.
pub fn encrypt<K: KeyParts>(plaintext: &[u8], key: &K) -> Result<Ciphertext> {
    encrypt_with_block_size(plaintext, key, BLOCK_SIZE)
}

/// Encrypt bytes in `block_size` chunks; the last chunk may be shorter.
///
/// Each chunk is read as an unsigned big-endian integer `m` and replaced by
/// `m^e mod n`. No padding is applied. The modulus must be strictly larger
/// than every possible chunk value, so it needs more than `8 * block_size`
/// bits.
pub fn encrypt_with_block_size<K: KeyParts>(
    plaintext: &[u8],
    key: &K,
    block_size: usize,
) -> Result<Ciphertext> {
    check_block_fits(key, block_size)?;

    let blocks: Vec<CipherBlock> = plaintext
        .chunks(block_size)
        .enumerate()
        .map(|(index, chunk)| {
            let block = encrypt_block(chunk, key);
            trace!(index, chunk_len = chunk.len(), block_len = block.bytes.len(), "encrypted block");
            block
        })
        .collect();

    debug!(plaintext_len = plaintext.len(), blocks = blocks.len(), "encrypted");
    Ok(Ciphertext::new(blocks))
}

/// Encrypt a single chunk. The caller guarantees the chunk is below the modulus.
pub(crate) fn encrypt_block<K: KeyParts>(chunk: &[u8], key: &K) -> CipherBlock {
    let m = from_bytes(chunk);
    let c = mod_pow(&m, key.exponent(), key.modulus());
    CipherBlock {
        chunk_len: chunk.len(),
        bytes: to_bytes(&c),
    }
}

/// Encrypt a string
pub fn encrypt_string<K: KeyParts>(plaintext: &str, key: &K) -> Result<Ciphertext> {
    encrypt(plaintext.as_bytes(), key)
}

pub(crate) fn check_block_fits<K: KeyParts>(key: &K, block_size: usize) -> Result<()> {
    let modulus_bits = key.modulus_bits();
    if block_size == 0 || modulus_bits <= (block_size as u64) * 8 {
        return Err(RsaError::BlockTooLarge {
            block_size,
            modulus_bits,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rsa::bigint::from_u64;
    use crate::rsa::keygen::{generate_keypair, RsaPublicKey};

    #[test]
    fn test_encrypt_bytes() {
        let keypair = generate_keypair(576).unwrap();
        let message = b"Hello, RSA!";

        let ciphertext = encrypt(message, &keypair.public_key).unwrap();
        assert_eq!(ciphertext.len(), 1);
        assert_eq!(ciphertext.blocks[0].chunk_len, message.len());
        assert_ne!(ciphertext.blocks[0].bytes, message.to_vec());
    }

    #[test]
    fn test_chunk_count() {
        let keypair = generate_keypair(576).unwrap();

        for (len, blocks) in [(0, 0), (1, 1), (127, 1), (128, 1), (129, 2), (1000, 8)] {
            let ciphertext = encrypt(&vec![7u8; len], &keypair.public_key).unwrap();
            assert_eq!(ciphertext.len(), blocks, "{} bytes", len);
            assert_eq!(ciphertext.plaintext_len(), len);
        }

        let last = encrypt(&[1u8; 129], &keypair.public_key).unwrap();
        assert_eq!(last.blocks[0].chunk_len, 128);
        assert_eq!(last.blocks[1].chunk_len, 1);
    }

    #[test]
    fn test_textbook_value() {
        // 65^17 mod 3233 = 2790
        let key = RsaPublicKey {
            e: from_u64(17),
            n: from_u64(3233),
        };
        let ciphertext = encrypt_with_block_size(&[65], &key, 1).unwrap();
        assert_eq!(ciphertext.blocks[0].bytes, to_bytes(&from_u64(2790)));
    }

    #[test]
    fn test_modulus_too_small() {
        let keypair = generate_keypair(256).unwrap();
        let result = encrypt(b"abc", &keypair.public_key);
        assert!(matches!(result, Err(RsaError::BlockTooLarge { block_size: 128, .. })));

        // The same key works with blocks that fit under the modulus
        assert!(encrypt_with_block_size(b"abc", &keypair.public_key, 32).is_ok());
    }

    #[test]
    fn test_encrypt_string() {
        let keypair = generate_keypair(576).unwrap();
        let ciphertext = encrypt_string("Test message", &keypair.public_key).unwrap();
        assert_eq!(ciphertext.plaintext_len(), 12);
    }
}
