// RSA Signatures
// Sign the 32-bit digest with the private key, verify with the public key

use std::fmt;

use tracing::debug;

use super::ciphertext::CipherBlock;
use super::decrypt::decrypt_block;
use super::encrypt::{check_block_fits, encrypt_block};
use super::hash::{digest, DIGEST_SIZE};
use super::keygen::{RsaPrivateKey, RsaPublicKey};
use crate::error::Result;

/// Raw bytes of the encrypted digest block, without a length prefix
#[derive(Clone, PartialEq, Eq)]
pub struct Signature(Vec<u8>);

impl Signature {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Lowercase hex of the raw signature bytes
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    pub fn from_hex(hex_str: &str) -> Result<Self> {
        Ok(Self(hex::decode(hex_str.trim())?))
    }
}

impl From<Vec<u8>> for Signature {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&[u8]> for Signature {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl AsRef<[u8]> for Signature {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Signature").field(&self.to_hex()).finish()
    }
}

/// Sign `data`: the digest bytes encrypted as one block with the private key
pub fn sign(data: &[u8], private_key: &RsaPrivateKey) -> Result<Signature> {
    check_block_fits(private_key, DIGEST_SIZE)?;

    let block = encrypt_block(&digest(data), private_key);
    debug!(signature_len = block.bytes.len(), "signed");

    Ok(Signature(block.bytes))
}

/// Check `signature` against `data`.
///
/// The signature is decrypted with the public key as a single block that
/// encodes a 4-byte chunk and compared with the digest of `data`. Any
/// mismatch, including one that makes the block undecodable, is `false`.
pub fn verify(data: &[u8], signature: &Signature, public_key: &RsaPublicKey) -> bool {
    let block = CipherBlock {
        chunk_len: DIGEST_SIZE,
        bytes: signature.0.clone(),
    };

    match decrypt_block(&block, public_key) {
        Ok(recovered) => recovered == digest(data),
        Err(err) => {
            debug!(error = %err, "signature does not decode");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rsa::keygen::generate_keypair;

    #[test]
    fn test_sign_verify() {
        let keypair = generate_keypair(256).unwrap();
        let message = b"attack at dawn";

        let signature = sign(message, &keypair.private_key).unwrap();
        assert!(verify(message, &signature, &keypair.public_key));
        assert!(keypair.public_key.verify(message, &signature));
    }

    #[test]
    fn test_tampered_message() {
        let keypair = generate_keypair(256).unwrap();
        let message = b"attack at dawn".to_vec();
        let signature = sign(&message, &keypair.private_key).unwrap();

        for i in 0..message.len() {
            let mut altered = message.clone();
            altered[i] = altered[i].wrapping_add(1);
            assert!(!verify(&altered, &signature, &keypair.public_key), "byte {}", i);
        }
        assert!(!verify(b"attack at dusk", &signature, &keypair.public_key));
    }

    #[test]
    fn test_other_keypair() {
        let keypair1 = generate_keypair(256).unwrap();
        let keypair2 = generate_keypair(256).unwrap();

        let signature = sign(b"message", &keypair1.private_key).unwrap();
        assert!(!verify(b"message", &signature, &keypair2.public_key));
    }

    #[test]
    fn test_garbage_signature() {
        let keypair = generate_keypair(256).unwrap();
        assert!(!verify(b"message", &Signature::from(vec![]), &keypair.public_key));
        assert!(!verify(b"message", &Signature::from(vec![0xff; 300]), &keypair.public_key));

        let zero_key = RsaPublicKey {
            e: keypair.public_key.e.clone(),
            n: Default::default(),
        };
        assert!(!verify(b"message", &Signature::from(vec![1]), &zero_key));
    }

    #[test]
    fn test_hex_roundtrip() {
        let keypair = generate_keypair(256).unwrap();
        let signature = keypair.private_key.sign(b"message").unwrap();

        let hex_str = signature.to_hex();
        assert_eq!(hex_str, hex_str.to_lowercase());
        assert_eq!(hex_str.len(), 2 * signature.len());
        assert_eq!(Signature::from_hex(&hex_str).unwrap(), signature);
    }

    #[test]
    fn test_empty_message() {
        let keypair = generate_keypair(256).unwrap();
        let signature = sign(b"", &keypair.private_key).unwrap();
        assert!(verify(b"", &signature, &keypair.public_key));
        assert!(!verify(b"\0", &signature, &keypair.public_key));
    }
}
