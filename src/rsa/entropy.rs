// OS Entropy Source
// Exact-length reads from the operating system random device

use rand::rngs::OsRng;
use rand::RngCore;

use crate::error::{Result, RsaError};

/// Fill `buf` entirely from the OS random source.
///
/// There is no fallback source and no retry: a failed or short read is
/// returned as `RsaError::Entropy` and the caller must stop.
pub fn fill_random(buf: &mut [u8]) -> Result<()> {
    OsRng.try_fill_bytes(buf).map_err(RsaError::Entropy)
}

/// Read `len` random bytes from the OS random source
pub fn random_bytes(len: usize) -> Result<Vec<u8>> {
    let mut buf = vec![0u8; len];
    fill_random(&mut buf)?;
    Ok(buf)
}

/// Read a single random byte
pub fn random_u8() -> Result<u8> {
    let mut byte = [0u8; 1];
    fill_random(&mut byte)?;
    Ok(byte[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_bytes_length() {
        assert_eq!(random_bytes(0).unwrap().len(), 0);
        assert_eq!(random_bytes(256).unwrap().len(), 256);
    }

    #[test]
    fn test_random_bytes_differ() {
        // Two 32-byte draws colliding means the source is broken
        let a = random_bytes(32).unwrap();
        let b = random_bytes(32).unwrap();
        assert_ne!(a, b);
    }
}
