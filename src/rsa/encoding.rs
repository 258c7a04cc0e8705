// Key Serialization
// Binary and hex wire format for public and private keys
//
// A key is serialized as
//
//   [exponent_len: u64 BE][modulus_len: u64 BE][exponent bytes][modulus bytes]
//
// where both integers are minimal unsigned big-endian exports. The hex form
// is the lowercase hex encoding of the binary form.

use num_traits::Zero;

use super::bigint::{from_bytes, to_bytes};
use super::keygen::KeyParts;
use crate::error::{Result, RsaError};

/// Width of every length field in the wire formats
pub const LENGTH_FIELD_SIZE: usize = 8;

/// Append a length field
pub(crate) fn put_len(out: &mut Vec<u8>, len: usize) {
    out.extend_from_slice(&(len as u64).to_be_bytes());
}

/// Bounds-checked cursor over serialized input
pub(crate) struct Reader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> Reader<'a> {
    pub(crate) fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.offset == self.data.len()
    }

    pub(crate) fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    pub(crate) fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        if len > self.remaining() {
            return Err(RsaError::Truncated {
                offset: self.offset,
                needed: len,
                available: self.remaining(),
            });
        }
        let bytes = &self.data[self.offset..self.offset + len];
        self.offset += len;
        Ok(bytes)
    }

    pub(crate) fn take_len(&mut self) -> Result<usize> {
        let mut field = [0u8; LENGTH_FIELD_SIZE];
        field.copy_from_slice(self.take(LENGTH_FIELD_SIZE)?);
        let len = u64::from_be_bytes(field);
        usize::try_from(len).map_err(|_| RsaError::LengthOverflow(len))
    }

    /// Fail if anything is left over
    pub(crate) fn finish(self) -> Result<()> {
        match self.remaining() {
            0 => Ok(()),
            n => Err(RsaError::TrailingBytes(n)),
        }
    }
}

/// Binary and hex serialization shared by both key types
pub trait KeyEncoding: KeyParts + Sized {
    /// Serialize to the binary key format
    fn to_binary(&self) -> Vec<u8> {
        let exponent = to_bytes(self.exponent());
        let modulus = to_bytes(self.modulus());

        let mut out =
            Vec::with_capacity(2 * LENGTH_FIELD_SIZE + exponent.len() + modulus.len());
        put_len(&mut out, exponent.len());
        put_len(&mut out, modulus.len());
        out.extend_from_slice(&exponent);
        out.extend_from_slice(&modulus);
        out
    }

    /// Parse the binary key format. The input must contain exactly one key.
    fn from_binary(bytes: &[u8]) -> Result<Self> {
        let mut reader = Reader::new(bytes);
        let exponent_len = reader.take_len()?;
        let modulus_len = reader.take_len()?;
        let exponent = from_bytes(reader.take(exponent_len)?);
        let modulus = from_bytes(reader.take(modulus_len)?);
        reader.finish()?;

        if modulus.is_zero() {
            return Err(RsaError::InvalidKey("modulus is zero"));
        }
        if exponent.is_zero() {
            return Err(RsaError::InvalidKey("exponent is zero"));
        }

        Ok(Self::from_parts(exponent, modulus))
    }

    /// Serialize to lowercase hex
    fn to_hex(&self) -> String {
        hex::encode(self.to_binary())
    }

    /// Parse the hex key format
    fn from_hex(hex_str: &str) -> Result<Self> {
        let bytes = hex::decode(hex_str.trim())?;
        Self::from_binary(&bytes)
    }
}

impl<K: KeyParts> KeyEncoding for K {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rsa::bigint::from_u64;
    use crate::rsa::keygen::{RsaPrivateKey, RsaPublicKey};

    fn sample_key() -> RsaPublicKey {
        RsaPublicKey {
            e: from_u64(65537),
            n: from_u64(3233),
        }
    }

    #[test]
    fn test_binary_layout() {
        let bytes = sample_key().to_binary();
        let expected: Vec<u8> = [
            &[0, 0, 0, 0, 0, 0, 0, 3][..],
            &[0, 0, 0, 0, 0, 0, 0, 2][..],
            &[0x01, 0x00, 0x01][..],
            &[0x0c, 0xa1][..],
        ]
        .concat();
        assert_eq!(bytes, expected);
    }

    #[test]
    fn test_hex_layout() {
        assert_eq!(
            sample_key().to_hex(),
            "00000000000000030000000000000002010001\
             0ca1"
        );
    }

    #[test]
    fn test_roundtrip() {
        let key = sample_key();
        assert_eq!(RsaPublicKey::from_binary(&key.to_binary()).unwrap(), key);
        assert_eq!(RsaPublicKey::from_hex(&key.to_hex()).unwrap(), key);

        let private = RsaPrivateKey {
            d: from_u64(2753),
            n: from_u64(3233),
        };
        assert_eq!(RsaPrivateKey::from_hex(&private.to_hex()).unwrap(), private);
    }

    #[test]
    fn test_uppercase_hex_accepted() {
        let key = sample_key();
        let upper = key.to_hex().to_uppercase();
        assert_eq!(RsaPublicKey::from_hex(&upper).unwrap(), key);
    }

    #[test]
    fn test_truncated_input() {
        let bytes = sample_key().to_binary();
        for len in 0..bytes.len() {
            let result = RsaPublicKey::from_binary(&bytes[..len]);
            assert!(matches!(result, Err(RsaError::Truncated { .. })), "len {}", len);
        }
    }

    #[test]
    fn test_trailing_bytes() {
        let mut bytes = sample_key().to_binary();
        bytes.push(0);
        assert!(matches!(
            RsaPublicKey::from_binary(&bytes),
            Err(RsaError::TrailingBytes(1))
        ));
    }

    #[test]
    fn test_huge_length_field() {
        let mut bytes = vec![0xff; LENGTH_FIELD_SIZE];
        bytes.extend_from_slice(&[0; LENGTH_FIELD_SIZE]);
        assert!(RsaPublicKey::from_binary(&bytes).is_err());
    }

    #[test]
    fn test_zero_modulus() {
        let key = RsaPublicKey {
            e: from_u64(3),
            n: from_u64(0),
        };
        assert!(matches!(
            RsaPublicKey::from_binary(&key.to_binary()),
            Err(RsaError::InvalidKey(_))
        ));
    }

    #[test]
    fn test_bad_hex() {
        assert!(matches!(RsaPublicKey::from_hex("abc"), Err(RsaError::Hex(_))));
        assert!(matches!(RsaPublicKey::from_hex("zz"), Err(RsaError::Hex(_))));
    }
}
