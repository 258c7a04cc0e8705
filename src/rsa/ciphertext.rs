// Ciphertext Format
// Length-prefixed block records produced by the block cipher
//
// Each block is serialized as
//
//   [block_len: u64 BE][chunk_len: u64 BE][block bytes]
//
// and blocks are concatenated in plaintext order with nothing in between.

use super::encoding::{put_len, Reader, LENGTH_FIELD_SIZE};
use crate::error::Result;

/// One encrypted plaintext chunk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CipherBlock {
    /// Number of plaintext bytes this block encodes. Decryption left-pads
    /// the recovered integer back to this length, so chunks that started
    /// with zero bytes survive the round trip.
    pub chunk_len: usize,
    /// Minimal big-endian export of `m^e mod n`
    pub bytes: Vec<u8>,
}

/// An ordered sequence of cipher blocks
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ciphertext {
    pub blocks: Vec<CipherBlock>,
}

impl Ciphertext {
    pub fn new(blocks: Vec<CipherBlock>) -> Self {
        Self { blocks }
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Total plaintext length the blocks decode to
    pub fn plaintext_len(&self) -> usize {
        self.blocks
            .iter()
            .fold(0usize, |total, b| total.saturating_add(b.chunk_len))
    }

    /// Serialize to the binary record format
    pub fn to_bytes(&self) -> Vec<u8> {
        let size = self
            .blocks
            .iter()
            .map(|b| 2 * LENGTH_FIELD_SIZE + b.bytes.len())
            .sum();

        let mut out = Vec::with_capacity(size);
        for block in &self.blocks {
            put_len(&mut out, block.bytes.len());
            put_len(&mut out, block.chunk_len);
            out.extend_from_slice(&block.bytes);
        }
        out
    }

    /// Parse the binary record format. Empty input is an empty ciphertext.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let mut reader = Reader::new(data);
        let mut blocks = Vec::new();

        while !reader.is_empty() {
            let block_len = reader.take_len()?;
            let chunk_len = reader.take_len()?;
            let bytes = reader.take(block_len)?.to_vec();
            blocks.push(CipherBlock { chunk_len, bytes });
        }

        Ok(Self { blocks })
    }

    /// Serialize to lowercase hex
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Parse the hex form
    pub fn from_hex(hex_str: &str) -> Result<Self> {
        Self::from_bytes(&hex::decode(hex_str.trim())?)
    }
}
