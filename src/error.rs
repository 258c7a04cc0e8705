// Error Types
// Every failure the engine can report, from entropy loss to malformed wire data

use thiserror::Error;

/// Errors produced by key generation, the block cipher and the codecs
#[derive(Error, Debug)]
pub enum RsaError {
    /// The OS random source could not be opened or returned a short read.
    /// Key generation cannot continue without it.
    #[error("entropy source unavailable: {0}")]
    Entropy(#[source] rand::Error),

    /// The public exponent has no inverse modulo φ(n)
    #[error("public exponent has no modular inverse modulo phi(n)")]
    NoModularInverse,

    /// A configuration value the engine cannot work with
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The key's modulus cannot hold a full plaintext block
    #[error("modulus of {modulus_bits} bits cannot hold {block_size}-byte blocks")]
    BlockTooLarge {
        block_size: usize,
        modulus_bits: u64,
    },

    /// A decrypted block does not fit in the plaintext chunk it claims to encode
    #[error("decrypted block is {actual} bytes, chunk holds only {expected}")]
    BlockOverflow { expected: usize, actual: usize },

    /// A block claims more plaintext than its key's modulus can carry
    #[error("block claims {chunk_len} plaintext bytes, modulus carries at most {max}")]
    ChunkTooLong { chunk_len: usize, max: usize },

    /// Serialized input ended before a field was complete
    #[error("truncated input: need {needed} bytes at offset {offset}, {available} available")]
    Truncated {
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// Serialized input has bytes after the last field
    #[error("{0} unexpected trailing bytes")]
    TrailingBytes(usize),

    /// A length field does not fit in this platform's address space
    #[error("length field {0} does not fit in memory")]
    LengthOverflow(u64),

    /// Structurally valid input that does not describe a usable key
    #[error("invalid key: {0}")]
    InvalidKey(&'static str),

    /// Malformed hexadecimal input
    #[error("invalid hex: {0}")]
    Hex(#[from] hex::FromHexError),

    /// Decrypted text is not valid UTF-8
    #[error("invalid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// File I/O in the command line helpers
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, RsaError>;
