// Message Digest
// Fixed 32-bit mixing function used as the signed payload

/// Size of a digest in bytes
pub const DIGEST_SIZE: usize = 4;

const FNV_OFFSET: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

/// Hash `data` into 32 bits.
///
/// FNV-1a over the bytes, then a final avalanche so that short inputs still
/// spread over the whole word. Each step is a bijection of the state, so two
/// inputs of equal length that differ in a single byte never collide.
///
/// This is NOT a cryptographic hash: collisions are easy to construct and
/// signatures over it only bind a message against accidental change.
pub fn hash32(data: &[u8]) -> u32 {
    let mut hash = FNV_OFFSET;
    for &byte in data {
        hash ^= u32::from(byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    avalanche(hash ^ data.len() as u32)
}

/// Digest bytes as signed: the big-endian encoding of `hash32(data)`
pub fn digest(data: &[u8]) -> [u8; DIGEST_SIZE] {
    hash32(data).to_be_bytes()
}

/// Digest as lowercase hex
pub fn digest_hex(data: &[u8]) -> String {
    hex::encode(digest(data))
}

fn avalanche(mut h: u32) -> u32 {
    h ^= h >> 16;
    h = h.wrapping_mul(0x85eb_ca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2_ae35);
    h ^= h >> 16;
    h
}
