//! Single-block SHA-1 compression
//!
//! The seed message always fits in one padded block, so only the
//! compression function is needed.

use crate::constants::{DIGEST_SIZE, MESSAGE_SIZE};
use byteorder::{BigEndian, ByteOrder};

/// Round constants (FIPS 180-4)
const K: [u32; 4] = [0x5A82_7999, 0x6ED9_EBA1, 0x8F1B_BCDC, 0xCA62_C1D6];

/// Initial hash value
const IV: [u32; 5] = [0x6745_2301, 0xEFCD_AB89, 0x98BA_DCFE, 0x1032_5476, 0xC3D2_E1F0];

#[inline(always)]
fn ch(x: u32, y: u32, z: u32) -> u32 {
    (x & y) ^ (!x & z)
}

#[inline(always)]
fn parity(x: u32, y: u32, z: u32) -> u32 {
    x ^ y ^ z
}

#[inline(always)]
fn maj(x: u32, y: u32, z: u32) -> u32 {
    (x & y) ^ (x & z) ^ (y & z)
}

/// Expand 16 message words into the 80-word schedule
#[inline]
fn message_schedule(block: &[u8; MESSAGE_SIZE]) -> [u32; 80] {
    let mut w = [0u32; 80];
    BigEndian::read_u32_into(block, &mut w[..16]);
    for i in 16..80 {
        w[i] = (w[i - 3] ^ w[i - 8] ^ w[i - 14] ^ w[i - 16]).rotate_left(1);
    }
    w
}

/// Compress one 64-byte block from the standard initial state
///
/// The block must already contain padding and length.
pub fn hash_block(block: &[u8; MESSAGE_SIZE]) -> [u8; DIGEST_SIZE] {
    let w = message_schedule(block);
    let [mut a, mut b, mut c, mut d, mut e] = IV;

    for (i, &word) in w.iter().enumerate() {
        let (f, k) = match i {
            0..=19 => (ch(b, c, d), K[0]),
            20..=39 => (parity(b, c, d), K[1]),
            40..=59 => (maj(b, c, d), K[2]),
            _ => (parity(b, c, d), K[3]),
        };
        let temp = a
            .rotate_left(5)
            .wrapping_add(f)
            .wrapping_add(e)
            .wrapping_add(k)
            .wrapping_add(word);
        e = d;
        d = c;
        c = b.rotate_left(30);
        b = a;
        a = temp;
    }

    let state = [
        a.wrapping_add(IV[0]),
        b.wrapping_add(IV[1]),
        c.wrapping_add(IV[2]),
        d.wrapping_add(IV[3]),
        e.wrapping_add(IV[4]),
    ];

    let mut digest = [0u8; DIGEST_SIZE];
    BigEndian::write_u32_into(&state, &mut digest);
    digest
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Pad a short message into a single block
    fn padded(message: &[u8]) -> [u8; MESSAGE_SIZE] {
        assert!(message.len() < 56);
        let mut block = [0u8; MESSAGE_SIZE];
        block[..message.len()].copy_from_slice(message);
        block[message.len()] = 0x80;
        let bits = (message.len() as u64) * 8;
        block[56..].copy_from_slice(&bits.to_be_bytes());
        block
    }

    fn hex(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{:02x}", b)).collect()
    }

    #[test]
    fn test_hash_block_abc() {
        let digest = hash_block(&padded(b"abc"));
        assert_eq!(hex(&digest), "a9993e364706816aba3e25717850c26c9cd0d89d");
    }

    #[test]
    fn test_hash_block_empty() {
        let digest = hash_block(&padded(b""));
        assert_eq!(hex(&digest), "da39a3ee5e6b4b0d3255bfef95601890afd80709");
    }

    #[test]
    fn test_hash_block_deterministic() {
        let block = [0x5Au8; MESSAGE_SIZE];
        assert_eq!(hash_block(&block), hash_block(&block));
    }

    #[test]
    fn test_hash_block_single_bit_changes_digest() {
        let block = [0u8; MESSAGE_SIZE];
        let mut flipped = block;
        flipped[63] ^= 1;
        assert_ne!(hash_block(&block), hash_block(&flipped));
    }

    #[test]
    fn test_message_schedule_keeps_input_words() {
        let mut block = [0u8; MESSAGE_SIZE];
        block[0..4].copy_from_slice(&0x0102_0304u32.to_be_bytes());
        let w = message_schedule(&block);
        assert_eq!(w[0], 0x0102_0304);
        assert_eq!(w[16], 0x0102_0304u32.rotate_left(1));
    }
}
