//! Key sizes and key schedule expansion.
//!
//! Schedule words are packed so that state row `x` sits in bits `8x..8x + 8`:
//! key bytes are read little-endian, one-byte rotation is a right rotation
//! of the integer, and the round constant lands in the low byte.

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{Error, Result};
use crate::gf::multiply;
use crate::sbox::{init_tables, sbox};

/// Supported AES key sizes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum KeySize {
    /// 16-byte key, 10 rounds.
    Aes128,
    /// 24-byte key, 12 rounds.
    Aes192,
    /// 32-byte key, 14 rounds.
    Aes256,
}

impl KeySize {
    /// Maps a key length in bytes to its key size.
    pub fn from_len(len: usize) -> Result<Self> {
        match len {
            16 => Ok(Self::Aes128),
            24 => Ok(Self::Aes192),
            32 => Ok(Self::Aes256),
            _ => Err(Error::InvalidKeyLength { len }),
        }
    }

    /// Key length in bytes.
    pub const fn len(self) -> usize {
        self.words() * 4
    }

    /// Key length in 32-bit words (`Nk`).
    pub const fn words(self) -> usize {
        match self {
            Self::Aes128 => 4,
            Self::Aes192 => 6,
            Self::Aes256 => 8,
        }
    }

    /// Number of rounds (`r`).
    pub const fn rounds(self) -> usize {
        match self {
            Self::Aes128 => 10,
            Self::Aes192 => 12,
            Self::Aes256 => 14,
        }
    }

    /// Number of words in the expanded schedule, `4 * (r + 1)`.
    pub const fn schedule_words(self) -> usize {
        4 * (self.rounds() + 1)
    }
}

/// Expanded key schedule.
#[derive(Clone, Debug, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct KeySchedule {
    words: Vec<u32>,
    #[zeroize(skip)]
    size: KeySize,
}

impl KeySchedule {
    /// Key size the schedule was expanded from.
    #[inline]
    pub fn size(&self) -> KeySize {
        self.size
    }

    /// Round count.
    #[inline]
    pub fn rounds(&self) -> usize {
        self.size.rounds()
    }

    /// All schedule words in order.
    #[inline]
    pub fn words(&self) -> &[u32] {
        &self.words
    }

    /// Byte `row` of the word feeding state column `column` in `round`.
    #[inline]
    pub(crate) fn round_key_byte(&self, round: usize, row: usize, column: usize) -> u8 {
        (self.words[round * 4 + column] >> (row * 8)) as u8
    }
}

fn sub_word(word: u32) -> u32 {
    let bytes = word.to_le_bytes().map(sbox);
    u32::from_le_bytes(bytes)
}

fn rot_word(word: u32) -> u32 {
    word.rotate_right(8)
}

/// Expands a raw 16, 24 or 32 byte key into its round-key schedule.
pub fn expand_key(key: &[u8]) -> Result<KeySchedule> {
    let size = KeySize::from_len(key.len())?;
    init_tables();

    let nk = size.words();
    let total = size.schedule_words();
    let mut words = Vec::new();
    words
        .try_reserve_exact(total)
        .map_err(|_| Error::AllocationFailure)?;

    words.extend(
        key.chunks_exact(4)
            .map(|chunk| u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]])),
    );

    let mut rcon = 0x01u8;
    for i in nk..total {
        let mut temp = words[i - 1];
        if i % nk == 0 {
            temp = sub_word(rot_word(temp)) ^ u32::from(rcon);
            rcon = multiply(rcon, 0x02);
        } else if nk > 6 && i % nk == 4 {
            temp = sub_word(temp);
        }
        words.push(words[i - nk] ^ temp);
    }

    Ok(KeySchedule { words, size })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn be_words(hex_words: &[u32]) -> Vec<u32> {
        // FIPS-197 prints words big-endian; convert to this crate's packing.
        hex_words.iter().map(|w| w.swap_bytes()).collect()
    }

    #[test]
    fn rejects_bad_lengths() {
        for len in [0usize, 1, 15, 17, 20, 31, 33, 64] {
            let key = vec![0u8; len];
            assert_eq!(expand_key(&key), Err(Error::InvalidKeyLength { len }));
        }
    }

    #[test]
    fn schedule_shape_per_key_size() {
        for (len, rounds) in [(16usize, 10usize), (24, 12), (32, 14)] {
            let key: Vec<u8> = (0..len as u8).collect();
            let schedule = expand_key(&key).expect("valid key");
            assert_eq!(schedule.rounds(), rounds);
            assert_eq!(schedule.words().len(), 4 * (rounds + 1));
            for (i, chunk) in key.chunks_exact(4).enumerate() {
                let expected = u32::from_le_bytes(chunk.try_into().expect("four bytes"));
                assert_eq!(schedule.words()[i], expected);
            }
        }
    }

    #[test]
    fn rot_word_moves_first_byte_last() {
        let w = u32::from_le_bytes([0x09, 0xcf, 0x4f, 0x3c]);
        assert_eq!(rot_word(w).to_le_bytes(), [0xcf, 0x4f, 0x3c, 0x09]);
    }

    #[test]
    fn aes128_expansion_matches_fips_appendix_a1() {
        let key = [
            0x2b, 0x7e, 0x15, 0x16, 0x28, 0xae, 0xd2, 0xa6, 0xab, 0xf7, 0x15, 0x88, 0x09, 0xcf,
            0x4f, 0x3c,
        ];
        let schedule = expand_key(&key).expect("valid key");
        let words = schedule.words();
        assert_eq!(&words[4..8], &be_words(&[0xa0fafe17, 0x88542cb1, 0x23a33939, 0x2a6c7605])[..]);
        assert_eq!(&words[40..44], &be_words(&[0xd014f9a8, 0xc9ee2589, 0xe13f0cc8, 0xb6630ca6])[..]);
    }

    #[test]
    fn aes192_expansion_matches_fips_appendix_a2() {
        let key = [
            0x8e, 0x73, 0xb0, 0xf7, 0xda, 0x0e, 0x64, 0x52, 0xc8, 0x10, 0xf3, 0x2b, 0x80, 0x90,
            0x79, 0xe5, 0x62, 0xf8, 0xea, 0xd2, 0x52, 0x2c, 0x6b, 0x7b,
        ];
        let schedule = expand_key(&key).expect("valid key");
        let words = schedule.words();
        assert_eq!(words[6], 0xfe0c91f7u32.swap_bytes());
        assert_eq!(words[51], 0x01002202u32.swap_bytes());
    }

    #[test]
    fn aes256_expansion_matches_fips_appendix_a3() {
        let key = [
            0x60, 0x3d, 0xeb, 0x10, 0x15, 0xca, 0x71, 0xbe, 0x2b, 0x73, 0xae, 0xf0, 0x85, 0x7d,
            0x77, 0x81, 0x1f, 0x35, 0x2c, 0x07, 0x3b, 0x61, 0x08, 0xd7, 0x2d, 0x98, 0x10, 0xa3,
            0x09, 0x14, 0xdf, 0xf4,
        ];
        let schedule = expand_key(&key).expect("valid key");
        let words = schedule.words();
        assert_eq!(words[8], 0x9ba35411u32.swap_bytes());
        assert_eq!(words[12], 0xa8b09c1au32.swap_bytes());
        assert_eq!(words[59], 0x706c631eu32.swap_bytes());
    }
}
