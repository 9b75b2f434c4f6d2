//! AES key schedule and block encryption/decryption for all key sizes.

use log::debug;
use zeroize::{Zeroize, ZeroizeOnDrop};

use sec_aes_core::{check_buffers, Block, KeySize, Result, BLOCK_SIZE};

use crate::round::{
    add_round_key, inv_mix_columns, inv_shift_rows, inv_sub_bytes, mix_columns, shift_rows,
    sub_bytes,
};
use crate::sbox::SBOX;

const RCON: [u8; 10] = [0x01, 0x02, 0x04, 0x08, 0x10, 0x20, 0x40, 0x80, 0x1b, 0x36];

fn rot_word(word: u32) -> u32 {
    word.rotate_left(8)
}

fn sub_word(word: u32) -> u32 {
    u32::from_be_bytes(word.to_be_bytes().map(|b| SBOX[b as usize]))
}

/// Expanded round keys, one 16-byte block per round.
#[derive(Clone, Debug, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct RoundKeys(Vec<Block>);

impl RoundKeys {
    /// Returns the round key at the requested index (`0..=rounds`).
    #[inline]
    pub fn get(&self, round: usize) -> &Block {
        &self.0[round]
    }

    /// Number of rounds covered by the keys.
    #[inline]
    pub fn rounds(&self) -> usize {
        self.0.len() - 1
    }
}

/// Expands a 16, 24 or 32 byte key into `rounds + 1` round keys.
pub fn expand_key(key: &[u8]) -> Result<RoundKeys> {
    let size = KeySize::from_len(key.len())?;
    let nk = size.words();
    let total = size.schedule_words();

    let mut w: Vec<u32> = key
        .chunks_exact(4)
        .map(|chunk| u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect();
    w.reserve_exact(total - nk);

    for i in nk..total {
        let mut temp = w[i - 1];
        if i % nk == 0 {
            temp = sub_word(rot_word(temp)) ^ (u32::from(RCON[i / nk - 1]) << 24);
        } else if nk > 6 && i % nk == 4 {
            temp = sub_word(temp);
        }
        w.push(w[i - nk] ^ temp);
    }

    let round_keys = w
        .chunks_exact(4)
        .map(|words| {
            let mut block = [0u8; BLOCK_SIZE];
            for (dst, word) in block.chunks_exact_mut(4).zip(words) {
                dst.copy_from_slice(&word.to_be_bytes());
            }
            block
        })
        .collect();
    w.zeroize();

    Ok(RoundKeys(round_keys))
}

/// AES cipher keyed for one of the three key sizes.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Aes {
    round_keys: RoundKeys,
}

impl Aes {
    /// Builds a cipher from a raw key.
    pub fn new(key: &[u8]) -> Result<Self> {
        let round_keys = expand_key(key)?;
        debug!("standard-operation cipher ready: {} rounds", round_keys.rounds());
        Ok(Self { round_keys })
    }

    /// Round count.
    pub fn rounds(&self) -> usize {
        self.round_keys.rounds()
    }

    /// Encrypts a single 16-byte block.
    pub fn encrypt_block(&self, block: &Block) -> Block {
        let rounds = self.rounds();
        let mut state = *block;

        add_round_key(&mut state, self.round_keys.get(0));
        for round in 1..rounds {
            sub_bytes(&mut state);
            shift_rows(&mut state);
            mix_columns(&mut state);
            add_round_key(&mut state, self.round_keys.get(round));
        }
        sub_bytes(&mut state);
        shift_rows(&mut state);
        add_round_key(&mut state, self.round_keys.get(rounds));

        state
    }

    /// Decrypts a single 16-byte block.
    pub fn decrypt_block(&self, block: &Block) -> Block {
        let rounds = self.rounds();
        let mut state = *block;

        add_round_key(&mut state, self.round_keys.get(rounds));
        for round in (1..rounds).rev() {
            inv_shift_rows(&mut state);
            inv_sub_bytes(&mut state);
            add_round_key(&mut state, self.round_keys.get(round));
            inv_mix_columns(&mut state);
        }
        inv_shift_rows(&mut state);
        inv_sub_bytes(&mut state);
        add_round_key(&mut state, self.round_keys.get(0));

        state
    }

    /// Encrypts a block-aligned buffer, one block at a time.
    pub fn encrypt(&self, input: &[u8], output: &mut [u8]) -> Result<()> {
        self.process(input, output, Self::encrypt_block)
    }

    /// Decrypts a block-aligned buffer, one block at a time.
    pub fn decrypt(&self, input: &[u8], output: &mut [u8]) -> Result<()> {
        self.process(input, output, Self::decrypt_block)
    }

    fn process(
        &self,
        input: &[u8],
        output: &mut [u8],
        transform: fn(&Self, &Block) -> Block,
    ) -> Result<()> {
        check_buffers(input, output)?;
        for (src, dst) in input
            .chunks_exact(BLOCK_SIZE)
            .zip(output.chunks_exact_mut(BLOCK_SIZE))
        {
            let mut block = [0u8; BLOCK_SIZE];
            block.copy_from_slice(src);
            dst.copy_from_slice(&transform(self, &block));
        }
        Ok(())
    }
}

impl core::fmt::Debug for Aes {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Aes")
            .field("rounds", &self.rounds())
            .finish_non_exhaustive()
    }
}
