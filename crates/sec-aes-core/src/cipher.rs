//! Legacy cipher context: block transform driver and buffer processor.

use log::{debug, warn};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::block::{load, Block, BLOCK_SIZE};
use crate::error::{Error, Result};
use crate::key::{expand_key, KeySchedule, KeySize};
use crate::round::{
    add_round_key, inv_mix_columns, inv_shift_rows, inv_sub_bytes, load_state, mix_columns,
    shift_rows, store_state, sub_bytes, State,
};
use crate::sbox::init_tables;

/// Validates a buffer pair before any block is processed.
///
/// Lengths must match and be a multiple of [`BLOCK_SIZE`].
pub fn check_buffers(input: &[u8], output: &[u8]) -> Result<()> {
    if input.len() != output.len() {
        warn!(
            "rejecting buffers: input len {} != output len {}",
            input.len(),
            output.len()
        );
        return Err(Error::LengthMismatch {
            input: input.len(),
            output: output.len(),
        });
    }
    if input.len() % BLOCK_SIZE != 0 {
        warn!(
            "rejecting buffers: len {} is not a multiple of {}",
            input.len(),
            BLOCK_SIZE
        );
        return Err(Error::InvalidBlockAlignment { len: input.len() });
    }
    Ok(())
}

/// Owned cipher context for one key.
///
/// Holds the expanded schedule plus a scratch state matrix. The scratch is
/// cleared after every block and the whole context is wiped on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct LegacyContext {
    state: State,
    schedule: KeySchedule,
}

impl LegacyContext {
    /// Builds a context from a raw 16, 24 or 32 byte key.
    pub fn new(key: &[u8]) -> Result<Self> {
        let schedule = expand_key(key)?;
        debug!(
            "legacy context ready: {:?}, {} rounds",
            schedule.size(),
            schedule.rounds()
        );
        Ok(Self {
            state: State::default(),
            schedule,
        })
    }

    /// Re-arms the field and S-box tables.
    ///
    /// Despite the name there is no initialization vector: the legacy
    /// backend keeps no chaining state, so this only forces table setup.
    pub fn init_vector(&mut self) {
        init_tables();
    }

    /// Key size this context was built for.
    pub fn key_size(&self) -> KeySize {
        self.schedule.size()
    }

    /// Round count.
    pub fn rounds(&self) -> usize {
        self.schedule.rounds()
    }

    /// Expanded key schedule.
    pub fn schedule(&self) -> &KeySchedule {
        &self.schedule
    }

    /// Encrypts a single 16-byte block.
    pub fn encrypt_block(&mut self, block: &Block) -> Block {
        let rounds = self.schedule.rounds();
        let state = &mut self.state;
        load_state(state, block);

        add_round_key(state, &self.schedule, 0);
        for round in 1..rounds {
            sub_bytes(state);
            shift_rows(state);
            mix_columns(state);
            add_round_key(state, &self.schedule, round);
        }
        sub_bytes(state);
        shift_rows(state);
        add_round_key(state, &self.schedule, rounds);

        let out = store_state(state);
        state.zeroize();
        out
    }

    /// Decrypts a single 16-byte block.
    pub fn decrypt_block(&mut self, block: &Block) -> Block {
        let rounds = self.schedule.rounds();
        let state = &mut self.state;
        load_state(state, block);

        add_round_key(state, &self.schedule, rounds);
        for round in (1..rounds).rev() {
            inv_shift_rows(state);
            inv_sub_bytes(state);
            add_round_key(state, &self.schedule, round);
            inv_mix_columns(state);
        }
        inv_shift_rows(state);
        inv_sub_bytes(state);
        add_round_key(state, &self.schedule, 0);

        let out = store_state(state);
        state.zeroize();
        out
    }

    /// Encrypts `input` block by block into `output`.
    ///
    /// Nothing is written unless both lengths validate.
    pub fn encrypt(&mut self, input: &[u8], output: &mut [u8]) -> Result<()> {
        check_buffers(input, output)?;
        for (src, dst) in input
            .chunks_exact(BLOCK_SIZE)
            .zip(output.chunks_exact_mut(BLOCK_SIZE))
        {
            dst.copy_from_slice(&self.encrypt_block(&load(src)));
        }
        Ok(())
    }

    /// Decrypts `input` block by block into `output`.
    ///
    /// Nothing is written unless both lengths validate.
    pub fn decrypt(&mut self, input: &[u8], output: &mut [u8]) -> Result<()> {
        check_buffers(input, output)?;
        for (src, dst) in input
            .chunks_exact(BLOCK_SIZE)
            .zip(output.chunks_exact_mut(BLOCK_SIZE))
        {
            dst.copy_from_slice(&self.decrypt_block(&load(src)));
        }
        Ok(())
    }
}

impl core::fmt::Debug for LegacyContext {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LegacyContext")
            .field("key_size", &self.schedule.size())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{RngCore, SeedableRng};
    use rand_chacha::ChaCha20Rng;

    const FIPS_PLAIN: [u8; 16] = [
        0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99, 0xaa, 0xbb, 0xcc, 0xdd, 0xee,
        0xff,
    ];

    fn fips_key(len: usize) -> Vec<u8> {
        (0..len as u8).collect()
    }

    #[test]
    fn encrypt_matches_fips_appendix_c() {
        let cases = [
            (16, "69c4e0d86a7b0430d8cdb78070b4c55a"),
            (24, "dda97ca4864cdfe06eaf70a0ec0d7191"),
            (32, "8ea2b7ca516745bfeafc49904b496089"),
        ];
        for (len, expected) in cases {
            let mut ctx = LegacyContext::new(&fips_key(len)).expect("valid key");
            let ct = ctx.encrypt_block(&FIPS_PLAIN);
            assert_eq!(hex::encode(ct), expected, "key length {len}");
            assert_eq!(ctx.decrypt_block(&ct), FIPS_PLAIN);
        }
    }

    #[test]
    fn zero_key_zero_block_is_stable() {
        let mut ctx = LegacyContext::new(&[0u8; 32]).expect("valid key");
        let first = ctx.encrypt_block(&[0u8; 16]);
        let second = ctx.encrypt_block(&[0u8; 16]);
        assert_eq!(first, second);
        let again = LegacyContext::new(&[0u8; 32])
            .expect("valid key")
            .encrypt_block(&[0u8; 16]);
        assert_eq!(first, again);
    }

    #[test]
    fn scratch_state_is_cleared_between_calls() {
        let mut ctx = LegacyContext::new(&[0x42u8; 16]).expect("valid key");
        ctx.encrypt_block(&[0xa5u8; 16]);
        assert_eq!(ctx.state, State::default());
        ctx.decrypt_block(&[0x5au8; 16]);
        assert_eq!(ctx.state, State::default());
    }

    #[test]
    fn buffer_round_trip_random() {
        let mut rng = ChaCha20Rng::from_seed([7u8; 32]);
        for len in [16usize, 24, 32] {
            for blocks in 1..6 {
                let mut key = vec![0u8; len];
                let mut plain = vec![0u8; blocks * BLOCK_SIZE];
                rng.fill_bytes(&mut key);
                rng.fill_bytes(&mut plain);
                let mut ctx = LegacyContext::new(&key).expect("valid key");
                let mut ct = vec![0u8; plain.len()];
                let mut pt = vec![0u8; plain.len()];
                ctx.encrypt(&plain, &mut ct).expect("aligned");
                ctx.decrypt(&ct, &mut pt).expect("aligned");
                assert_eq!(pt, plain);
            }
        }
    }

    #[test]
    fn rejects_mismatched_lengths_without_writing() {
        let mut ctx = LegacyContext::new(&[0u8; 16]).expect("valid key");
        let input = [0u8; 32];
        let mut output = [0xeeu8; 16];
        assert_eq!(
            ctx.encrypt(&input, &mut output),
            Err(Error::LengthMismatch {
                input: 32,
                output: 16
            })
        );
        assert_eq!(output, [0xeeu8; 16]);
    }

    #[test]
    fn rejects_unaligned_lengths_without_writing() {
        let mut ctx = LegacyContext::new(&[0u8; 16]).expect("valid key");
        let input = [0u8; 20];
        let mut output = [0xeeu8; 20];
        assert_eq!(
            ctx.decrypt(&input, &mut output),
            Err(Error::InvalidBlockAlignment { len: 20 })
        );
        assert_eq!(output, [0xeeu8; 20]);
    }

    #[test]
    fn empty_buffer_is_accepted() {
        let mut ctx = LegacyContext::new(&[0u8; 24]).expect("valid key");
        let mut output = [0u8; 0];
        assert_eq!(ctx.encrypt(&[], &mut output), Ok(()));
    }

    #[test]
    fn init_vector_leaves_key_usable() {
        let mut ctx = LegacyContext::new(&fips_key(16)).expect("valid key");
        ctx.init_vector();
        let ct = ctx.encrypt_block(&FIPS_PLAIN);
        assert_eq!(hex::encode(ct), "69c4e0d86a7b0430d8cdb78070b4c55a");
    }
}
