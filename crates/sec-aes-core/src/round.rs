//! AES round transformations on the 4×4 state matrix.
//!
//! The state is indexed `state[row][column]`; block byte `i` lives at
//! `state[i % 4][i / 4]`.

use crate::block::{Block, BLOCK_SIZE};
use crate::gf::multiply;
use crate::key::KeySchedule;
use crate::sbox::{inv_sbox, sbox};

/// Row-major view of a column-major block.
pub(crate) type State = [[u8; 4]; 4];

const MIX: [[u8; 4]; 4] = [
    [0x02, 0x03, 0x01, 0x01],
    [0x01, 0x02, 0x03, 0x01],
    [0x01, 0x01, 0x02, 0x03],
    [0x03, 0x01, 0x01, 0x02],
];

const INV_MIX: [[u8; 4]; 4] = [
    [0x0e, 0x0b, 0x0d, 0x09],
    [0x09, 0x0e, 0x0b, 0x0d],
    [0x0d, 0x09, 0x0e, 0x0b],
    [0x0b, 0x0d, 0x09, 0x0e],
];

/// Loads a block into the state.
#[inline]
pub(crate) fn load_state(state: &mut State, block: &Block) {
    for (i, &byte) in block.iter().enumerate() {
        state[i & 0x03][i >> 2] = byte;
    }
}

/// Reads the state back out as a block.
#[inline]
pub(crate) fn store_state(state: &State) -> Block {
    let mut block = [0u8; BLOCK_SIZE];
    for (i, byte) in block.iter_mut().enumerate() {
        *byte = state[i & 0x03][i >> 2];
    }
    block
}

/// XORs the round key for `round` into the state.
#[inline]
pub(crate) fn add_round_key(state: &mut State, schedule: &KeySchedule, round: usize) {
    for (x, row) in state.iter_mut().enumerate() {
        for (y, cell) in row.iter_mut().enumerate() {
            *cell ^= schedule.round_key_byte(round, x, y);
        }
    }
}

/// Applies SubBytes to the state in place.
#[inline]
pub(crate) fn sub_bytes(state: &mut State) {
    for cell in state.iter_mut().flatten() {
        *cell = sbox(*cell);
    }
}

/// Applies the inverse SubBytes transformation.
#[inline]
pub(crate) fn inv_sub_bytes(state: &mut State) {
    for cell in state.iter_mut().flatten() {
        *cell = inv_sbox(*cell);
    }
}

/// Performs ShiftRows: row `x` rotates left by `x` positions.
#[inline]
pub(crate) fn shift_rows(state: &mut State) {
    for (x, row) in state.iter_mut().enumerate() {
        row.rotate_left(x);
    }
}

/// Performs the inverse of ShiftRows.
#[inline]
pub(crate) fn inv_shift_rows(state: &mut State) {
    for (x, row) in state.iter_mut().enumerate() {
        row.rotate_right(x);
    }
}

fn mix_with(state: &mut State, matrix: &[[u8; 4]; 4]) {
    for column in 0..4 {
        let input = [
            state[0][column],
            state[1][column],
            state[2][column],
            state[3][column],
        ];
        for (row, coefficients) in matrix.iter().enumerate() {
            state[row][column] = coefficients
                .iter()
                .zip(input.iter())
                .fold(0u8, |acc, (&c, &v)| acc ^ multiply(c, v));
        }
    }
}

/// MixColumns over all four columns.
#[inline]
pub(crate) fn mix_columns(state: &mut State) {
    mix_with(state, &MIX);
}

/// Inverse MixColumns over all four columns.
#[inline]
pub(crate) fn inv_mix_columns(state: &mut State) {
    mix_with(state, &INV_MIX);
}
