//! AES round transformations on the flat 16-byte state.
//!
//! Byte `col * 4 + row` holds state cell `(row, col)`.

use sec_aes_core::{Block, BLOCK_SIZE};

use crate::sbox::{gmul, INV_SBOX, SBOX};

/// Source index of each output byte under ShiftRows.
const SHIFT: [usize; BLOCK_SIZE] = shift_table(1);
/// Source index of each output byte under InvShiftRows.
const INV_SHIFT: [usize; BLOCK_SIZE] = shift_table(3);

const fn shift_table(step: usize) -> [usize; BLOCK_SIZE] {
    let mut table = [0usize; BLOCK_SIZE];
    let mut i = 0;
    while i < BLOCK_SIZE {
        let (col, row) = (i / 4, i % 4);
        table[i] = ((col + row * step) % 4) * 4 + row;
        i += 1;
    }
    table
}

fn permute(state: &mut Block, table: &[usize; BLOCK_SIZE]) {
    let src = *state;
    for (dst, &from) in state.iter_mut().zip(table.iter()) {
        *dst = src[from];
    }
}

#[inline]
pub(crate) fn sub_bytes(state: &mut Block) {
    for byte in state.iter_mut() {
        *byte = SBOX[*byte as usize];
    }
}

#[inline]
pub(crate) fn inv_sub_bytes(state: &mut Block) {
    for byte in state.iter_mut() {
        *byte = INV_SBOX[*byte as usize];
    }
}

#[inline]
pub(crate) fn shift_rows(state: &mut Block) {
    permute(state, &SHIFT);
}

#[inline]
pub(crate) fn inv_shift_rows(state: &mut Block) {
    permute(state, &INV_SHIFT);
}

fn xtime(byte: u8) -> u8 {
    (byte << 1) ^ if byte & 0x80 != 0 { 0x1b } else { 0 }
}

#[inline]
pub(crate) fn mix_columns(state: &mut Block) {
    for column in state.chunks_exact_mut(4) {
        let [a0, a1, a2, a3] = [column[0], column[1], column[2], column[3]];
        let all = a0 ^ a1 ^ a2 ^ a3;
        column[0] = a0 ^ all ^ xtime(a0 ^ a1);
        column[1] = a1 ^ all ^ xtime(a1 ^ a2);
        column[2] = a2 ^ all ^ xtime(a2 ^ a3);
        column[3] = a3 ^ all ^ xtime(a3 ^ a0);
    }
}

#[inline]
pub(crate) fn inv_mix_columns(state: &mut Block) {
    for column in state.chunks_exact_mut(4) {
        let [a0, a1, a2, a3] = [column[0], column[1], column[2], column[3]];
        column[0] = gmul(a0, 0x0e) ^ gmul(a1, 0x0b) ^ gmul(a2, 0x0d) ^ gmul(a3, 0x09);
        column[1] = gmul(a0, 0x09) ^ gmul(a1, 0x0e) ^ gmul(a2, 0x0b) ^ gmul(a3, 0x0d);
        column[2] = gmul(a0, 0x0d) ^ gmul(a1, 0x09) ^ gmul(a2, 0x0e) ^ gmul(a3, 0x0b);
        column[3] = gmul(a0, 0x0b) ^ gmul(a1, 0x0d) ^ gmul(a2, 0x09) ^ gmul(a3, 0x0e);
    }
}

#[inline]
pub(crate) fn add_round_key(state: &mut Block, round_key: &Block) {
    for (s, k) in state.iter_mut().zip(round_key.iter()) {
        *s ^= *k;
    }
}
