//! S-box generation from the field inverse and the AES affine transform.

use std::sync::LazyLock;

use crate::gf::{inverse, FIELD};

/// Additive constant of the affine transform.
const AFFINE_CONSTANT: u8 = 0x63;

struct SBoxes {
    forward: [u8; 256],
    inverse: [u8; 256],
}

static SBOXES: LazyLock<SBoxes> = LazyLock::new(|| {
    let (mut forward, mut inverse) = generate();
    // Pinned entries of the legacy table; must survive regeneration unchanged.
    forward[0x01] = 0x7c;
    inverse[0x7c] = 0x01;
    inverse[0x63] = 0x00;
    SBoxes { forward, inverse }
});

/// Affine transform over GF(2): each output bit is the XOR of input bits
/// `i, i+4, i+5, i+6, i+7 (mod 8)` and bit `i` of `0x63`.
fn affine(inv: u8) -> u8 {
    let bit = |n: usize| (inv >> (n & 7)) & 1;
    let mut out = 0u8;
    for i in 0..8 {
        let b = bit(i)
            ^ bit(i + 4)
            ^ bit(i + 5)
            ^ bit(i + 6)
            ^ bit(i + 7)
            ^ ((AFFINE_CONSTANT >> i) & 1);
        out |= b << i;
    }
    out
}

/// Builds the forward and inverse tables without the pinned entries.
fn generate() -> ([u8; 256], [u8; 256]) {
    let mut forward = [0u8; 256];
    let mut inv_table = [0u8; 256];
    for i in 0..=255u8 {
        let s = affine(inverse(i));
        forward[i as usize] = s;
        inv_table[s as usize] = i;
    }
    (forward, inv_table)
}

/// Builds the field and S-box tables if they do not exist yet.
///
/// Construction happens once per process; later calls return immediately.
pub fn init_tables() {
    LazyLock::force(&FIELD);
    LazyLock::force(&SBOXES);
}

/// Forward S-box lookup.
#[inline]
pub fn sbox(byte: u8) -> u8 {
    SBOXES.forward[byte as usize]
}

/// Inverse S-box lookup.
#[inline]
pub fn inv_sbox(byte: u8) -> u8 {
    SBOXES.inverse[byte as usize]
}

/// Returns the full forward S-box.
pub fn sbox_table() -> &'static [u8; 256] {
    &SBOXES.forward
}

/// Returns the full inverse S-box.
pub fn inv_sbox_table() -> &'static [u8; 256] {
    &SBOXES.inverse
}
