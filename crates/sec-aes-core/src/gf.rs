//! GF(2^8) arithmetic over the AES polynomial x^8 + x^4 + x^3 + x + 1.
//!
//! Multiplication and inversion go through discrete log/antilog tables
//! generated once from the generator `0x03`.

use std::sync::LazyLock;

/// Reduction polynomial, including the x^8 term.
const POLYNOMIAL: u16 = 0x11b;

/// Multiplicative generator used to walk the field.
const GENERATOR: u8 = 0x03;

/// Order of the multiplicative group.
const GROUP_ORDER: usize = 255;

pub(crate) struct FieldTables {
    log: [u8; 256],
    ilog: [u8; 256],
}

impl FieldTables {
    fn build() -> Self {
        let mut log = [0u8; 256];
        let mut ilog = [0u8; 256];

        let mut value = 1u8;
        for exponent in 0..GROUP_ORDER {
            log[value as usize] = exponent as u8;
            ilog[exponent] = value;
            value = mul_manual(value, GENERATOR);
        }
        // g^255 == g^0, needed by `inverse(1)`.
        ilog[GROUP_ORDER] = ilog[0];

        Self { log, ilog }
    }
}

pub(crate) static FIELD: LazyLock<FieldTables> = LazyLock::new(FieldTables::build);

/// Multiplies two field elements with shift-and-add, reducing by `0x11b`.
///
/// This is the table-free multiply used to build the log tables; prefer
/// [`multiply`] elsewhere.
pub fn mul_manual(a: u8, mut b: u8) -> u8 {
    let mut acc = a as u16;
    let mut product = 0u8;
    while b != 0 {
        if b & 0x01 != 0 {
            product ^= acc as u8;
        }
        acc <<= 1;
        b >>= 1;
        if acc & 0x100 != 0 {
            acc ^= POLYNOMIAL;
        }
    }
    product
}

/// Multiplies two field elements through the log tables.
#[inline]
pub fn multiply(a: u8, b: u8) -> u8 {
    if a == 0 || b == 0 {
        return 0;
    }
    let tables = &*FIELD;
    let sum = tables.log[a as usize] as usize + tables.log[b as usize] as usize;
    tables.ilog[sum % GROUP_ORDER]
}

/// Returns the multiplicative inverse, mapping `0` to `0` by convention.
#[inline]
pub fn inverse(a: u8) -> u8 {
    if a == 0 {
        return 0;
    }
    let tables = &*FIELD;
    tables.ilog[GROUP_ORDER - tables.log[a as usize] as usize]
}
