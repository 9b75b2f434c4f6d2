//! Standard-operation AES backend.
//!
//! A second AES-128/192/256 implementation that shares no tables with the
//! legacy engine: S-boxes are computed at compile time, round keys are stored
//! as big-endian byte blocks and the state is the flat 16-byte block. It is
//! interchangeable with [`sec_aes_core::LegacyContext`] and is used to
//! cross-check it.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod cipher;
mod round;
mod sbox;

pub use crate::cipher::{expand_key, Aes, RoundKeys};
pub use crate::sbox::{INV_SBOX, SBOX};
