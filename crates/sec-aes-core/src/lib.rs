//! From-scratch Rijndael/AES engine (the "legacy" backend).
//!
//! This crate builds AES-128/192/256 directly on GF(2^8) arithmetic and provides:
//! - Log/antilog field tables and the S-box pair derived from them.
//! - Key schedule expansion for 16, 24 and 32 byte keys.
//! - A round engine working on a column-major 4×4 state matrix.
//! - [`LegacyContext`], an owned cipher context processing block-aligned buffers.
//!
//! Buffers are processed block by block with no chaining (ECB-equivalent); the
//! mode of operation, padding and key management belong to the caller. The
//! implementation relies on table lookups and is not side-channel hardened.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod block;
mod cipher;
mod error;
mod gf;
mod key;
mod round;
mod sbox;

pub use crate::block::{Block, BLOCK_SIZE};
pub use crate::cipher::{check_buffers, LegacyContext};
pub use crate::error::{Error, Result};
pub use crate::gf::{inverse, mul_manual, multiply};
pub use crate::key::{expand_key, KeySchedule, KeySize};
pub use crate::sbox::{init_tables, inv_sbox, inv_sbox_table, sbox, sbox_table};
