//! Block representation helpers.

/// Cipher block size in bytes.
pub const BLOCK_SIZE: usize = 16;

/// AES block of 16 bytes.
pub type Block = [u8; BLOCK_SIZE];

/// Copies a block-sized chunk into an owned block.
#[inline]
pub(crate) fn load(chunk: &[u8]) -> Block {
    let mut block = [0u8; BLOCK_SIZE];
    block.copy_from_slice(chunk);
    block
}
