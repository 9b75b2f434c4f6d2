//! Error type shared by every backend.

use thiserror::Error;

/// Failures reported by key initialization, dispatch and buffer processing.
///
/// All failures are local: the caller's inputs are left untouched and the
/// output buffer is never written when a call fails.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// The key is not 16, 24 or 32 bytes long.
    #[error("invalid key length {len} (expected 16, 24 or 32 bytes)")]
    InvalidKeyLength {
        /// Length that was supplied.
        len: usize,
    },
    /// The raw backend selector does not name a known version.
    #[error("invalid version selector {selector}")]
    InvalidVersionSelector {
        /// Selector that was supplied.
        selector: u32,
    },
    /// Input and output buffers differ in length.
    #[error("input length {input} does not match output length {output}")]
    LengthMismatch {
        /// Input buffer length.
        input: usize,
        /// Output buffer length.
        output: usize,
    },
    /// The buffer length is not a multiple of the block size.
    #[error("buffer length {len} is not a multiple of 16 bytes")]
    InvalidBlockAlignment {
        /// Buffer length.
        len: usize,
    },
    /// The key schedule could not be allocated.
    #[error("failed to allocate the key schedule")]
    AllocationFailure,
    /// Encrypt or decrypt was called before a key was installed.
    #[error("no key has been initialized")]
    NotInitialized,
}

/// Result alias used throughout the workspace.
pub type Result<T> = core::result::Result<T, Error>;
