//! Backend selection for the AES engines.
//!
//! [`SecAes`] owns one instance of each backend and forwards key setup,
//! vector setup and buffer processing to whichever [`Version`] is active.
//! Both backends implement [`AesBackend`], so callers that know the version
//! up front can also hold a backend directly.
//!
//! ```
//! use sec_aes::{SecAes, Version};
//!
//! let mut aes = SecAes::new();
//! aes.init_key(&[0u8; 32], Version::Legacy)?;
//!
//! let plain = [0u8; 32];
//! let mut cipher = [0u8; 32];
//! aes.encrypt(&plain, &mut cipher)?;
//!
//! let mut back = [0u8; 32];
//! aes.decrypt(&cipher, &mut back)?;
//! assert_eq!(back, plain);
//! # Ok::<(), sec_aes::Error>(())
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod backend;
mod dispatch;
mod version;

pub use crate::backend::{AesBackend, LegacyBackend, StandardBackend};
pub use crate::dispatch::SecAes;
pub use crate::version::Version;
pub use sec_aes_core::{Block, Error, KeySize, Result, BLOCK_SIZE};
