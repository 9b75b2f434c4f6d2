//! The backend interface and its two implementations.

use log::warn;

use sec_aes_core::{init_tables, Error, LegacyContext, Result};
use sec_aes_so::Aes;

use crate::version::Version;

/// Common surface of an AES backend.
///
/// A backend starts without a key; `encrypt`/`decrypt` fail with
/// [`Error::NotInitialized`] until `init_key` succeeds. A failed `init_key`
/// keeps the previously installed key.
pub trait AesBackend {
    /// Version this backend implements.
    fn version(&self) -> Version;

    /// Installs a new key, replacing and wiping any previous one.
    fn init_key(&mut self, key: &[u8]) -> Result<()>;

    /// Re-arms the backend. No chaining state is created.
    fn init_vector(&mut self) -> Result<()>;

    /// Returns true once a key has been installed.
    fn is_keyed(&self) -> bool;

    /// Encrypts a block-aligned buffer of the same length as `output`.
    fn encrypt(&mut self, input: &[u8], output: &mut [u8]) -> Result<()>;

    /// Decrypts a block-aligned buffer of the same length as `output`.
    fn decrypt(&mut self, input: &[u8], output: &mut [u8]) -> Result<()>;
}

/// Backend over [`LegacyContext`].
#[derive(Debug, Default)]
pub struct LegacyBackend {
    ctx: Option<LegacyContext>,
}

impl LegacyBackend {
    /// Creates a backend with no key.
    pub fn new() -> Self {
        Self::default()
    }

    fn context(&mut self) -> Result<&mut LegacyContext> {
        self.ctx.as_mut().ok_or_else(|| {
            warn!("legacy backend used before key initialization");
            Error::NotInitialized
        })
    }
}

impl AesBackend for LegacyBackend {
    fn version(&self) -> Version {
        Version::Legacy
    }

    fn init_key(&mut self, key: &[u8]) -> Result<()> {
        self.ctx = Some(LegacyContext::new(key)?);
        Ok(())
    }

    /// Only rebuilds the field and S-box tables; the legacy engine has no IV.
    fn init_vector(&mut self) -> Result<()> {
        match self.ctx.as_mut() {
            Some(ctx) => ctx.init_vector(),
            None => init_tables(),
        }
        Ok(())
    }

    fn is_keyed(&self) -> bool {
        self.ctx.is_some()
    }

    fn encrypt(&mut self, input: &[u8], output: &mut [u8]) -> Result<()> {
        self.context()?.encrypt(input, output)
    }

    fn decrypt(&mut self, input: &[u8], output: &mut [u8]) -> Result<()> {
        self.context()?.decrypt(input, output)
    }
}

/// Backend over the standard-operation [`Aes`] engine.
#[derive(Debug, Default)]
pub struct StandardBackend {
    cipher: Option<Aes>,
}

impl StandardBackend {
    /// Creates a backend with no key.
    pub fn new() -> Self {
        Self::default()
    }

    fn cipher(&self) -> Result<&Aes> {
        self.cipher.as_ref().ok_or_else(|| {
            warn!("standard-operation backend used before key initialization");
            Error::NotInitialized
        })
    }
}

impl AesBackend for StandardBackend {
    fn version(&self) -> Version {
        Version::StandardOperation
    }

    fn init_key(&mut self, key: &[u8]) -> Result<()> {
        self.cipher = Some(Aes::new(key)?);
        Ok(())
    }

    fn init_vector(&mut self) -> Result<()> {
        Ok(())
    }

    fn is_keyed(&self) -> bool {
        self.cipher.is_some()
    }

    fn encrypt(&mut self, input: &[u8], output: &mut [u8]) -> Result<()> {
        self.cipher()?.encrypt(input, output)
    }

    fn decrypt(&mut self, input: &[u8], output: &mut [u8]) -> Result<()> {
        self.cipher()?.decrypt(input, output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backends() -> Vec<Box<dyn AesBackend>> {
        vec![
            Box::new(LegacyBackend::new()),
            Box::new(StandardBackend::new()),
        ]
    }

    #[test]
    fn unkeyed_backends_refuse_work() {
        for mut backend in backends() {
            let mut out = [0u8; 16];
            assert!(!backend.is_keyed());
            assert_eq!(backend.encrypt(&[0u8; 16], &mut out), Err(Error::NotInitialized));
            assert_eq!(backend.decrypt(&[0u8; 16], &mut out), Err(Error::NotInitialized));
            assert_eq!(backend.init_vector(), Ok(()));
        }
    }

    #[test]
    fn failed_rekey_keeps_previous_key() {
        for mut backend in backends() {
            backend.init_key(&[0u8; 16]).expect("valid key");
            assert_eq!(
                backend.init_key(&[0u8; 7]),
                Err(Error::InvalidKeyLength { len: 7 })
            );
            let mut out = [0u8; 16];
            backend.encrypt(&[0u8; 16], &mut out).expect("keyed");
            assert_eq!(hex::encode(out), "66e94bd4ef8a2c3b884cfa59ca342b2e");
        }
    }

    #[test]
    fn init_vector_keeps_key() {
        for mut backend in backends() {
            backend.init_key(&[0u8; 32]).expect("valid key");
            backend.init_vector().expect("re-arm");
            let mut out = [0u8; 16];
            backend.encrypt(&[0u8; 16], &mut out).expect("keyed");
            assert_eq!(hex::encode(out), "dc95c078a2408989ad48a21492842087");
        }
    }
}
