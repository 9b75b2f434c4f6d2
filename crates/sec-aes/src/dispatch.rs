//! Owned dispatcher over both backends.

use log::{debug, info, warn};

use sec_aes_core::{Error, KeySize, Result};

use crate::backend::{AesBackend, LegacyBackend, StandardBackend};
use crate::version::Version;

/// Routes cipher calls to the active backend.
///
/// Each backend keeps its own key. Selecting a version through `init_key`
/// or `init_vector` makes it active; encrypt/decrypt go to the active one.
#[derive(Debug, Default)]
pub struct SecAes {
    legacy: LegacyBackend,
    standard: StandardBackend,
    active: Option<Version>,
}

impl SecAes {
    /// Creates a dispatcher with no active backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Version that encrypt/decrypt currently route to.
    pub fn active_version(&self) -> Option<Version> {
        self.active
    }

    /// Returns the backend for `version`.
    pub fn backend(&self, version: Version) -> &dyn AesBackend {
        match version {
            Version::Legacy => &self.legacy,
            Version::StandardOperation => &self.standard,
        }
    }

    fn backend_mut(&mut self, version: Version) -> &mut dyn AesBackend {
        match version {
            Version::Legacy => &mut self.legacy,
            Version::StandardOperation => &mut self.standard,
        }
    }

    /// Installs `key` on the `version` backend and makes it active.
    ///
    /// On failure the backend keeps its previous key and the active version
    /// is unchanged.
    pub fn init_key(&mut self, key: &[u8], version: Version) -> Result<()> {
        info!("initializing {version} backend");
        if let Err(err) = self.backend_mut(version).init_key(key) {
            warn!("{version} key initialization failed: {err}");
            return Err(err);
        }
        self.active = Some(version);
        debug!(
            "{version} backend active with {:?}",
            KeySize::from_len(key.len()).ok()
        );
        Ok(())
    }

    /// Same as [`SecAes::init_key`] with a raw selector.
    pub fn init_key_with_selector(&mut self, key: &[u8], selector: u32) -> Result<()> {
        let version = Self::parse_selector(selector)?;
        self.init_key(key, version)
    }

    /// Makes `version` active and re-arms it.
    ///
    /// For the legacy backend this only rebuilds tables; neither backend
    /// keeps chaining state, so there is no vector to set.
    pub fn init_vector(&mut self, version: Version) -> Result<()> {
        debug!("re-arming {version} backend");
        self.active = Some(version);
        self.backend_mut(version).init_vector()
    }

    /// Same as [`SecAes::init_vector`] with a raw selector.
    pub fn init_vector_with_selector(&mut self, selector: u32) -> Result<()> {
        let version = Self::parse_selector(selector)?;
        self.init_vector(version)
    }

    /// Encrypts through the active backend.
    pub fn encrypt(&mut self, input: &[u8], output: &mut [u8]) -> Result<()> {
        self.active_backend()?.encrypt(input, output)
    }

    /// Decrypts through the active backend.
    pub fn decrypt(&mut self, input: &[u8], output: &mut [u8]) -> Result<()> {
        self.active_backend()?.decrypt(input, output)
    }

    fn active_backend(&mut self) -> Result<&mut dyn AesBackend> {
        match self.active {
            Some(version) => Ok(self.backend_mut(version)),
            None => {
                warn!("cipher call before any backend was selected");
                Err(Error::NotInitialized)
            }
        }
    }

    fn parse_selector(selector: u32) -> Result<Version> {
        Version::try_from(selector).inspect_err(|_| warn!("invalid version selector {selector}"))
    }
}
