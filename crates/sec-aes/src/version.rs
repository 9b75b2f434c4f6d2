//! Backend version selector.

use core::fmt;

use sec_aes_core::Error;

/// Names one of the two interchangeable AES backends.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Version {
    /// From-scratch engine built on GF(2^8) log tables.
    #[default]
    Legacy,
    /// Byte-oriented engine with compile-time S-boxes.
    StandardOperation,
}

impl Version {
    /// Raw selector value used at the integration boundary.
    pub const fn selector(self) -> u32 {
        match self {
            Self::Legacy => 0,
            Self::StandardOperation => 1,
        }
    }
}

impl TryFrom<u32> for Version {
    type Error = Error;

    fn try_from(selector: u32) -> Result<Self, Self::Error> {
        match selector {
            0 => Ok(Self::Legacy),
            1 => Ok(Self::StandardOperation),
            _ => Err(Error::InvalidVersionSelector { selector }),
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Legacy => f.write_str("legacy"),
            Self::StandardOperation => f.write_str("so"),
        }
    }
}
