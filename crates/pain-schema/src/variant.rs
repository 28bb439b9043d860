//! Supported `pain.001` message variants

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the eight supported customer credit transfer initiation versions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MessageVariant {
    #[serde(rename = "pain.001.001.03")]
    V03,
    #[serde(rename = "pain.001.001.04")]
    V04,
    #[serde(rename = "pain.001.001.05")]
    V05,
    #[serde(rename = "pain.001.001.06")]
    V06,
    #[serde(rename = "pain.001.001.07")]
    V07,
    #[serde(rename = "pain.001.001.08")]
    V08,
    #[serde(rename = "pain.001.001.09")]
    V09,
    #[serde(rename = "pain.001.001.10")]
    V10,
}

impl MessageVariant {
    /// All supported variants in version order
    pub const ALL: [MessageVariant; 8] = [
        Self::V03,
        Self::V04,
        Self::V05,
        Self::V06,
        Self::V07,
        Self::V08,
        Self::V09,
        Self::V10,
    ];

    /// Identifier such as `pain.001.001.03`
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::V03 => "pain.001.001.03",
            Self::V04 => "pain.001.001.04",
            Self::V05 => "pain.001.001.05",
            Self::V06 => "pain.001.001.06",
            Self::V07 => "pain.001.001.07",
            Self::V08 => "pain.001.001.08",
            Self::V09 => "pain.001.001.09",
            Self::V10 => "pain.001.001.10",
        }
    }

    /// Two-digit version suffix
    #[must_use]
    pub const fn version(self) -> u8 {
        match self {
            Self::V03 => 3,
            Self::V04 => 4,
            Self::V05 => 5,
            Self::V06 => 6,
            Self::V07 => 7,
            Self::V08 => 8,
            Self::V09 => 9,
            Self::V10 => 10,
        }
    }
}

impl fmt::Display for MessageVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageVariant {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str() == s.trim())
            .ok_or_else(|| Error::unsupported_variant(s))
    }
}
