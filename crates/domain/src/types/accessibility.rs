//! Entry accessibility levels
//!
//! Controls when a stored entry may be read back relative to device lock
//! state. The level is fixed when the entry is first inserted and is not
//! changed by later updates.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::VaultError;

/// Protection class applied to entries when they are written to the vault.
///
/// The `ThisDeviceOnly` variants additionally mark the entry as excluded
/// from device-to-device migration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Accessibility {
    /// Readable once the device has been unlocked after boot.
    AfterFirstUnlock,
    /// As `AfterFirstUnlock`, never migrated to another device.
    AfterFirstUnlockThisDeviceOnly,
    /// Always readable.
    Always,
    /// Always readable, never migrated to another device.
    AlwaysThisDeviceOnly,
    /// Readable only while unlocked, and only on devices with a passcode set.
    WhenPasscodeSetThisDeviceOnly,
    /// Readable only while the device is unlocked.
    WhenUnlocked,
    /// Readable only while unlocked, never migrated to another device.
    WhenUnlockedThisDeviceOnly,
}

impl Accessibility {
    /// Stable string tag used for persistence.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AfterFirstUnlock => "after_first_unlock",
            Self::AfterFirstUnlockThisDeviceOnly => "after_first_unlock_this_device_only",
            Self::Always => "always",
            Self::AlwaysThisDeviceOnly => "always_this_device_only",
            Self::WhenPasscodeSetThisDeviceOnly => "when_passcode_set_this_device_only",
            Self::WhenUnlocked => "when_unlocked",
            Self::WhenUnlockedThisDeviceOnly => "when_unlocked_this_device_only",
        }
    }
}

impl Default for Accessibility {
    /// The most restrictive level that still allows foreground use.
    fn default() -> Self {
        Self::WhenUnlockedThisDeviceOnly
    }
}

impl fmt::Display for Accessibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Accessibility {
    type Err = VaultError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "after_first_unlock" => Ok(Self::AfterFirstUnlock),
            "after_first_unlock_this_device_only" => Ok(Self::AfterFirstUnlockThisDeviceOnly),
            "always" => Ok(Self::Always),
            "always_this_device_only" => Ok(Self::AlwaysThisDeviceOnly),
            "when_passcode_set_this_device_only" => Ok(Self::WhenPasscodeSetThisDeviceOnly),
            "when_unlocked" => Ok(Self::WhenUnlocked),
            "when_unlocked_this_device_only" => Ok(Self::WhenUnlockedThisDeviceOnly),
            other => Err(VaultError::InvalidAccessibility(other.to_string())),
        }
    }
}
