//! Vault configuration
//!
//! A [`VaultConfig`] fixes the scope every operation runs under: the
//! service namespace, an optional access group shared between
//! applications, and the accessibility level applied to newly inserted
//! entries. Validation happens at construction so a vault handle never
//! carries an invalid scope.

use serde::{Deserialize, Serialize};

use crate::errors::{Result, VaultError};
use crate::types::Accessibility;

/// Scope and write policy for a vault handle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultConfig {
    service: String,
    access_group: Option<String>,
    accessibility: Accessibility,
}

impl VaultConfig {
    /// Create a configuration with the default accessibility level.
    ///
    /// # Errors
    /// Returns [`VaultError::InvalidServiceName`] when the service is
    /// empty or whitespace-only, and [`VaultError::InvalidAccessGroup`]
    /// when an access group is given but blank.
    pub fn new(service: impl Into<String>) -> Result<Self> {
        Self::with_options(service, None::<String>, Accessibility::default())
    }

    /// Create a configuration with an explicit access group and
    /// accessibility level.
    ///
    /// # Errors
    /// Same validation as [`VaultConfig::new`].
    pub fn with_options(
        service: impl Into<String>,
        access_group: Option<impl Into<String>>,
        accessibility: Accessibility,
    ) -> Result<Self> {
        let service = service.into();
        if service.trim().is_empty() {
            return Err(VaultError::InvalidServiceName);
        }

        let access_group = access_group.map(Into::into);
        if let Some(group) = &access_group {
            if group.trim().is_empty() {
                return Err(VaultError::InvalidAccessGroup);
            }
        }

        Ok(Self { service, access_group, accessibility })
    }

    /// The service namespace stamped on every entry.
    pub fn service(&self) -> &str {
        &self.service
    }

    /// The access group shared between applications, if any.
    pub fn access_group(&self) -> Option<&str> {
        self.access_group.as_deref()
    }

    /// Accessibility level applied to newly inserted entries.
    pub fn accessibility(&self) -> Accessibility {
        self.accessibility
    }
}
