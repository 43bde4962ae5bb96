//! Newtype wrappers around [`String`] for broker identifiers.
//!
//! Using distinct types prevents accidentally passing a `ResourceId` where a
//! `ClientId` is expected, which matters for a record that stores both as
//! bare strings side by side.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::result::AppResult;
use crate::types::record::PAIRING_SEPARATOR;

/// Longest client identifier accepted from a request.
pub const MAX_CLIENT_ID_LEN: usize = 256;

/// Macro to define a newtype identifier wrapper around `String`.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Return the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the identifier and return the inner string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> String {
                id.0
            }
        }
    };
}

define_id!(
    /// Identifier of a requesting client (an instance id such as `i-0abc`).
    ClientId
);

define_id!(
    /// Identifier of an allocatable resource (an object key such as
    /// `deploy/license/lic1.lic`).
    ResourceId
);

impl ClientId {
    /// Parse and validate a client identifier.
    ///
    /// The id must be non-empty, at most [`MAX_CLIENT_ID_LEN`] bytes, and must
    /// not contain the pairing separator (otherwise its pairing token would be
    /// ambiguous).
    pub fn parse(raw: impl Into<String>) -> AppResult<Self> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(AppError::validation("Client id must not be empty"));
        }
        if trimmed.len() > MAX_CLIENT_ID_LEN {
            return Err(AppError::validation(format!(
                "Client id exceeds {MAX_CLIENT_ID_LEN} bytes"
            )));
        }
        if trimmed.contains(PAIRING_SEPARATOR) {
            return Err(AppError::validation(
                "Client id must not contain the pairing separator",
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Wrap a string already known to be a valid client id.
    pub(crate) fn from_trusted(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }
}

impl ResourceId {
    /// Create a resource identifier from a listed object key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The final path segment of the resource key (the file name).
    pub fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }
}

impl From<&str> for ResourceId {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for ResourceId {
    fn from(key: String) -> Self {
        Self::new(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_id_trims_whitespace() {
        let id = ClientId::parse("  i-0abc  ").expect("valid id");
        assert_eq!(id.as_str(), "i-0abc");
    }

    #[test]
    fn test_client_id_rejects_empty() {
        assert!(ClientId::parse("   ").is_err());
    }

    #[test]
    fn test_client_id_rejects_separator() {
        let raw = format!("i-1{PAIRING_SEPARATOR}evil");
        assert!(ClientId::parse(raw).is_err());
    }

    #[test]
    fn test_client_id_rejects_oversized() {
        assert!(ClientId::parse("x".repeat(MAX_CLIENT_ID_LEN + 1)).is_err());
    }

    #[test]
    fn test_resource_file_name() {
        assert_eq!(ResourceId::new("a/b/lic1.lic").file_name(), "lic1.lic");
        assert_eq!(ResourceId::new("lic2.lic").file_name(), "lic2.lic");
    }

    #[test]
    fn test_serde_transparent() {
        let id = ResourceId::new("license/lic1.lic");
        let json = serde_json::to_string(&id).expect("serialize");
        assert_eq!(json, "\"license/lic1.lic\"");
    }
}
