//! Location of the candidate resource pool.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::id::ResourceId;

/// Where candidate license objects are listed from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolLocation {
    /// Bucket (or root name) holding the objects.
    pub bucket: String,
    /// Normalized key prefix, always ending in `/` unless empty.
    pub prefix: String,
}

impl PoolLocation {
    /// Build a pool location from a deployment prefix and license sub-directory.
    ///
    /// A leading `/` is stripped from the prefix, a trailing `/` is ensured,
    /// and `license_dir` is appended the same way, so `"/deploy"` with
    /// `"license"` becomes `"deploy/license/"`.
    pub fn new(bucket: impl Into<String>, prefix: &str, license_dir: &str) -> Self {
        let mut normalized = String::new();
        for part in [prefix, license_dir] {
            let part = part.trim_matches('/');
            if !part.is_empty() {
                normalized.push_str(part);
                normalized.push('/');
            }
        }
        Self {
            bucket: bucket.into(),
            prefix: normalized,
        }
    }

    /// Locator string handed back to clients, e.g. `s3://bucket/key`.
    pub fn locator(&self, scheme: &str, resource: &ResourceId) -> String {
        format!("{scheme}://{}/{}", self.bucket, resource)
    }
}

impl fmt::Display for PoolLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.bucket, self.prefix)
    }
}
