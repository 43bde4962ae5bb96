//! Object listing trait used by the resource catalog.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::pool::PoolLocation;

/// A backend that can list object keys under a prefix.
///
/// Implementations return raw keys; filtering to license objects and retry
/// policy live in the catalog reader on top of this trait.
#[async_trait]
pub trait ObjectLister: Send + Sync + std::fmt::Debug + 'static {
    /// Return the locator scheme for keys from this backend (e.g. "s3").
    fn scheme(&self) -> &str;

    /// List every object key under the pool's prefix.
    async fn list_keys(&self, pool: &PoolLocation) -> AppResult<Vec<String>>;
}
