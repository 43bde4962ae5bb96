//! # broker-catalog
//!
//! Lists the candidate license objects a broker may hand out. Backends only
//! list raw keys; [`CatalogReader`] adds suffix filtering and the listing
//! retry policy.

pub mod provider;
pub mod providers;
pub mod reader;

pub use provider::build_catalog;
pub use reader::CatalogReader;
