//! Fleet membership for the license broker.
//!
//! A [`FleetDirectory`](broker_core::traits::FleetDirectory) answers "who is
//! in this fleet right now"; the [`MembershipAuthorizer`] turns that into a
//! yes/no decision for one client.

pub mod authorizer;
pub mod directories;
pub mod provider;

pub use authorizer::MembershipAuthorizer;
pub use provider::build_directory;
