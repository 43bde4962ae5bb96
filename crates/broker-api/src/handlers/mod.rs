//! Request handlers.

pub mod allocation;
pub mod health;
