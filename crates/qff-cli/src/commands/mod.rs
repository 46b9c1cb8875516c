//! CLI command implementations.

pub mod common;
pub mod friends;
pub mod search;
pub mod serve;
pub mod version;
