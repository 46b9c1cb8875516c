//! API endpoint handlers.

pub mod friends;
pub mod health;
pub mod runs;
pub mod search;
