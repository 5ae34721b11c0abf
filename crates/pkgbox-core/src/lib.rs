//! Core logic for pkgbox container lifecycle management
//!
//! This crate provides:
//! - The container lifecycle state machine (create/start/stop/execute/
//!   remove with same-name adoption and auto-start)
//! - Package operations translated per OS family
//! - Read-only accessors that degrade instead of failing

mod error;
mod manager;
mod packages;
mod state;

pub use error::*;
pub use manager::*;
pub use packages::*;
pub use state::*;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
