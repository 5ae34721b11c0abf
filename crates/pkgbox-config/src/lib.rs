//! Configuration parsing for pkgbox
//!
//! This crate handles:
//! - Container spec documents (YAML)
//! - Engine connection settings (`~/.config/pkgbox/config.toml`)
//! - The OS family → package manager registry

mod engine;
mod error;
mod os;
mod registry;
mod spec;

pub use engine::*;
pub use error::*;
pub use os::*;
pub use registry::*;
pub use spec::*;
