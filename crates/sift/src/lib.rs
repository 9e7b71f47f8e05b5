//! sift compiles flat request parameters (`where=age:gt:18&order_by=-age`)
//! into typed query fragments through a registry of named directives.
//!
//! ## Crate layout
//! - `core`: registry, built-in directives, decoder, compiler, reference query.
//! - `config`: TOML settings for reserved keys, pagination and disabled directives.
//! - `error`: the public error type returned to hosts.
//!
//! Hosts normally hold one [`Sift`] built from a [`SiftConfig`] and call
//! [`Sift::compile`] per request.
#![warn(unreachable_pub)]

pub use sift_core as core;

pub mod config;
pub mod error;
mod service;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//
// Exports
//

pub use config::{ConfigError, SiftConfig};
pub use error::{Error, ErrorKind};
pub use service::{PAGINATE_OFF, PageRequest, Sift};

///
/// Prelude
///

pub mod prelude {
    pub use crate::{Error, ErrorKind, PageRequest, Sift, SiftConfig};
    pub use sift_core::prelude::*;
}
