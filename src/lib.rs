//! # Spark Submit Plugin
//!
//! Builds a `spark-submit` command line from declarative CI plugin settings and
//! runs it.
//!
//! ## Modules
//!
//! - `config` - Submit configuration, environment decoration and placeholder processing
//! - `template` - Placeholder resolution and command line rendering
//! - `plugin` - The end-to-end plugin run
//! - `subprocess` - Process execution abstraction with a mock for tests
pub mod config;
pub mod error;
pub mod plugin;
pub mod subprocess;
pub mod template;

pub use error::{Error, Result};
