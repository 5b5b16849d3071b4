//! String templating used by the plugin.
//!
//! Two independent pieces with different strictness:
//! - [`resolve`]: strict `{{ .NAME }}` substitution against the environment
//! - [`CommandAssembler`]: renders the final spark-submit command line

pub mod command;
pub mod placeholder;

pub use command::{CommandAssembler, SPARK_SUBMIT_BIN};
pub use placeholder::resolve;
