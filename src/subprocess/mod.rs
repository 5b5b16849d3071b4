//! Process execution seam.
//!
//! The assembled command is handed to a [`ProcessRunner`]; production code uses
//! [`TokioProcessRunner`], tests swap in [`MockProcessRunner`].

pub mod builder;
pub mod error;
pub mod mock;
pub mod runner;


pub use builder::ProcessCommandBuilder;
pub use error::ProcessError;
pub use mock::{MockCommandConfig, MockProcessRunner};
pub use runner::{ExitStatus, ProcessCommand, ProcessOutput, ProcessRunner, TokioProcessRunner};

use std::sync::Arc;

/// Shell used to run the assembled command line
pub const DEFAULT_SHELL: &str = "/bin/bash";

/// Flag passing the command line to [`DEFAULT_SHELL`]
pub const DEFAULT_SHELL_FLAG: &str = "-c";

#[derive(Clone)]
pub struct SubprocessManager {
    runner: Arc<dyn ProcessRunner>,
}

impl SubprocessManager {
    pub fn new(runner: Arc<dyn ProcessRunner>) -> Self {
        Self { runner }
    }

    pub fn production() -> Self {
        Self::new(Arc::new(TokioProcessRunner))
    }

    #[cfg(test)]
    pub fn mock() -> (Self, MockProcessRunner) {
        let mock = MockProcessRunner::new();
        let runner = Arc::new(mock.clone()) as Arc<dyn ProcessRunner>;
        (Self::new(runner), mock)
    }

    /// Run a full command line through [`DEFAULT_SHELL`].
    pub async fn run_shell(&self, command_line: &str) -> Result<ProcessOutput, ProcessError> {
        let command =
            ProcessCommandBuilder::shell(DEFAULT_SHELL, DEFAULT_SHELL_FLAG, command_line).build();
        self.runner.run(command).await
    }
}
