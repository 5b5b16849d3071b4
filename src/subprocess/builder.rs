use crate::subprocess::ProcessCommand;

pub struct ProcessCommandBuilder {
    command: ProcessCommand,
}

impl ProcessCommandBuilder {
    pub fn new(program: &str) -> Self {
        Self {
            command: ProcessCommand {
                program: program.to_string(),
                args: Vec::new(),
            },
        }
    }

    /// Run `script` through a shell, e.g. `/bin/bash -c <script>`.
    pub fn shell(shell: &str, flag: &str, script: &str) -> Self {
        Self::new(shell).arg(flag).arg(script)
    }

    pub fn arg(mut self, arg: &str) -> Self {
        self.command.args.push(arg.to_string());
        self
    }

    pub fn build(self) -> ProcessCommand {
        self.command
    }
}
