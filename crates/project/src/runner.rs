use std::path::Path;
use std::process::{Command, Stdio};

pub const DEFAULT_PROGRAM: &str = "prcs";

/// Captured result of one command invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, or `None` when the process was killed by a signal.
    pub status: Option<i32>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }
}

/// Runs the prcs command with the given arguments.
///
/// [`SystemRunner`] spawns a real process; tests substitute a fake that
/// simulates the tool.
pub trait CommandRunner {
    fn run(&self, args: &[String], cwd: Option<&Path>) -> Result<CommandOutput, std::io::Error>;
}

/// Spawns the configured program and waits for it, stdin closed.
#[derive(Debug, Clone)]
pub struct SystemRunner {
    program: String,
}

impl SystemRunner {
    pub fn new(program: impl Into<String>) -> Self {
        SystemRunner {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Default for SystemRunner {
    fn default() -> Self {
        SystemRunner::new(DEFAULT_PROGRAM)
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, args: &[String], cwd: Option<&Path>) -> Result<CommandOutput, std::io::Error> {
        let mut cmd = Command::new(&self.program);
        cmd.args(args).stdin(Stdio::null());
        if let Some(dir) = cwd {
            cmd.current_dir(dir);
        }
        tracing::debug!(program = %self.program, ?args, ?cwd, "spawning");
        let output = cmd.output()?;
        Ok(CommandOutput {
            status: output.status.code(),
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_program_is_prcs() {
        assert_eq!(SystemRunner::default().program(), "prcs");
    }

    #[test]
    fn missing_program_is_an_io_error() {
        let runner = SystemRunner::new("prcs-definitely-not-installed-here");
        let err = runner.run(&["info".to_owned()], None).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    }

    #[test]
    fn success_requires_zero_exit() {
        let mut out = CommandOutput::default();
        assert!(!out.success());
        out.status = Some(0);
        assert!(out.success());
        out.status = Some(2);
        assert!(!out.success());
    }
}
