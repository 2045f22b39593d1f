pub mod pdf;
pub mod scanner;

use crate::error::{PaperbindError, Result};
use std::env;
use std::process::{Command, Stdio};

/// One external tool call, including its exit-status policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInvocation {
    pub program: String,
    pub args: Vec<String>,
    /// Treat a nonzero exit as success. The scanner driver reports
    /// spurious failure codes, so its invocations set this.
    pub tolerate_nonzero: bool,
}

impl ToolInvocation {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            tolerate_nonzero: false,
        }
    }

    pub fn tolerate_nonzero(mut self) -> Self {
        self.tolerate_nonzero = true;
        self
    }
}

/// Seam between the command handlers and the operating system.
pub trait ToolRunner {
    fn run(&self, invocation: &ToolInvocation) -> Result<()>;
}

/// Runs tools as child processes, one at a time, waiting for each to exit.
pub struct SystemRunner {
    verbose: bool,
}

impl SystemRunner {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// `VERBOSE=1` echoes each command line and inherits child stdio.
    pub fn from_env() -> Self {
        Self::new(env::var("VERBOSE").map(|v| v == "1").unwrap_or(false))
    }
}

impl ToolRunner for SystemRunner {
    fn run(&self, invocation: &ToolInvocation) -> Result<()> {
        tracing::debug!(
            program = %invocation.program,
            args = ?invocation.args,
            "running external tool"
        );

        if self.verbose {
            println!("{} {}", invocation.program, invocation.args.join(" "));
        }

        let mut command = Command::new(&invocation.program);
        command.args(&invocation.args);

        if self.verbose {
            command
                .stdin(Stdio::inherit())
                .stdout(Stdio::inherit())
                .stderr(Stdio::inherit());
        } else {
            command
                .stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::null());
        }

        let status = command.status().map_err(|e| {
            PaperbindError::ToolExecution(format!("Failed to run {}: {}", invocation.program, e))
        })?;

        if !status.success() && !invocation.tolerate_nonzero {
            return Err(PaperbindError::ToolExecution(format!(
                "{} exited with status {}",
                invocation.program,
                status.code().unwrap_or(-1)
            )));
        }

        Ok(())
    }
}
