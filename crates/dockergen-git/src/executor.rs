use std::path::PathBuf;

use crate::command::{CommandError, Tool};

/// Abstraction over git / gh execution for testability.
///
/// Production code uses [`RealExecutor`], tests use mockall-generated mocks.
#[allow(async_fn_in_trait)]
pub trait CommandExecutor: Send + Sync {
    /// Execute a command and capture stdout.
    async fn exec(&self, tool: Tool, args: &[String]) -> Result<String, CommandError>;

    /// Execute a command, streaming output to the terminal.
    async fn exec_streaming(&self, tool: Tool, args: &[String]) -> Result<(), CommandError>;
}

/// Real executor, running every command inside `working_dir`.
pub struct RealExecutor {
    working_dir: PathBuf,
}

impl RealExecutor {
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: working_dir.into(),
        }
    }

    fn command(&self, tool: Tool, args: &[String]) -> tokio::process::Command {
        tracing::debug!(%tool, ?args, dir = %self.working_dir.display(), "running command");
        let mut cmd = tokio::process::Command::new(tool.program());
        cmd.args(args).current_dir(&self.working_dir);
        cmd
    }
}

impl CommandExecutor for RealExecutor {
    async fn exec(&self, tool: Tool, args: &[String]) -> Result<String, CommandError> {
        use std::process::Stdio;

        let output = self
            .command(tool, args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| CommandError::NotFound { tool, source: e })?;

        if output.status.success() {
            String::from_utf8(output.stdout)
                .map_err(|e| CommandError::InvalidUtf8 { tool, source: e })
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            Err(CommandError::CommandFailed {
                tool,
                args: args.to_vec(),
                stderr,
            })
        }
    }

    async fn exec_streaming(&self, tool: Tool, args: &[String]) -> Result<(), CommandError> {
        use std::process::Stdio;

        let status = self
            .command(tool, args)
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| CommandError::NotFound { tool, source: e })?;

        if status.success() {
            Ok(())
        } else {
            Err(CommandError::CommandFailed {
                tool,
                args: args.to_vec(),
                stderr: format!("exit code: {status}"),
            })
        }
    }
}
