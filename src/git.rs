use anyhow::{Context, Result};
use std::process::{Command, Output};

pub const USER_NAME: &str = "user.name";
pub const USER_EMAIL: &str = "user.email";

/// Result of a git config invocation that did run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitOutcome {
    Success,
    /// git exited non-zero; stderr is kept for reporting
    Failed { stderr: String },
}

impl GitOutcome {
    fn from_output(output: Output) -> Self {
        if output.status.success() {
            Self::Success
        } else {
            Self::Failed {
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }
        }
    }
}

/// Writes to the global git configuration
pub trait GitConfig {
    fn set(&self, key: &str, value: &str) -> Result<GitOutcome>;
    fn unset(&self, key: &str) -> Result<GitOutcome>;
}

/// `GitConfig` backed by the `git config --global` command
#[derive(Debug, Clone, Default)]
pub struct GitCli;

impl GitCli {
    fn run(&self, args: &[&str]) -> Result<GitOutcome> {
        let output = Command::new("git")
            .arg("config")
            .arg("--global")
            .args(args)
            .output()
            .with_context(|| format!("Failed to run git config --global {}", args.join(" ")))?;

        Ok(GitOutcome::from_output(output))
    }
}

impl GitConfig for GitCli {
    fn set(&self, key: &str, value: &str) -> Result<GitOutcome> {
        self.run(&[key, value])
    }

    fn unset(&self, key: &str) -> Result<GitOutcome> {
        self.run(&["--unset", key])
    }
}
