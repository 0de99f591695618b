#![forbid(unsafe_code)]

//! Committing and pushing bumped manifests
//!
//! Git is driven through its command line. The exact invocations matter to
//! the CI automation that consumes the resulting commit, so they are built
//! in one place here.

use crate::config::GitConfig;
use crate::error::BumpError;
use crate::types::BumpedSet;
use std::ffi::{OsStr, OsString};
use std::path::PathBuf;
use std::process::Command;

/// Runs external programs
pub trait CommandRunner {
    /// Runs `program` with `args`, failing on spawn errors or non-zero exit
    fn run(&mut self, program: &str, args: &[OsString]) -> Result<(), BumpError>;
}

/// Runs commands as real child processes with inherited stdio
#[derive(Debug, Clone, Default)]
pub struct SystemRunner {
    dir: Option<PathBuf>,
}

impl SystemRunner {
    /// Runs commands in the current working directory
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs commands in `dir`
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: Some(dir.into()),
        }
    }
}

impl CommandRunner for SystemRunner {
    fn run(&mut self, program: &str, args: &[OsString]) -> Result<(), BumpError> {
        let mut command = Command::new(program);
        command.args(args);
        if let Some(dir) = &self.dir {
            command.current_dir(dir);
        }

        let status = command.status().map_err(|e| BumpError::Spawn {
            command: display_command(program, args),
            source: e,
        })?;

        if !status.success() {
            return Err(BumpError::CommandFailed {
                command: display_command(program, args),
                status,
            });
        }
        Ok(())
    }
}

/// Renders a command line for error messages
pub fn display_command(program: &str, args: &[OsString]) -> String {
    let mut line = program.to_string();
    for arg in args {
        line.push(' ');
        line.push_str(&arg.to_string_lossy());
    }
    line
}

fn os_args<I, S>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    args.into_iter().map(|a| a.as_ref().to_os_string()).collect()
}

/// Builds the git invocations that publish `bumped`
///
/// Returns an empty list when nothing was bumped.
pub fn publish_commands(bumped: &BumpedSet, git: &GitConfig) -> Vec<Vec<OsString>> {
    if bumped.is_empty() {
        return Vec::new();
    }

    let mut add = os_args(["add"]);
    add.extend(bumped.iter().map(|p| p.as_os_str().to_os_string()));

    let commit = if git.sign {
        os_args(["commit", "-S", "-m", git.commit_message.as_str()])
    } else {
        os_args(["commit", "-m", git.commit_message.as_str()])
    };

    vec![
        os_args(["config", "--local", "user.email", git.user_email.as_str()]),
        os_args(["config", "--local", "user.name", git.user_name.as_str()]),
        add,
        commit,
        os_args(["push"]),
    ]
}

/// Configures the bot identity, stages `bumped`, commits and pushes
///
/// Does nothing, not even identity configuration, when `bumped` is empty.
/// Stops at the first failing command and leaves earlier effects in place.
pub fn publish(
    runner: &mut dyn CommandRunner,
    bumped: &BumpedSet,
    git: &GitConfig,
) -> Result<(), BumpError> {
    for args in publish_commands(bumped, git) {
        runner.run("git", &args)?;
    }
    Ok(())
}
