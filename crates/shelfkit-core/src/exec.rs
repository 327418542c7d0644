//! Command executor: run an external program and classify its outcome.
//!
//! Commands are described by a [`CommandSpec`] (program, argument vector and
//! an optional working directory) and executed by a [`CommandRunner`]. The
//! working directory is applied to the child process only; nothing here
//! touches the working directory of the current process.

use std::borrow::Cow;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::{debug, warn};

use crate::error::{ShelfError, ShelfResult};

const REDACTED: &str = "******";

/// A single command-line argument.
#[derive(Clone, PartialEq, Eq)]
enum Arg {
    Plain(OsString),
    /// Passed to the child verbatim but never rendered in logs or errors.
    Secret(OsString),
}

impl Arg {
    fn as_os_str(&self) -> &OsStr {
        match self {
            Self::Plain(value) | Self::Secret(value) => value,
        }
    }
}

impl fmt::Debug for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain(value) => fmt::Debug::fmt(value, f),
            Self::Secret(_) => f.write_str(REDACTED),
        }
    }
}

/// Description of one external command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    program: OsString,
    args: Vec<Arg>,
    cwd: Option<PathBuf>,
    /// Original text for commands built with [`CommandSpec::shell`].
    shell_source: Option<String>,
}

impl CommandSpec {
    /// Start building an invocation of `program`.
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            shell_source: None,
        }
    }

    /// Run a fully formed shell command string through `sh -c`.
    ///
    /// Quoting inside `command` is the caller's responsibility.
    pub fn shell(command: impl Into<String>) -> Self {
        let command = command.into();
        let mut spec = Self::new("sh").arg("-c").arg(&command);
        spec.shell_source = Some(command);
        spec
    }

    /// Append one argument.
    #[must_use]
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(Arg::Plain(arg.as_ref().to_os_string()));
        self
    }

    /// Append several arguments.
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args.extend(
            args.into_iter()
                .map(|arg| Arg::Plain(arg.as_ref().to_os_string())),
        );
        self
    }

    /// Append an argument that must not appear in logs or error messages.
    #[must_use]
    pub fn secret_arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(Arg::Secret(arg.as_ref().to_os_string()));
        self
    }

    /// Run the child process in `dir`.
    #[must_use]
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// The program to execute.
    pub fn program(&self) -> &OsStr {
        &self.program
    }

    /// The argument vector, secrets included, as handed to the child.
    pub fn argv(&self) -> impl Iterator<Item = &OsStr> {
        self.args.iter().map(Arg::as_os_str)
    }

    /// Working directory for the child, if one was set.
    pub fn working_dir(&self) -> Option<&Path> {
        self.cwd.as_deref()
    }

    /// Human-readable command text with secrets redacted.
    ///
    /// Shell commands render as the original string; argument-vector commands
    /// render as a shell-quoted line.
    pub fn display(&self) -> String {
        if let Some(source) = &self.shell_source {
            return source.clone();
        }

        let mut parts = vec![shell_quote(&self.program.to_string_lossy()).into_owned()];
        for arg in &self.args {
            match arg {
                Arg::Plain(value) => {
                    parts.push(shell_quote(&value.to_string_lossy()).into_owned());
                }
                Arg::Secret(_) => parts.push(REDACTED.to_string()),
            }
        }
        parts.join(" ")
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

fn shell_quote(arg: &str) -> Cow<'_, str> {
    let safe = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:=@%+,".contains(c));
    if safe {
        Cow::Borrowed(arg)
    } else {
        Cow::Owned(format!("'{}'", arg.replace('\'', r"'\''")))
    }
}

/// Captured result of a finished command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, or `None` when the process was terminated by a signal.
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// Build an output for a process that exited with `code`.
    pub fn exited(code: i32, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            status: Some(code),
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    /// Whether the process exited with status zero.
    pub const fn success(&self) -> bool {
        matches!(self.status, Some(0))
    }
}

/// Executes a [`CommandSpec`] and captures its output.
///
/// Implementations report a non-zero exit through [`CommandOutput::status`];
/// only failures to start the process are errors here. Use [`run_checked`]
/// to turn a non-zero exit into [`ShelfError::CommandFailed`].
#[cfg_attr(test, mockall::automock)]
pub trait CommandRunner: Send + Sync {
    fn output(&self, spec: &CommandSpec) -> ShelfResult<CommandOutput>;
}

/// Production runner backed by `std::process::Command`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl SystemRunner {
    pub const fn new() -> Self {
        Self
    }
}

impl CommandRunner for SystemRunner {
    fn output(&self, spec: &CommandSpec) -> ShelfResult<CommandOutput> {
        let mut command = Command::new(spec.program());
        command
            .args(spec.argv())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        if let Some(dir) = spec.working_dir() {
            command.current_dir(dir);
        }

        debug!(command = %spec, cwd = ?spec.working_dir(), "Spawning command");

        let output = command.output().map_err(|source| ShelfError::Spawn {
            command: spec.display(),
            source,
        })?;

        Ok(CommandOutput {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Run `spec` and return its standard output if it exits with status zero.
///
/// A non-zero exit becomes [`ShelfError::CommandFailed`] carrying the command
/// text and both captured streams.
pub fn run_checked<R>(runner: &R, spec: &CommandSpec) -> ShelfResult<String>
where
    R: CommandRunner + ?Sized,
{
    let output = runner.output(spec)?;

    if output.success() {
        debug!(command = %spec, "Command succeeded");
        return Ok(output.stdout);
    }

    let err = ShelfError::CommandFailed {
        command: spec.display(),
        status: output.status,
        stderr: output.stderr,
        stdout: output.stdout,
    };
    warn!(status = ?output.status, "{err}");
    Err(err)
}
