//! External command execution
//!
//! Every subprocess the prompt spawns (`pwd`, `git`, the configured plugin)
//! goes through [`Cmd`], so each one is logged and timed the same way.
//!
//! Commands have no timeout; each one blocks until it exits.

use std::process::{Command, Output, Stdio};
use std::sync::OnceLock;
use std::time::Instant;

/// Monotonic epoch for trace timestamps.
static TRACE_EPOCH: OnceLock<Instant> = OnceLock::new();

fn trace_epoch() -> &'static Instant {
    TRACE_EPOCH.get_or_init(Instant::now)
}

/// Builder for executing commands with logging and tracing.
///
/// Stdin is always null so a command can never block the prompt waiting for
/// input.
///
/// ```ignore
/// let output = Cmd::new("git")
///     .args(["rev-parse", "--show-toplevel"])
///     .context("builtin")
///     .run()?;
/// ```
#[derive(Debug, Clone)]
pub struct Cmd {
    program: String,
    args: Vec<String>,
    context: Option<String>,
    capture_stderr: bool,
}

impl Cmd {
    /// Create a new command builder for the given program.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            context: None,
            capture_stderr: true,
        }
    }

    /// Add a single argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Add multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set the logging context (the provider id for status queries).
    pub fn context(mut self, ctx: impl Into<String>) -> Self {
        self.context = Some(ctx.into());
        self
    }

    /// Send the command's stderr to the null device instead of capturing it.
    pub fn discard_stderr(mut self) -> Self {
        self.capture_stderr = false;
        self
    }

    /// The command line as it appears in logs.
    pub fn display(&self) -> String {
        if self.args.is_empty() {
            self.program.clone()
        } else {
            format!("{} {}", self.program, self.args.join(" "))
        }
    }

    /// Execute the command and return its output.
    ///
    /// A non-zero exit is not an error here; callers inspect `status`.
    pub fn run(self) -> std::io::Result<Output> {
        let cmd_str = self.display();

        match &self.context {
            Some(ctx) => log::debug!("$ {} [{}]", cmd_str, ctx),
            None => log::debug!("$ {}", cmd_str),
        }

        let t0 = Instant::now();
        let ts = t0.duration_since(*trace_epoch()).as_micros() as u64;

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(if self.capture_stderr {
                Stdio::piped()
            } else {
                Stdio::null()
            });

        let result = cmd.output();

        let dur_us = t0.elapsed().as_micros() as u64;
        let ctx = self.context.as_deref().unwrap_or("-");
        match &result {
            Ok(output) => log::debug!(
                "[prompt-trace] ts={} context={} cmd=\"{}\" dur_us={} ok={}",
                ts,
                ctx,
                cmd_str,
                dur_us,
                output.status.success()
            ),
            Err(e) => log::debug!(
                "[prompt-trace] ts={} context={} cmd=\"{}\" dur_us={} err=\"{}\"",
                ts,
                ctx,
                cmd_str,
                dur_us,
                e
            ),
        }

        result
    }
}

/// Returns true when the process was terminated by SIGINT.
#[cfg(unix)]
pub fn killed_by_interrupt(status: &std::process::ExitStatus) -> bool {
    use std::os::unix::process::ExitStatusExt;
    status.signal() == Some(signal_hook::consts::SIGINT)
}

#[cfg(not(unix))]
pub fn killed_by_interrupt(_status: &std::process::ExitStatus) -> bool {
    false
}
