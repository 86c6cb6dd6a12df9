// src/system/runner.rs

use crate::constants::WAIT_POLL_INTERVAL_MS;
use std::fmt;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use std::process::{Command as StdCommand, Stdio};
use std::thread;
use std::time::{Duration, Instant};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExecError {
    #[error("Command could not be parsed: {0}")]
    CommandParse(String),
    #[error("No command specified to run.")]
    EmptyCommand,
    #[error("Command '{command}' could not be started: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },
    #[error("Command '{command}' failed while its output was being read: {source}")]
    Io {
        command: String,
        #[source]
        source: io::Error,
    },
    #[error("Command '{command}' produced no output line.")]
    NoOutput { command: String },
    #[error("Command '{command}' did not finish within {timeout:?} and was killed.")]
    TimedOut { command: String, timeout: Duration },
}

/// A pre-split command: a program and its argument vector.
///
/// Templates are split with shell-style quoting rules once, up front; values
/// resolved at query time are appended as whole argv elements and are never
/// re-interpreted. That keeps untrusted selection values out of any shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    program: String,
    args: Vec<String>,
}

impl CommandSpec {
    /// Splits a command template into a spec.
    pub fn parse(template: &str) -> Result<Self, ExecError> {
        let trimmed = template.trim();
        if trimmed.is_empty() {
            return Err(ExecError::EmptyCommand);
        }
        let mut parts = shlex::split(trimmed)
            .ok_or_else(|| ExecError::CommandParse(trimmed.to_string()))?;
        if parts.is_empty() {
            return Err(ExecError::EmptyCommand);
        }
        let program = parts.remove(0);
        Ok(Self {
            program,
            args: parts,
        })
    }

    /// Returns a copy of the spec with `value` appended as one extra argument.
    #[must_use]
    pub fn with_arg(&self, value: &str) -> Self {
        let mut spec = self.clone();
        spec.args.push(value.to_string());
        spec
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Runs a command and hands back the first line of its standard output.
///
/// Implementations block until the command exits (or a deadline fires);
/// everything past the first output line and the exit code are outside the
/// contract. Abstracted as a trait so resolution logic can be exercised
/// against stub runners.
pub trait CommandRunner: Send + Sync {
    fn run(&self, spec: &CommandSpec) -> Result<String, ExecError>;
}

/// The real runner, backed by `std::process::Command`.
///
/// Stdout is piped and drained, stderr passes through to the caller's
/// terminal, stdin is closed. With a timeout set, the child is polled while
/// waiting and killed (and reaped) once the deadline passes, so a hung
/// script cannot block a worker forever or leak a process.
#[derive(Debug, Clone, Default)]
pub struct SystemRunner {
    working_dir: Option<PathBuf>,
    timeout: Option<Duration>,
}

impl SystemRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs commands from `dir` instead of the inherited working directory.
    #[must_use]
    pub fn with_working_dir(mut self, dir: PathBuf) -> Self {
        self.working_dir = Some(dir);
        self
    }

    /// Caps how long each command may run before it is killed.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, spec: &CommandSpec) -> Result<String, ExecError> {
        let rendered = spec.to_string();
        log::debug!("Running '{rendered}'");

        let mut command = StdCommand::new(spec.program());
        command
            .args(spec.args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit());
        if let Some(dir) = &self.working_dir {
            command.current_dir(dunce::simplified(dir));
        }

        let mut child = command.spawn().map_err(|e| ExecError::Spawn {
            command: rendered.clone(),
            source: e,
        })?;

        // Drain stdout on its own thread so a child writing more than the
        // pipe buffer holds cannot deadlock against our wait loop.
        let stdout = child.stdout.take().ok_or_else(|| ExecError::Io {
            command: rendered.clone(),
            source: io::Error::other("child stdout was not captured"),
        })?;
        let reader = thread::spawn(move || -> io::Result<Option<String>> {
            let mut reader = BufReader::new(stdout);
            let mut first_line = String::new();
            let bytes = reader.read_line(&mut first_line)?;
            // Only the first line is kept; swallow the rest so the child can
            // finish writing.
            io::copy(&mut reader, &mut io::sink())?;
            if bytes == 0 {
                return Ok(None);
            }
            if first_line.ends_with('\n') {
                first_line.pop();
                if first_line.ends_with('\r') {
                    first_line.pop();
                }
            }
            Ok(Some(first_line))
        });

        // Wait loop with an optional deadline.
        let deadline = self.timeout.map(|t| Instant::now() + t);
        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) => {
                    if deadline.is_some_and(|d| Instant::now() >= d) {
                        log::debug!(
                            "Deadline passed, killing child process (PID: {})...",
                            child.id()
                        );
                        if let Err(e) = child.kill() {
                            log::warn!("Failed to kill child process {}: {}", child.id(), e);
                        }
                        // Reap the child; the reader finishes once the pipe closes.
                        child.wait().ok();
                        let _ = reader.join();
                        return Err(ExecError::TimedOut {
                            command: rendered,
                            timeout: self.timeout.unwrap_or_default(),
                        });
                    }
                    thread::sleep(Duration::from_millis(WAIT_POLL_INTERVAL_MS));
                }
                Err(e) => {
                    child.kill().ok();
                    child.wait().ok();
                    let _ = reader.join();
                    return Err(ExecError::Io {
                        command: rendered,
                        source: e,
                    });
                }
            }
        };

        // The resolution contract ignores exit codes; surface them only to
        // people debugging a definitions file.
        if !status.success() {
            log::debug!("Command '{rendered}' exited with {status}");
        }

        let first_line = reader
            .join()
            .map_err(|_| ExecError::Io {
                command: rendered.clone(),
                source: io::Error::other("stdout reader thread panicked"),
            })?
            .map_err(|e| ExecError::Io {
                command: rendered.clone(),
                source: e,
            })?;

        match first_line {
            Some(line) => {
                log::trace!("Command '{rendered}' produced line '{line}'");
                Ok(line)
            }
            None => Err(ExecError::NoOutput { command: rendered }),
        }
    }
}

// MARK: --- UNIT TESTS ---

#[cfg(test)]
mod tests {
    use super::*;

    // --- CommandSpec parsing ---

    #[test]
    fn test_parse_splits_program_and_args() {
        let spec = CommandSpec::parse("scripts/list.sh --all regions").unwrap();
        assert_eq!(spec.program(), "scripts/list.sh");
        assert_eq!(spec.args(), ["--all", "regions"]);
    }

    #[test]
    fn test_parse_honors_quoting() {
        let spec = CommandSpec::parse(r#"lookup "two words" plain"#).unwrap();
        assert_eq!(spec.args(), ["two words", "plain"]);
    }

    #[test]
    fn test_parse_rejects_empty_and_blank_templates() {
        assert!(matches!(
            CommandSpec::parse(""),
            Err(ExecError::EmptyCommand)
        ));
        assert!(matches!(
            CommandSpec::parse("   "),
            Err(ExecError::EmptyCommand)
        ));
    }

    #[test]
    fn test_parse_rejects_unbalanced_quotes() {
        assert!(matches!(
            CommandSpec::parse(r#"lookup "unclosed"#),
            Err(ExecError::CommandParse(_))
        ));
    }

    #[test]
    fn test_with_arg_appends_one_element() {
        let spec = CommandSpec::parse("lookup --env").unwrap();
        let with_value = spec.with_arg("two words");
        assert_eq!(with_value.args(), ["--env", "two words"]);
        // `spec` itself is untouched.
        assert_eq!(spec.args(), ["--env"]);
    }

    // --- SystemRunner against real processes ---

    #[cfg(unix)]
    #[test]
    fn test_runner_returns_first_line_only() {
        // Single quotes keep the backslashes away from the template splitter,
        // so printf receives them and emits three lines.
        let spec = CommandSpec::parse(r"printf 'one\ntwo\nthree\n'").unwrap();
        let line = SystemRunner::new().run(&spec).unwrap();
        assert_eq!(line, "one");
    }

    #[cfg(unix)]
    #[test]
    fn test_runner_captures_csv_line() {
        let spec = CommandSpec::parse("echo a,b,c").unwrap();
        assert_eq!(SystemRunner::new().run(&spec).unwrap(), "a,b,c");
    }

    #[cfg(unix)]
    #[test]
    fn test_appended_value_arrives_as_single_argument() {
        // `printf %s` concatenates all of its arguments without separators,
        // so the embedded space survives only if the value was one argv
        // element.
        let spec = CommandSpec::parse("printf %s").unwrap().with_arg("a b");
        assert_eq!(SystemRunner::new().run(&spec).unwrap(), "a b");
    }

    #[cfg(unix)]
    #[test]
    fn test_runner_ignores_exit_code_when_a_line_was_produced() {
        let spec = CommandSpec::parse("sh -c 'echo ok; exit 3'").unwrap();
        assert_eq!(SystemRunner::new().run(&spec).unwrap(), "ok");
    }

    #[cfg(unix)]
    #[test]
    fn test_runner_fails_without_any_output_line() {
        let spec = CommandSpec::parse("true").unwrap();
        assert!(matches!(
            SystemRunner::new().run(&spec),
            Err(ExecError::NoOutput { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_runner_fails_to_spawn_missing_program() {
        let spec = CommandSpec::parse("definitely-not-a-real-binary-4a7f").unwrap();
        assert!(matches!(
            SystemRunner::new().run(&spec),
            Err(ExecError::Spawn { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_runner_kills_child_on_timeout() {
        let spec = CommandSpec::parse("sleep 5").unwrap();
        let runner = SystemRunner::new().with_timeout(Duration::from_millis(100));
        let started = Instant::now();
        let result = runner.run(&spec);
        assert!(matches!(result, Err(ExecError::TimedOut { .. })));
        assert!(started.elapsed() < Duration::from_secs(2));
    }

    #[cfg(unix)]
    #[test]
    fn test_runner_respects_working_dir() {
        let dir = tempfile::tempdir().unwrap();
        let canonical = dir.path().canonicalize().unwrap();
        let spec = CommandSpec::parse("pwd").unwrap();
        let runner = SystemRunner::new().with_working_dir(canonical.clone());
        let line = runner.run(&spec).unwrap();
        assert_eq!(PathBuf::from(line).canonicalize().unwrap(), canonical);
    }
}
