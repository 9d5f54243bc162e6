//! Running external commands.
//!
//! The `Executor` trait is the seam between the run plan and the operating
//! system. `SystemExecutor` spawns real processes, streaming their stdout
//! into the caller's writer while stderr is captured for error reports.
//! `DryRunExecutor` only prints what would run.

use std::io::{BufRead, BufReader, Read, Write};
use std::process::{Command, Stdio};
use std::thread;

use crate::command::CommandSpec;
use crate::error::{CoreError, Result};

/// Something that can run a [`CommandSpec`] to completion.
pub trait Executor {
    /// Run `command`, forwarding its standard output to `out`.
    ///
    /// Returns `Err` if the command cannot be started or exits unsuccessfully.
    fn execute(&mut self, command: &CommandSpec, out: &mut dyn Write) -> Result<()>;
}

/// Spawns commands as child processes of the current process.
#[derive(Debug, Default)]
pub struct SystemExecutor;

impl Executor for SystemExecutor {
    fn execute(&mut self, command: &CommandSpec, out: &mut dyn Write) -> Result<()> {
        tracing::debug!(command = %command, "spawning");

        let mut child = Command::new(&command.program)
            .args(&command.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| CoreError::Spawn {
                program: command.program_name(),
                source,
            })?;

        // Both pipes must be drained while the child runs.
        let stderr_reader = child.stderr.take().map(|mut stderr| {
            thread::spawn(move || {
                let mut buf = Vec::new();
                let _ = stderr.read_to_end(&mut buf);
                String::from_utf8_lossy(&buf).into_owned()
            })
        });

        let stream_result = match child.stdout.take() {
            Some(stdout) => stream_lines(stdout, out),
            None => Ok(()),
        };

        let status = child.wait()?;
        let stderr = stderr_reader
            .and_then(|handle| handle.join().ok())
            .unwrap_or_default();
        stream_result?;

        if status.success() {
            tracing::debug!(program = %command.program_name(), "command finished");
            Ok(())
        } else {
            Err(CoreError::CommandFailed {
                command: command.to_string(),
                code: status.code(),
                stderr,
            })
        }
    }
}

/// Copy `reader` to `out` line by line, flushing after each line.
fn stream_lines(reader: impl Read, out: &mut dyn Write) -> Result<()> {
    let mut reader = BufReader::new(reader);
    let mut line = Vec::new();
    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            break;
        }
        out.write_all(&line)?;
        out.flush()?;
    }
    Ok(())
}

/// Prints each command instead of running it.
#[derive(Debug, Default)]
pub struct DryRunExecutor;

impl Executor for DryRunExecutor {
    fn execute(&mut self, command: &CommandSpec, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "[dry-run] {command}")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dry_run_prints_command_line() {
        let mut out: Vec<u8> = Vec::new();
        let cmd = CommandSpec::new("pip").args(["install", "unity-downloader-cli"]);
        DryRunExecutor.execute(&cmd, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "[dry-run] pip install unity-downloader-cli\n"
        );
    }

    #[test]
    fn stream_lines_copies_everything() {
        let mut out: Vec<u8> = Vec::new();
        stream_lines(&b"one\ntwo\nno newline"[..], &mut out).unwrap();
        assert_eq!(out, b"one\ntwo\nno newline");
    }

    #[test]
    fn missing_program_is_spawn_error() {
        let cmd = CommandSpec::new("edtest-definitely-not-a-real-program");
        let err = SystemExecutor.execute(&cmd, &mut Vec::<u8>::new()).unwrap_err();
        assert!(matches!(err, CoreError::Spawn { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn streams_stdout_of_successful_command() {
        let cmd = CommandSpec::new("sh").args(["-c", "echo first; echo second"]);
        let mut out: Vec<u8> = Vec::new();
        SystemExecutor.execute(&cmd, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "first\nsecond\n");
    }

    #[cfg(unix)]
    #[test]
    fn nonzero_exit_is_command_failed_with_stderr() {
        let cmd = CommandSpec::new("sh").args(["-c", "echo partial; echo boom >&2; exit 7"]);
        let mut out: Vec<u8> = Vec::new();
        let err = SystemExecutor.execute(&cmd, &mut out).unwrap_err();
        match err {
            CoreError::CommandFailed { code, stderr, .. } => {
                assert_eq!(code, Some(7));
                assert_eq!(stderr.trim(), "boom");
            }
            other => panic!("unexpected error: {other}"),
        }
        // Output produced before the failure still reaches the caller.
        assert_eq!(String::from_utf8(out).unwrap(), "partial\n");
    }
}
