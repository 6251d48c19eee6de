use crate::domain::{CommandExecutor, ExecError};
use std::process::{Command, Output, Stdio};
use tracing::debug;

/// Runs commands as child processes, blocking until they exit.
#[derive(Debug)]
pub struct ProcessExecutor;

impl ProcessExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ProcessExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandExecutor for ProcessExecutor {
    fn execute(&self, args: &[String]) -> Result<String, ExecError> {
        let (program, rest) = args.split_first().ok_or(ExecError::EmptyCommand)?;
        debug!("Executando {program} {}", rest.join(" "));

        let output = Command::new(program)
            .args(rest)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| ExecError::Spawn {
                program: program.clone(),
                source,
            })?;

        ensure_success(program, &output)?;

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

fn ensure_success(program: &str, output: &Output) -> Result<(), ExecError> {
    if output.status.success() {
        return Ok(());
    }

    Err(ExecError::NonZeroExit {
        program: program.to_string(),
        status: output.status.code(),
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
    })
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn captures_stdout() {
        let out = ProcessExecutor::new()
            .execute(&args(&["sh", "-c", "printf 'a||b\\n'"]))
            .unwrap();
        assert_eq!(out, "a||b\n");
    }

    #[test]
    fn non_zero_exit_carries_status_and_stderr() {
        let err = ProcessExecutor::new()
            .execute(&args(&["sh", "-c", "echo boom >&2; exit 3"]))
            .unwrap_err();

        match err {
            ExecError::NonZeroExit {
                program,
                status,
                stderr,
            } => {
                assert_eq!(program, "sh");
                assert_eq!(status, Some(3));
                assert_eq!(stderr, "boom");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn missing_binary_is_spawn_error() {
        let err = ProcessExecutor::new()
            .execute(&args(&["dockhand-definitely-not-installed"]))
            .unwrap_err();
        assert!(matches!(err, ExecError::Spawn { .. }));
    }

    #[test]
    fn empty_command_is_rejected() {
        let err = ProcessExecutor::new().execute(&[]).unwrap_err();
        assert!(matches!(err, ExecError::EmptyCommand));
    }
}
