use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

use crate::error::{Result, SubEmbedError};
use super::{MediaCommand, MediaToolRunner};

/// Exit code reported for a child that was terminated by a signal
pub const SIGNAL_EXIT_CODE: i32 = -1;

/// Observable result of one subprocess invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutcome {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutcome {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Turn a non-zero exit into a transcode failure
    pub fn into_result(self) -> Result<Self> {
        if self.success() {
            Ok(self)
        } else {
            Err(SubEmbedError::TranscodeFailure {
                exit_code: self.exit_code,
                stderr: self.stderr,
            })
        }
    }
}

/// Runs media tools as child processes and waits for them to exit
#[derive(Debug, Clone, Default)]
pub struct MediaProcessorImpl;

impl MediaProcessorImpl {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl MediaToolRunner for MediaProcessorImpl {
    async fn run(&self, command: &MediaCommand) -> Result<ProcessOutcome> {
        debug!("Executing media command: {} {:?}", command.program, command.args);
        debug!("Description: {}", command.description);

        let mut cmd = Command::new(&command.program);
        cmd.args(&command.args);

        let launch_error = |source: std::io::Error| SubEmbedError::Launch {
            program: command.program.clone(),
            source,
        };

        let outcome = if command.capture {
            let output = cmd
                .stdin(Stdio::null())
                .output()
                .await
                .map_err(launch_error)?;

            ProcessOutcome {
                exit_code: output.status.code().unwrap_or(SIGNAL_EXIT_CODE),
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            }
        } else {
            let status = cmd.status().await.map_err(launch_error)?;

            ProcessOutcome {
                exit_code: status.code().unwrap_or(SIGNAL_EXIT_CODE),
                ..ProcessOutcome::default()
            }
        };

        debug!("{} exited with code {}", command.program, outcome.exit_code);
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_binary_is_launch_error() {
        let command = MediaCommand::new("nonexistent_media_tool_12345", "Missing tool").arg("-version");
        let err = MediaProcessorImpl::new().run(&command).await.unwrap_err();

        match err {
            SubEmbedError::Launch { program, .. } => assert_eq!(program, "nonexistent_media_tool_12345"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_captures_stdout_on_success() {
        let command = MediaCommand::new("sh", "Echo").args(["-c", "echo 6"]);
        let outcome = MediaProcessorImpl::new().run(&command).await.unwrap();

        assert!(outcome.success());
        assert_eq!(outcome.stdout, "6\n");
        assert!(outcome.stderr.is_empty());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_non_zero_exit_keeps_stderr() {
        let command = MediaCommand::new("sh", "Fail").args(["-c", "echo 'Invalid data found' >&2; exit 3"]);
        let outcome = MediaProcessorImpl::new().run(&command).await.unwrap();

        assert!(!outcome.success());
        assert_eq!(outcome.exit_code, 3);
        assert_eq!(outcome.stderr.trim(), "Invalid data found");

        match outcome.into_result().unwrap_err() {
            SubEmbedError::TranscodeFailure { exit_code, stderr } => {
                assert_eq!(exit_code, 3);
                assert!(stderr.contains("Invalid data found"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_inherited_output_reports_exit_code_only() {
        let command = MediaCommand::new("sh", "Inherit").args(["-c", "exit 1"]).inherit_output();
        let outcome = MediaProcessorImpl::new().run(&command).await.unwrap();

        assert_eq!(outcome.exit_code, 1);
        assert!(outcome.stdout.is_empty());
        assert!(outcome.stderr.is_empty());
    }

    #[test]
    fn test_success_passes_through() {
        let outcome = ProcessOutcome { exit_code: 0, stdout: "2".to_string(), stderr: String::new() };
        assert_eq!(outcome.clone().into_result().unwrap(), outcome);
    }
}
