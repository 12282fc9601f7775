//! FFprobe adapter for media file probing
//!
//! Runs `ffprobe -v error -show_format -show_streams -of json <file>` as a
//! child process and hands back its stdout untouched. The child is killed
//! if the configured timeout elapses first.

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info};

use crate::adapters::toml_config::FfprobeConfig;
use crate::error::ProbeError;
use crate::ports::ProbePort;

/// Arguments that select the JSON document this crate validates
pub const FFPROBE_ARGS: [&str; 6] = [
    "-v",
    "error",
    "-show_format",
    "-show_streams",
    "-of",
    "json",
];

/// FFprobe-based probe adapter
#[derive(Debug, Clone)]
pub struct FfprobeAdapter {
    program: String,
    extra_args: Vec<String>,
    timeout: Duration,
}

impl FfprobeAdapter {
    /// Create new FFprobe adapter from configuration
    pub fn new(config: &FfprobeConfig) -> Self {
        Self {
            program: config.program.clone(),
            extra_args: config.extra_args.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn command(&self, file_path: &Path) -> Command {
        let mut command = Command::new(&self.program);
        command
            .args(&self.extra_args)
            .args(FFPROBE_ARGS)
            .arg(file_path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        command
    }
}

#[async_trait]
impl ProbePort for FfprobeAdapter {
    async fn probe(&self, file_path: &Path) -> Result<String, ProbeError> {
        info!("Probing {} with {}", file_path.display(), self.program);

        let child = self
            .command(file_path)
            .spawn()
            .map_err(|source| ProbeError::Launch {
                program: self.program.clone(),
                source,
            })?;

        // Dropping the pending future drops the child, which kills it.
        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| ProbeError::TimedOut {
                program: self.program.clone(),
                seconds: self.timeout.as_secs_f64(),
            })??;

        if !output.status.success() {
            return Err(ProbeError::Process {
                program: self.program.clone(),
                exit_code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim_end().to_string(),
            });
        }

        debug!(bytes = output.stdout.len(), "ffprobe finished");
        String::from_utf8(output.stdout).map_err(|err| ProbeError::Syntax {
            message: format!("stdout is not valid UTF-8: {}", err),
        })
    }
}
