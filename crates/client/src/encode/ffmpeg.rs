use std::path::PathBuf;
use std::process::Stdio;

use tokio::process::Command;

use super::{EncodeError, EncodeJob, Encoder};

/// Lines of encoder stderr kept in a failure message.
const STDERR_TAIL_LINES: usize = 5;

/// [`Encoder`] that shells out to `ffmpeg`.
#[derive(Debug, Clone)]
pub struct FfmpegEncoder {
    program: PathBuf,
}

impl Default for FfmpegEncoder {
    fn default() -> Self {
        Self { program: PathBuf::from("ffmpeg") }
    }
}

impl FfmpegEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `program` instead of `ffmpeg` from `PATH`.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self { program: program.into() }
    }

    /// Check that the encoder program can be started.
    pub async fn probe(&self) -> Result<(), EncodeError> {
        let status = Command::new(&self.program)
            .arg("-version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .status()
            .await
            .map_err(|e| EncodeError::Unavailable(format!("{}: {e}", self.program.display())))?;

        if status.success() {
            Ok(())
        } else {
            Err(EncodeError::Unavailable(format!("{} -version exited with {status}", self.program.display())))
        }
    }
}

#[async_trait::async_trait]
impl Encoder for FfmpegEncoder {
    async fn encode(&self, job: &EncodeJob) -> Result<(), EncodeError> {
        tracing::debug!(input = %job.input.display(), output = %job.output.display(), "starting encode");

        let output = Command::new(&self.program)
            .args(job.to_ffmpeg_args())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| EncodeError::Unavailable(format!("{}: {e}", self.program.display())))?;

        if output.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        let lines: Vec<&str> = stderr.lines().filter(|l| !l.trim().is_empty()).collect();
        let detail = lines[lines.len().saturating_sub(STDERR_TAIL_LINES)..].join(" | ");

        Err(EncodeError::Failed {
            status: output.status.to_string(),
            detail: format!("{} -> {}: {detail}", job.input.display(), job.output.display()),
        })
    }
}
