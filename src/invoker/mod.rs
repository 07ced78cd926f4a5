// Process invocation: run holehe once, capture stdout, enforce the timeout

use crate::error::{HoleheError, Result};
use std::path::PathBuf;
use std::process::Stdio;
use std::time::{Duration, Instant};
use tokio::process::Command;

/// What holehe printed and how it ended
#[derive(Debug, Clone)]
pub struct CapturedOutput {
    /// Standard output, lossily decoded as UTF-8
    pub stdout: String,
    /// Exit code; `None` when terminated by a signal
    pub exit_code: Option<i32>,
    pub elapsed: Duration,
}

/// Runs the holehe executable for a single identifier
#[derive(Debug, Clone)]
pub struct ProcessInvoker {
    binary: PathBuf,
    timeout: Duration,
}

impl ProcessInvoker {
    pub fn new(binary: PathBuf, timeout: Duration) -> Self {
        Self { binary, timeout }
    }

    /// Fail with `BinaryNotFound` unless the executable exists
    pub fn ensure_present(&self) -> Result<()> {
        if self.binary.exists() {
            Ok(())
        } else {
            Err(HoleheError::BinaryNotFound {
                path: self.binary.clone(),
            })
        }
    }

    /// Run `<binary> <identifier>` and wait for it, at most `timeout`
    ///
    /// Stderr is discarded and stdin is closed. A non-zero exit code is not an
    /// error. On timeout the child is killed.
    pub fn invoke(&self, identifier: &str) -> Result<CapturedOutput> {
        self.ensure_present()?;

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| HoleheError::Io {
                source: e,
                context: "Failed to create tokio runtime".to_string(),
            })?;

        runtime.block_on(self.run(identifier))
    }

    async fn run(&self, identifier: &str) -> Result<CapturedOutput> {
        tracing::info!("Running {:?} for {}", self.binary, identifier);
        let started = Instant::now();

        let child = Command::new(&self.binary)
            .arg(identifier)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| self.execution_error(e))?;

        // Dropping the wait future on timeout drops the child, which kills it
        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| HoleheError::Timeout {
                binary: self.binary.clone(),
                seconds: self.timeout.as_secs(),
            })?
            .map_err(|e| self.execution_error(e))?;

        let captured = CapturedOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            exit_code: output.status.code(),
            elapsed: started.elapsed(),
        };

        if !output.status.success() {
            tracing::warn!(
                "holehe exited with {:?}, parsing its output anyway",
                captured.exit_code
            );
        }
        tracing::debug!(
            "holehe finished in {:.2}s with {} bytes of output",
            captured.elapsed.as_secs_f64(),
            captured.stdout.len()
        );

        Ok(captured)
    }

    fn execution_error(&self, source: std::io::Error) -> HoleheError {
        HoleheError::Execution {
            source,
            binary: self.binary.clone(),
        }
    }
}
