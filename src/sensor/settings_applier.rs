use crate::domain::{GroupingTags, MaintenanceToken};
use async_trait::async_trait;
use std::fmt::Debug;
use std::io;
use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{info, instrument, warn};

#[async_trait]
pub trait SettingsApplier: Debug + Send + Sync {
    /// Applies the grouping tags. Takes the token by value: once handed over it is gone.
    async fn apply(&self, token: MaintenanceToken, tags: &GroupingTags) -> Result<(), LocalApplicationError>;
}

/// Runs the sensor settings executable: `<program> set --grouping-tags <tags>`, token on stdin.
#[derive(Debug)]
pub struct SensorSettingsApplier {
    program: PathBuf,
}

impl SensorSettingsApplier {
    pub fn new(program: PathBuf) -> Self {
        SensorSettingsApplier { program }
    }
}

#[async_trait]
impl SettingsApplier for SensorSettingsApplier {
    #[instrument(skip_all, fields(program = %self.program.display(), tags = %tags.joined()))]
    async fn apply(&self, token: MaintenanceToken, tags: &GroupingTags) -> Result<(), LocalApplicationError> {
        info!("🏷️ Applying grouping tags...");

        let mut child = Command::new(&self.program)
            .args(["set", "--grouping-tags", &tags.joined()])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| match source.kind() {
                io::ErrorKind::NotFound => LocalApplicationError::ExecutableMissing(self.program.clone()),
                _ => LocalApplicationError::Spawn {
                    program: self.program.clone(),
                    source,
                },
            })?;

        let stdin_result = match child.stdin.take() {
            Some(mut stdin) => {
                let written = stdin.write_all(format!("{}\n", token.value()).as_bytes()).await;
                match written {
                    Ok(()) => stdin.shutdown().await,
                    Err(e) => Err(e),
                }
            }
            None => Err(io::Error::new(io::ErrorKind::BrokenPipe, "stdin of the settings executable is not available")),
        };
        drop(token);

        let output = child.wait_with_output().await.map_err(|source| LocalApplicationError::Spawn {
            program: self.program.clone(),
            source,
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
            warn!(status = %output.status, "🏷️ Applying grouping tags... failed");
            return Err(LocalApplicationError::NonZeroExit {
                program: self.program.clone(),
                status: output.status,
                stderr,
                stdout,
            });
        }

        // The exit status is authoritative, the executable may close stdin early and still succeed
        if let Err(e) = stdin_result {
            warn!("⚠️ Settings executable did not take the whole maintenance token: {}", e);
        }

        info!("🏷️ Applying grouping tags... OK");
        Ok(())
    }
}

#[derive(Error, Debug)]
pub enum LocalApplicationError {
    #[error("sensor settings executable '{}' not found", .0.display())]
    ExecutableMissing(PathBuf),
    #[error("unable to run '{}': {}", program.display(), source)]
    Spawn { program: PathBuf, source: io::Error },
    #[error("'{}' exited with {}, stderr: '{}', stdout: '{}'", program.display(), status, stderr, stdout)]
    NonZeroExit {
        program: PathBuf,
        status: ExitStatus,
        stderr: String,
        stdout: String,
    },
}
