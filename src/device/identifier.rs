use crate::app_config::DeviceIdSource;
use crate::device::extract::extract_device_id;
use crate::domain::DeviceId;
use async_trait::async_trait;
use std::fmt::Debug;
use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;
use tokio::fs;
use tokio::process::Command;
use tracing::{info, instrument, warn};

#[async_trait]
pub trait DeviceIdStore: Debug + Send + Sync {
    async fn read(&self) -> Result<DeviceId, IdentifierNotFoundError>;
}

pub fn new_store(source: &DeviceIdSource) -> Box<dyn DeviceIdStore> {
    match source {
        DeviceIdSource::Command { program, args } => Box::new(CommandStore::new(program.clone(), args.clone())),
        DeviceIdSource::File { path } => Box::new(FileStore::new(path.clone())),
    }
}

/// Asks the sensor control utility for the agent id.
#[derive(Debug)]
pub struct CommandStore {
    program: PathBuf,
    args: Vec<String>,
}

impl CommandStore {
    pub fn new(program: PathBuf, args: Vec<String>) -> Self {
        CommandStore { program, args }
    }

    fn origin(&self) -> String {
        self.program.display().to_string()
    }
}

#[async_trait]
impl DeviceIdStore for CommandStore {
    #[instrument(skip_all, fields(program = %self.program.display()))]
    async fn read(&self) -> Result<DeviceId, IdentifierNotFoundError> {
        info!("🖥️ Reading device identifier...");

        let output = Command::new(&self.program)
            .args(&self.args)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| IdentifierNotFoundError::Unreadable { origin: self.origin(), source })?;

        if !output.status.success() {
            warn!(status = %output.status, "🖥️ Reading device identifier... failed");
            return Err(IdentifierNotFoundError::QueryFailed {
                origin: self.origin(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let device_id = extract_device_id(&stdout).ok_or_else(|| IdentifierNotFoundError::Absent {
            origin: self.origin(),
            output: stdout.trim().to_string(),
        })?;

        info!(device_id = %device_id, "🖥️ Reading device identifier... OK");
        Ok(device_id)
    }
}

/// Reads the agent id from a file that only privileged users can read.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: PathBuf) -> Self {
        FileStore { path }
    }

    fn origin(&self) -> String {
        self.path.display().to_string()
    }
}

#[async_trait]
impl DeviceIdStore for FileStore {
    #[instrument(skip_all, fields(path = %self.path.display()))]
    async fn read(&self) -> Result<DeviceId, IdentifierNotFoundError> {
        info!("🖥️ Reading device identifier...");

        let content = fs::read_to_string(&self.path)
            .await
            .map_err(|source| IdentifierNotFoundError::Unreadable { origin: self.origin(), source })?;

        let value = content.trim();
        if value.is_empty() {
            return Err(IdentifierNotFoundError::Absent {
                origin: self.origin(),
                output: String::new(),
            });
        }

        let device_id = extract_device_id(value).ok_or_else(|| IdentifierNotFoundError::Malformed {
            origin: self.origin(),
            value: value.to_string(),
        })?;

        info!(device_id = %device_id, "🖥️ Reading device identifier... OK");
        Ok(device_id)
    }
}

#[derive(Error, Debug)]
pub enum IdentifierNotFoundError {
    #[error("unable to read the device identifier from '{origin}': {source}")]
    Unreadable { origin: String, source: io::Error },
    #[error("device identifier query '{origin}' exited with {status}: {stderr}")]
    QueryFailed { origin: String, status: ExitStatus, stderr: String },
    #[error("no device identifier found in '{origin}', output: '{output}'")]
    Absent { origin: String, output: String },
    #[error("device identifier '{value}' read from '{origin}' is not hexadecimal")]
    Malformed { origin: String, value: String },
}
