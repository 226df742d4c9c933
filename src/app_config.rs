use crate::falcon::Region;
use config::{Config, ConfigError};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

const ENV_PREFIX: &str = "SENSOR_TAGGER";

#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    falcon: Falcon,
    #[serde(default)]
    device_id: DeviceIdSource,
    #[serde(default)]
    applier: Applier,
}

impl AppConfig {
    /// Layers, lowest priority first: built-in defaults, `sensor-tagger.toml` (or the given file),
    /// `sensor-tagger_local.toml`, `SENSOR_TAGGER__*` environment variables.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let main_source = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(env!("CARGO_PKG_NAME")).required(false),
        };

        Config::builder()
            .add_source(main_source)
            .add_source(config::File::with_name(concat!(env!("CARGO_PKG_NAME"), "_local")).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    pub fn with_region(mut self, region: Option<Region>) -> Self {
        if let Some(region) = region {
            self.falcon.region = region;
        }
        self
    }

    pub fn falcon(&self) -> &Falcon {
        &self.falcon
    }

    pub fn device_id(&self) -> &DeviceIdSource {
        &self.device_id
    }

    pub fn applier(&self) -> &Applier {
        &self.applier
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Falcon {
    region: Region,
    base_url: Option<String>,
    #[serde(with = "humantime_serde")]
    request_timeout: Duration,
    https_only: bool,
    revoke_token: bool,
}

impl Falcon {
    pub fn region(&self) -> Region {
        self.region
    }

    /// An explicit `base_url` wins over the region.
    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or_else(|| self.region.base_url())
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    pub fn https_only(&self) -> bool {
        self.https_only
    }

    pub fn revoke_token(&self) -> bool {
        self.revoke_token
    }
}

impl Default for Falcon {
    fn default() -> Self {
        Falcon {
            region: Region::default(),
            base_url: None,
            request_timeout: Duration::from_secs(30),
            https_only: true,
            revoke_token: true,
        }
    }
}

/// Where the agent id of this host is read from.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DeviceIdSource {
    Command {
        program: PathBuf,
        #[serde(default)]
        args: Vec<String>,
    },
    File {
        path: PathBuf,
    },
}

impl Default for DeviceIdSource {
    #[cfg(windows)]
    fn default() -> Self {
        DeviceIdSource::Command {
            program: PathBuf::from("reg"),
            args: vec![
                "query".to_string(),
                r"HKLM\SYSTEM\CrowdStrike\{9b03c1d9-3138-44ed-9fae-d9f4c034b88d}\{16e0423f-7058-48c9-a204-725362b67639}\Default".to_string(),
                "/v".to_string(),
                "AG".to_string(),
            ],
        }
    }

    #[cfg(not(windows))]
    fn default() -> Self {
        DeviceIdSource::Command {
            program: PathBuf::from("/opt/CrowdStrike/falconctl"),
            args: vec!["-g".to_string(), "--aid".to_string()],
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Applier {
    program: PathBuf,
}

impl Applier {
    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl Default for Applier {
    #[cfg(windows)]
    fn default() -> Self {
        Applier {
            program: PathBuf::from(r"C:\Program Files\CrowdStrike\CsSensorSettings.exe"),
        }
    }

    #[cfg(not(windows))]
    fn default() -> Self {
        Applier {
            program: PathBuf::from("/opt/CrowdStrike/CsSensorSettings"),
        }
    }
}

#[cfg(test)]
pub struct AppConfigBuilder {
    config: AppConfig,
}

#[cfg(test)]
impl AppConfigBuilder {
    pub fn new() -> Self {
        AppConfigBuilder {
            config: AppConfig {
                falcon: Falcon {
                    https_only: false,
                    request_timeout: Duration::from_secs(5),
                    ..Falcon::default()
                },
                device_id: DeviceIdSource::File {
                    path: PathBuf::from("aid"),
                },
                applier: Applier {
                    program: PathBuf::from("CsSensorSettings"),
                },
            },
        }
    }

    pub fn base_url(mut self, url: String) -> Self {
        self.config.falcon.base_url = Some(url);
        self
    }

    pub fn https_only(mut self, https_only: bool) -> Self {
        self.config.falcon.https_only = https_only;
        self
    }

    pub fn revoke_token(mut self, revoke_token: bool) -> Self {
        self.config.falcon.revoke_token = revoke_token;
        self
    }

    pub fn device_id(mut self, source: DeviceIdSource) -> Self {
        self.config.device_id = source;
        self
    }

    pub fn applier_program(mut self, program: PathBuf) -> Self {
        self.config.applier.program = program;
        self
    }

    pub fn build(self) -> AppConfig {
        self.config
    }
}
