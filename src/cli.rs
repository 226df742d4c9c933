use crate::falcon::Region;
use crate::resolver::RunRequest;
use clap::Parser;
use std::path::PathBuf;

/// Moves this host's Falcon sensor into a tag group.
///
/// Obtains an API token, reveals the device's single-use maintenance token and passes it to the sensor settings
/// executable together with the group's grouping tags.
#[derive(Parser)]
#[command(name = env!("CARGO_PKG_NAME"), version)]
pub struct Cli {
    /// Falcon API client id
    #[arg(short = 'k', long)]
    pub client_id: String,

    /// Falcon API client secret
    #[arg(short = 's', long)]
    pub client_secret: String,

    /// Tag group to apply: Desktops, Servers or Laptops
    #[arg(short = 't', long)]
    pub tag_group: String,

    /// Audit message recorded with the maintenance token request
    #[arg(short = 'm', long)]
    pub audit_message: Option<String>,

    /// Also write the log to this file. Secrets are never logged.
    #[arg(short = 'l', long)]
    pub log_file: Option<PathBuf>,

    /// Configuration file, defaults to ./sensor-tagger.toml when present
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Falcon cloud region, overrides the configuration
    #[arg(short = 'r', long, value_enum)]
    pub region: Option<Region>,

    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn run_request(&self) -> RunRequest {
        RunRequest {
            client_id: self.client_id.clone(),
            client_secret: self.client_secret.clone(),
            tag_group: self.tag_group.clone(),
            audit_message: self.audit_message.clone(),
        }
    }
}
