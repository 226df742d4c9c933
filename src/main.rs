use crate::app_config::AppConfig;
use crate::cli::Cli;
use crate::falcon::UpstreamFailure;
use crate::pipeline::{ErrorKind, Pipeline, PipelineError, PipelineReport};
use crate::resolver::ConfigurationError;
use clap::Parser;
use std::process::ExitCode;
use tracing::{debug, error, info};

mod app_config;
mod cli;
mod device;
mod domain;
mod falcon;
mod logging;
mod pipeline;
mod resolver;
mod sensor;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose, cli.log_file.as_deref()) {
        return report_failure(PipelineError::from(e));
    }

    info!("🪵 Starting {} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    match run(&cli).await {
        Ok(report) => {
            debug!(states = ?report.states, "Pipeline finished");
            info!(
                device_id = %report.device_id,
                tags = %report.tags.joined(),
                "🏁 Sensor moved to tag group {}",
                report.tag_group
            );
            ExitCode::SUCCESS
        }
        Err(e) => report_failure(e),
    }
}

async fn run(cli: &Cli) -> Result<PipelineReport, PipelineError> {
    let config = AppConfig::load(cli.config.as_deref())
        .map_err(ConfigurationError::from)?
        .with_region(cli.region);
    info!("✅  Loaded configuration");

    let pipeline = Pipeline::from_config(&config)?;
    pipeline.run(cli.run_request(), chrono::Local::now().date_naive()).await
}

fn report_failure(error: PipelineError) -> ExitCode {
    let kind: ErrorKind = error.kind();
    match error.upstream() {
        Some(UpstreamFailure::Status { status, .. }) => {
            error!(kind = kind.name(), status_code = %status, "❌ {}: {}", kind, error)
        }
        _ => error!(kind = kind.name(), "❌ {}: {}", kind, error),
    }
    ExitCode::from(kind.exit_code())
}
