use crate::app_config::AppConfig;
use crate::device::{self, DeviceIdStore};
use crate::domain::{AccessToken, ApiCredential, DeviceId, GroupingTags, TagGroup};
use crate::falcon::{self, FalconMaintenanceTokenFetcher, FalconTokenBroker, MaintenanceTokenFetcher, TokenBroker};
use crate::pipeline::error::PipelineError;
use crate::pipeline::state::{PipelineState, StateMachine};
use crate::resolver::{self, ConfigurationError, ResolvedRequest, RunRequest};
use crate::sensor::{SensorSettingsApplier, SettingsApplier};
use chrono::NaiveDate;
use tracing::{error, info, instrument, warn};

/// Runs validate → identify → authenticate → reveal maintenance token → apply, stopping at the first error.
#[derive(Debug)]
pub struct Pipeline {
    device_id_store: Box<dyn DeviceIdStore>,
    token_broker: Box<dyn TokenBroker>,
    maintenance_token_fetcher: Box<dyn MaintenanceTokenFetcher>,
    settings_applier: Box<dyn SettingsApplier>,
    revoke_token: bool,
}

#[derive(Debug)]
pub struct PipelineReport {
    pub device_id: DeviceId,
    pub tag_group: TagGroup,
    pub tags: GroupingTags,
    pub states: Vec<PipelineState>,
}

impl Pipeline {
    pub fn new(
        device_id_store: Box<dyn DeviceIdStore>,
        token_broker: Box<dyn TokenBroker>,
        maintenance_token_fetcher: Box<dyn MaintenanceTokenFetcher>,
        settings_applier: Box<dyn SettingsApplier>,
        revoke_token: bool,
    ) -> Self {
        Pipeline {
            device_id_store,
            token_broker,
            maintenance_token_fetcher,
            settings_applier,
            revoke_token,
        }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigurationError> {
        let client = falcon::new_client(config.falcon())?;
        let base_url = config.falcon().base_url();
        info!(region = %config.falcon().region(), base_url, "Using Falcon API at {}", base_url);

        Ok(Pipeline::new(
            device::new_store(config.device_id()),
            Box::new(FalconTokenBroker::new(client.clone(), base_url)),
            Box::new(FalconMaintenanceTokenFetcher::new(client, base_url)),
            Box::new(SensorSettingsApplier::new(config.applier().program().to_path_buf())),
            config.falcon().revoke_token(),
        ))
    }

    #[instrument(skip_all)]
    pub async fn run(&self, request: RunRequest, today: NaiveDate) -> Result<PipelineReport, PipelineError> {
        let mut machine = StateMachine::new();

        match self.execute(request, today, &mut machine).await {
            Ok((device_id, tag_group, tags)) => {
                machine.advance();
                Ok(PipelineReport {
                    device_id,
                    tag_group,
                    tags,
                    states: machine.into_history(),
                })
            }
            Err(e) => {
                machine.fail(&e);
                error!(state = %machine.current(), "Pipeline halted");
                Err(e)
            }
        }
    }

    async fn execute(
        &self,
        request: RunRequest,
        today: NaiveDate,
        machine: &mut StateMachine,
    ) -> Result<(DeviceId, TagGroup, GroupingTags), PipelineError> {
        let resolved = resolver::resolve(request, today)?;
        let device_id = self.device_id_store.read().await?;
        machine.advance();

        let access_token = self.token_broker.request_token(&resolved.credential).await?;
        machine.advance();

        let outcome = self.reveal_and_apply(&access_token, &device_id, &resolved, machine).await;
        // Revoked only after the maintenance token has been applied or has failed
        if self.revoke_token {
            self.revoke(&resolved.credential, &access_token).await;
        }
        outcome?;

        Ok((device_id, resolved.tag_group, resolved.tags))
    }

    async fn reveal_and_apply(
        &self,
        access_token: &AccessToken,
        device_id: &DeviceId,
        resolved: &ResolvedRequest,
        machine: &mut StateMachine,
    ) -> Result<(), PipelineError> {
        let maintenance_token = self
            .maintenance_token_fetcher
            .fetch(access_token, device_id, &resolved.audit_message)
            .await?;
        machine.advance();

        self.settings_applier.apply(maintenance_token, &resolved.tags).await?;
        machine.advance();

        Ok(())
    }

    async fn revoke(&self, credential: &ApiCredential, access_token: &AccessToken) {
        if let Err(e) = self.token_broker.revoke_token(credential, access_token).await {
            warn!("⚠️ Unable to revoke the access token: {}", e);
        }
    }
}
