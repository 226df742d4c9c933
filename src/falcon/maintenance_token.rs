use crate::domain::{AccessToken, AuditMessage, DeviceId, MaintenanceToken};
use crate::falcon::domain::{RevealTokenRequest, RevealTokenResponse};
use crate::falcon::upstream::{UpstreamFailure, read_body};
use async_trait::async_trait;
use reqwest::Client;
use std::fmt::Debug;
use thiserror::Error;
use tracing::{info, instrument, warn};

#[async_trait]
pub trait MaintenanceTokenFetcher: Debug + Send + Sync {
    /// Reveals the maintenance token of a device. The server binds the token to the device and treats it as
    /// single use, so every call yields a token that must be applied at most once.
    async fn fetch(
        &self,
        access_token: &AccessToken,
        device_id: &DeviceId,
        audit_message: &AuditMessage,
    ) -> Result<MaintenanceToken, TokenRetrievalError>;
}

#[derive(Debug)]
pub struct FalconMaintenanceTokenFetcher {
    client: Client,
    base_url: String,
}

impl FalconMaintenanceTokenFetcher {
    pub fn new(client: Client, base_url: &str) -> Self {
        FalconMaintenanceTokenFetcher {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl MaintenanceTokenFetcher for FalconMaintenanceTokenFetcher {
    #[instrument(skip_all, fields(device_id = %device_id))]
    async fn fetch(
        &self,
        access_token: &AccessToken,
        device_id: &DeviceId,
        audit_message: &AuditMessage,
    ) -> Result<MaintenanceToken, TokenRetrievalError> {
        info!("🎫 Revealing maintenance token...");

        let request = RevealTokenRequest {
            audit_message: audit_message.as_str(),
            device_id: device_id.as_str(),
        };

        let response = self
            .client
            .post(format!("{}/policy/combined/reveal-uninstall-token/v1", self.base_url))
            .bearer_auth(access_token.value())
            .json(&request)
            .send()
            .await
            .map_err(|e| TokenRetrievalError::Failed(UpstreamFailure::transport(&e)))?;

        let (status, body) = read_body(response).await;
        if !status.is_success() {
            warn!(status_code = %status, "🎫 Revealing maintenance token... failed");
            return Err(TokenRetrievalError::Failed(UpstreamFailure::status(status, body)));
        }

        let token = serde_json::from_str::<RevealTokenResponse>(&body)
            .ok()
            .and_then(|response| response.resources)
            .and_then(|resources| resources.into_iter().next())
            .and_then(|resource| resource.uninstall_token)
            .filter(|value| !value.is_empty());

        match token {
            Some(value) => {
                info!("🎫 Revealing maintenance token... OK");
                Ok(MaintenanceToken::new(value))
            }
            None => {
                warn!(status_code = %status, "🎫 Revealing maintenance token... failed, no token in response");
                Err(TokenRetrievalError::NoToken(UpstreamFailure::status(status, body)))
            }
        }
    }
}

#[derive(Error, Debug)]
pub enum TokenRetrievalError {
    #[error("maintenance token request failed, {0}")]
    Failed(UpstreamFailure),
    #[error("maintenance token response contained no token, {0}")]
    NoToken(UpstreamFailure),
}

impl TokenRetrievalError {
    pub fn upstream(&self) -> &UpstreamFailure {
        match self {
            TokenRetrievalError::Failed(upstream) => upstream,
            TokenRetrievalError::NoToken(upstream) => upstream,
        }
    }
}
