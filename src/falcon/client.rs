use crate::app_config::Falcon;
use reqwest::{Client, tls};
use thiserror::Error;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

pub fn new_client(config: &Falcon) -> Result<Client, FalconClientError> {
    let client = Client::builder()
        .min_tls_version(tls::Version::TLS_1_2)
        .https_only(config.https_only())
        .timeout(config.request_timeout())
        .user_agent(USER_AGENT)
        .build()?;
    Ok(client)
}

#[derive(Error, Debug)]
pub enum FalconClientError {
    #[error("request error: {0}")]
    RequestError(#[from] reqwest::Error),
}
