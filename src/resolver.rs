use crate::domain::{ApiCredential, AuditMessage, GroupingTags, TagGroup, UnknownTagGroup};
use crate::falcon::FalconClientError;
use chrono::NaiveDate;
use std::io;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, instrument};

/// Raw pipeline input as supplied on the command line.
pub struct RunRequest {
    pub client_id: String,
    pub client_secret: String,
    pub tag_group: String,
    pub audit_message: Option<String>,
}

/// Validated pipeline input.
#[derive(Debug)]
pub struct ResolvedRequest {
    pub credential: ApiCredential,
    pub tag_group: TagGroup,
    pub tags: GroupingTags,
    pub audit_message: AuditMessage,
}

#[instrument(skip_all, fields(tag_group = %request.tag_group))]
pub fn resolve(request: RunRequest, today: NaiveDate) -> Result<ResolvedRequest, ConfigurationError> {
    let credential = validate_credential(request.client_id, request.client_secret)?;
    let (tag_group, tags) = resolve_tag_group(&request.tag_group)?;

    let audit_message = match request.audit_message {
        Some(message) if message.trim().is_empty() => return Err(ConfigurationError::EmptyAuditMessage),
        Some(message) => AuditMessage::new(message),
        None => AuditMessage::default_for(tag_group, today),
    };

    debug!(tags = %tags.joined(), "Resolved tag group {}", tag_group);
    Ok(ResolvedRequest {
        credential,
        tag_group,
        tags,
        audit_message,
    })
}

pub fn resolve_tag_group(name: &str) -> Result<(TagGroup, GroupingTags), ConfigurationError> {
    let tag_group = name.parse::<TagGroup>()?;
    Ok((tag_group, tag_group.grouping_tags()))
}

pub fn validate_credential(client_id: String, client_secret: String) -> Result<ApiCredential, ConfigurationError> {
    if client_id.trim().is_empty() {
        return Err(ConfigurationError::MissingClientId);
    }
    if client_secret.trim().is_empty() {
        return Err(ConfigurationError::MissingClientSecret);
    }

    Ok(ApiCredential::new(client_id, client_secret))
}

#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("client id must not be empty")]
    MissingClientId,
    #[error("client secret must not be empty")]
    MissingClientSecret,
    #[error(transparent)]
    UnknownTagGroup(#[from] UnknownTagGroup),
    #[error("audit message must not be empty")]
    EmptyAuditMessage,
    #[error("invalid configuration: {0}")]
    Config(#[from] config::ConfigError),
    #[error("unable to build the Falcon API client: {0}")]
    HttpClient(#[from] FalconClientError),
    #[error("unable to open transcript '{}': {}", path.display(), source)]
    Transcript { path: PathBuf, source: io::Error },
}
