use crate::device::IdentifierNotFoundError;
use crate::falcon::{AuthenticationError, TokenRetrievalError, UpstreamFailure};
use crate::resolver::ConfigurationError;
use crate::sensor::LocalApplicationError;
use std::fmt::Display;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error(transparent)]
    IdentifierNotFound(#[from] IdentifierNotFoundError),
    #[error(transparent)]
    Authentication(#[from] AuthenticationError),
    #[error(transparent)]
    TokenRetrieval(#[from] TokenRetrievalError),
    #[error(transparent)]
    LocalApplication(#[from] LocalApplicationError),
}

impl PipelineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PipelineError::Configuration(_) => ErrorKind::Configuration,
            PipelineError::IdentifierNotFound(_) => ErrorKind::IdentifierNotFound,
            PipelineError::Authentication(_) => ErrorKind::Authentication,
            PipelineError::TokenRetrieval(_) => ErrorKind::TokenRetrieval,
            PipelineError::LocalApplication(_) => ErrorKind::LocalApplication,
        }
    }

    pub fn upstream(&self) -> Option<&UpstreamFailure> {
        match self {
            PipelineError::Authentication(e) => Some(e.upstream()),
            PipelineError::TokenRetrieval(e) => Some(e.upstream()),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    IdentifierNotFound,
    Authentication,
    TokenRetrieval,
    LocalApplication,
}

impl ErrorKind {
    pub fn name(&self) -> &'static str {
        match self {
            ErrorKind::Configuration => "ConfigurationError",
            ErrorKind::IdentifierNotFound => "IdentifierNotFoundError",
            ErrorKind::Authentication => "AuthenticationError",
            ErrorKind::TokenRetrieval => "TokenRetrievalError",
            ErrorKind::LocalApplication => "LocalApplicationError",
        }
    }

    /// Process exit code. 1 is left to panics and 2 matches clap's usage errors.
    pub fn exit_code(&self) -> u8 {
        match self {
            ErrorKind::Configuration => 2,
            ErrorKind::IdentifierNotFound => 3,
            ErrorKind::Authentication => 4,
            ErrorKind::TokenRetrieval => 5,
            ErrorKind::LocalApplication => 6,
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;
    use std::collections::HashSet;

    #[test]
    fn kind_follows_the_wrapped_error() {
        let error = PipelineError::from(ConfigurationError::MissingClientSecret);
        assert_eq!(error.kind(), ErrorKind::Configuration);

        let error = PipelineError::from(AuthenticationError::Failed(UpstreamFailure::Transport("refused".to_string())));
        assert_eq!(error.kind(), ErrorKind::Authentication);
        assert_eq!(error.to_string(), "client-credential exchange failed, transport failure: refused");
    }

    #[test]
    fn upstream_is_exposed_for_remote_failures_only() {
        let upstream = UpstreamFailure::status(StatusCode::OK, r#"{"resources":[]}"#.to_string());
        let error = PipelineError::from(TokenRetrievalError::NoToken(upstream.clone()));
        assert_eq!(error.upstream(), Some(&upstream));

        let error = PipelineError::from(ConfigurationError::MissingClientId);
        assert_eq!(error.upstream(), None);
    }

    #[test]
    fn exit_codes_are_distinct_and_never_success() {
        let kinds = [
            ErrorKind::Configuration,
            ErrorKind::IdentifierNotFound,
            ErrorKind::Authentication,
            ErrorKind::TokenRetrieval,
            ErrorKind::LocalApplication,
        ];

        let codes = kinds.iter().map(ErrorKind::exit_code).collect::<HashSet<_>>();

        assert_eq!(codes.len(), kinds.len());
        assert!(!codes.contains(&0));
    }
}
