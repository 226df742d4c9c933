use crate::falcon::domain::{ApiError, ErrorEnvelope};
use reqwest::{Response, StatusCode};
use std::error::Error;
use std::fmt::Display;

/// What the Falcon API answered, kept verbatim for diagnostics.
#[derive(Clone, Debug, PartialEq)]
pub enum UpstreamFailure {
    /// The server answered, but not with what was asked for.
    Status {
        status: StatusCode,
        body: String,
        errors: Vec<ApiError>,
    },
    /// The request never got an answer.
    Transport(String),
}

impl UpstreamFailure {
    pub fn status(status: StatusCode, body: String) -> Self {
        let errors = serde_json::from_str::<ErrorEnvelope>(&body)
            .ok()
            .and_then(|envelope| envelope.errors)
            .unwrap_or_default();

        UpstreamFailure::Status { status, body, errors }
    }

    pub fn transport(error: &reqwest::Error) -> Self {
        let mut message = error.to_string();
        let mut source = error.source();
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }

        UpstreamFailure::Transport(message)
    }
}

impl Display for UpstreamFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UpstreamFailure::Status { status, body, errors } => {
                write!(f, "HTTP {}", status)?;
                for error in errors {
                    write!(f, " [{}] {}", error.code, error.message)?;
                }
                write!(f, ", body: {}", body)
            }
            UpstreamFailure::Transport(message) => write!(f, "transport failure: {}", message),
        }
    }
}

/// Reads the body of a response. A body that cannot be read is reported in its place.
pub async fn read_body(response: Response) -> (StatusCode, String) {
    let status = response.status();
    let body = match response.text().await {
        Ok(body) => body,
        Err(e) => format!("<unreadable response body: {}>", e),
    };
    (status, body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn status_failure_keeps_the_body_and_parses_errors() {
        let body = include_str!("../../tests/resources/token_error_response.json").to_string();

        let failure = UpstreamFailure::status(StatusCode::FORBIDDEN, body.clone());

        assert_eq!(
            failure,
            UpstreamFailure::Status {
                status: StatusCode::FORBIDDEN,
                body,
                errors: vec![ApiError {
                    code: 403,
                    message: "access denied, invalid client_id or client_secret".to_string(),
                }],
            }
        );
    }

    #[test]
    fn status_failure_accepts_a_body_that_is_not_json() {
        let failure = UpstreamFailure::status(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>".to_string());

        assert_eq!(failure.to_string(), "HTTP 502 Bad Gateway, body: <html>bad gateway</html>");
    }

    #[test]
    fn display_lists_upstream_error_codes() {
        let failure = UpstreamFailure::status(
            StatusCode::UNAUTHORIZED,
            r#"{"errors":[{"code":401,"message":"access denied"}]}"#.to_string(),
        );

        assert_eq!(
            failure.to_string(),
            r#"HTTP 401 Unauthorized [401] access denied, body: {"errors":[{"code":401,"message":"access denied"}]}"#
        );
    }
}
