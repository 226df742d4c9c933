use serde::Deserialize;

/// Entry of the `errors` array the Falcon API attaches to failed responses.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ApiError {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ErrorEnvelope {
    #[serde(default)]
    pub errors: Option<Vec<ApiError>>,
}
