use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct RevealTokenRequest<'a> {
    pub audit_message: &'a str,
    pub device_id: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct RevealTokenResponse {
    #[serde(default)]
    pub resources: Option<Vec<RevealedToken>>,
}

#[derive(Debug, Deserialize)]
pub struct RevealedToken {
    #[allow(dead_code)]
    pub device_id: Option<String>,
    pub uninstall_token: Option<String>,
}
