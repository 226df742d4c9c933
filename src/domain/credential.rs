use std::fmt;

const REDACTED: &str = "<redacted>";

/// Client id and secret of a Falcon API client. The secret never shows up in `Debug` output.
#[derive(Clone, PartialEq)]
pub struct ApiCredential {
    client_id: String,
    client_secret: String,
}

impl ApiCredential {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        ApiCredential {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }
}

impl fmt::Debug for ApiCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiCredential")
            .field("client_id", &self.client_id)
            .field("client_secret", &REDACTED)
            .finish()
    }
}

/// Bearer token returned by the client-credential exchange.
#[derive(PartialEq)]
pub struct AccessToken {
    value: String,
    token_type: String,
}

impl AccessToken {
    pub fn new(value: impl Into<String>, token_type: impl Into<String>) -> Self {
        AccessToken {
            value: value.into(),
            token_type: token_type.into(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn token_type(&self) -> &str {
        &self.token_type
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("value", &REDACTED)
            .field("token_type", &self.token_type)
            .finish()
    }
}

/// Device-scoped, single-use maintenance token.
///
/// Neither `Clone` nor `Copy`: applying the token moves it, so it reaches the local executable at most once.
#[derive(PartialEq)]
pub struct MaintenanceToken {
    value: String,
}

impl MaintenanceToken {
    pub fn new(value: impl Into<String>) -> Self {
        MaintenanceToken { value: value.into() }
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Debug for MaintenanceToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MaintenanceToken").field("value", &REDACTED).finish()
    }
}
