mod api_error;
mod reveal_token;
mod token_response;

pub use api_error::{ApiError, ErrorEnvelope};
pub use reveal_token::{RevealTokenRequest, RevealTokenResponse};
pub use token_response::TokenResponse;
