mod client;
mod domain;
mod maintenance_token;
mod region;
mod token_broker;
mod upstream;

pub use client::{FalconClientError, new_client};
pub use maintenance_token::{FalconMaintenanceTokenFetcher, MaintenanceTokenFetcher, TokenRetrievalError};
pub use region::Region;
pub use token_broker::{AuthenticationError, FalconTokenBroker, TokenBroker};
pub use upstream::UpstreamFailure;
