mod audit_message;
mod credential;
mod device_id;
mod tag_group;

pub use audit_message::AuditMessage;
pub use credential::{AccessToken, ApiCredential, MaintenanceToken};
pub use device_id::DeviceId;
pub use tag_group::{GroupingTags, TagGroup, UnknownTagGroup};
