use crate::domain::tag_group::TagGroup;
use chrono::NaiveDate;
use std::fmt::Display;

/// Free text recorded server-side next to the maintenance token request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuditMessage(String);

impl AuditMessage {
    pub fn new(message: impl Into<String>) -> Self {
        AuditMessage(message.into())
    }

    pub fn default_for(tag_group: TagGroup, date: NaiveDate) -> Self {
        AuditMessage(format!(
            "{} moved sensor to tag group {} ({}) on {}",
            env!("CARGO_PKG_NAME"),
            tag_group,
            tag_group.grouping_tags().joined(),
            date.format("%Y-%m-%d")
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for AuditMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
