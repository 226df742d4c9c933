use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

/// The closed set of tag groups a sensor can be moved into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TagGroup {
    Desktops,
    Servers,
    Laptops,
}

impl TagGroup {
    pub const ALL: [TagGroup; 3] = [TagGroup::Desktops, TagGroup::Servers, TagGroup::Laptops];

    pub fn name(&self) -> &'static str {
        match self {
            TagGroup::Desktops => "Desktops",
            TagGroup::Servers => "Servers",
            TagGroup::Laptops => "Laptops",
        }
    }

    pub fn grouping_tags(&self) -> GroupingTags {
        let tags: &[&str] = match self {
            TagGroup::Desktops => &["Prod", "Desktop", "PatchMe"],
            TagGroup::Servers => &["Prod", "Server", "PatchMe"],
            TagGroup::Laptops => &["Prod", "Laptop", "PatchMe"],
        };

        GroupingTags(tags.iter().map(|tag| tag.to_string()).collect())
    }
}

impl Display for TagGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for TagGroup {
    type Err = UnknownTagGroup;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        TagGroup::ALL
            .into_iter()
            .find(|group| group.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| UnknownTagGroup(s.to_string()))
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("unknown tag group '{0}', expected one of Desktops, Servers, Laptops")]
pub struct UnknownTagGroup(pub String);

/// Ordered grouping tags. Order and duplicates are preserved exactly as resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupingTags(Vec<String>);

impl GroupingTags {
    /// Value passed to `--grouping-tags`.
    pub fn joined(&self) -> String {
        self.0.join(",")
    }
}

impl From<Vec<String>> for GroupingTags {
    fn from(tags: Vec<String>) -> Self {
        GroupingTags(tags)
    }
}
