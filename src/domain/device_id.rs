use std::fmt::Display;

/// Agent id of the local sensor: lower-case hexadecimal, separators removed, never empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeviceId(String);

impl DeviceId {
    /// Normalizes a raw identifier. Returns `None` when nothing hexadecimal remains.
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw.trim().chars().filter(|c| *c != '-').collect::<String>().to_ascii_lowercase();

        if normalized.is_empty() || !normalized.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }

        Some(DeviceId(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for DeviceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("ab12cd34ef56", "ab12cd34ef56")]
    #[case("AB12CD34EF56", "ab12cd34ef56")]
    #[case("ab12cd34-ef56-7890", "ab12cd34ef567890")]
    #[case("  9A1B-2C3D \r\n", "9a1b2c3d")]
    fn normalizes_the_identifier(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(DeviceId::parse(raw).map(|id| id.to_string()), Some(expected.to_string()));
    }

    #[rstest]
    #[case::empty("")]
    #[case::whitespace("   ")]
    #[case::only_dashes("----")]
    #[case::not_hexadecimal("aid is not set")]
    #[case::quoted("\"ab12\"")]
    fn rejects_an_invalid_identifier(#[case] raw: &str) {
        assert_eq!(DeviceId::parse(raw), None);
    }
}
