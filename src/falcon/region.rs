use clap::ValueEnum;
use serde::Deserialize;
use std::fmt::Display;

/// Falcon cloud a tenant lives in.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq, ValueEnum)]
pub enum Region {
    #[default]
    #[serde(rename = "us-1")]
    #[value(name = "us-1")]
    Us1,
    #[serde(rename = "us-2")]
    #[value(name = "us-2")]
    Us2,
    #[serde(rename = "eu-1")]
    #[value(name = "eu-1")]
    Eu1,
    #[serde(rename = "us-gov-1")]
    #[value(name = "us-gov-1")]
    UsGov1,
}

impl Region {
    pub fn base_url(&self) -> &'static str {
        match self {
            Region::Us1 => "https://api.crowdstrike.com",
            Region::Us2 => "https://api.us-2.crowdstrike.com",
            Region::Eu1 => "https://api.eu-1.crowdstrike.com",
            Region::UsGov1 => "https://api.laggar.gcw.crowdstrike.com",
        }
    }
}

impl Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Region::Us1 => "us-1",
            Region::Us2 => "us-2",
            Region::Eu1 => "eu-1",
            Region::UsGov1 => "us-gov-1",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("us-1", Region::Us1)]
    #[case("us-2", Region::Us2)]
    #[case("eu-1", Region::Eu1)]
    #[case("us-gov-1", Region::UsGov1)]
    fn deserializes_region_names(#[case] name: &str, #[case] expected: Region) {
        let region = serde_json::from_value::<Region>(json!(name)).unwrap();
        assert_eq!(region, expected);
        assert_eq!(region.to_string(), name);
    }

    #[test]
    fn every_region_uses_https() {
        for region in Region::value_variants() {
            assert!(region.base_url().starts_with("https://"), "{} is not https", region);
        }
    }
}
