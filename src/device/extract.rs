use crate::domain::DeviceId;

/// Pulls the device identifier out of whatever the local store printed.
///
/// Understands `falconctl -g --aid` (`aid="0123abcd...".`), `reg query ... /v AG`
/// (`AG    REG_BINARY    0123ABCD...`) and a bare identifier. Lines are scanned bottom-up and the last
/// whitespace separated token of the first usable line wins.
pub fn extract_device_id(output: &str) -> Option<DeviceId> {
    output.lines().rev().filter(|line| !line.trim().is_empty()).find_map(|line| {
        let token = line.split_whitespace().last()?;
        let value = token.rsplit('=').next()?;
        DeviceId::parse(value.trim_matches(|c| matches!(c, '"' | '\'' | '.' | ',' | ';')))
    })
}
