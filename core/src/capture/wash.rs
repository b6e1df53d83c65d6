//! WPS state from `wash -f <pcap> -j`.
//!
//! `wash` prints one JSON object per access point that advertises WPS.
//! Access points missing from its output do not use WPS.

use std::collections::HashMap;
use std::path::Path;
use std::process::{Command, Stdio};

use anyhow::{Context, bail};
use serde_json::Value;
use tracing::debug;

use airlock_common::wireless::bssid;
use airlock_common::wireless::target::WpsState;

pub const WASH: &str = "wash";

/// WPS state per canonical BSSID.
pub type WpsTable = HashMap<String, WpsState>;

pub fn parse(text: &str) -> WpsTable {
    text.lines()
        .map(str::trim)
        .filter(|line| line.starts_with('{'))
        .filter_map(|line| serde_json::from_str::<Value>(line).ok())
        .filter_map(|entry| {
            let bssid = bssid::canonical(entry.get("bssid")?.as_str()?)?;
            let locked = entry.get("wps_locked").and_then(Value::as_i64) == Some(1);
            let state = if locked {
                WpsState::Locked
            } else {
                WpsState::Unlocked
            };
            Some((bssid, state))
        })
        .collect()
}

/// Runs `wash` over a capture file.
pub fn read(pcap: &Path) -> anyhow::Result<WpsTable> {
    let output = Command::new(WASH)
        .arg("-f")
        .arg(pcap)
        .arg("-j")
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .output()
        .with_context(|| format!("failed to run {WASH}"))?;

    if !output.status.success() {
        bail!("{WASH} exited with {}", output.status);
    }

    let table = parse(&String::from_utf8_lossy(&output.stdout));
    debug!(access_points = table.len(), "wps table refreshed");
    Ok(table)
}

/// State for `bssid`, given a table from a successful `wash` run.
pub fn lookup(table: &WpsTable, target_bssid: &str) -> WpsState {
    bssid::canonical(target_bssid)
        .and_then(|key| table.get(&key).copied())
        .unwrap_or(WpsState::None)
}

#[cfg(test)]
mod tests {
    use super::*;

    const OUTPUT: &str = r#"
{"bssid" : "aa:bb:cc:dd:ee:01", "essid" : "Home", "channel" : 6, "rssi" : -48, "wps_version" : 16, "wps_state" : 2, "wps_locked" : 2}
{"bssid" : "AA:BB:CC:DD:EE:02", "essid" : "Office", "channel" : 1, "rssi" : -60, "wps_version" : 16, "wps_state" : 2, "wps_locked" : 1}
{"bssid" : "not-a-mac", "essid" : "Broken"}
wash: some diagnostic line
"#;

    #[test]
    fn test_parses_locked_and_unlocked() {
        let table = parse(OUTPUT);
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("AA:BB:CC:DD:EE:01"), Some(&WpsState::Unlocked));
        assert_eq!(table.get("AA:BB:CC:DD:EE:02"), Some(&WpsState::Locked));
    }

    #[test]
    fn test_missing_access_point_has_no_wps() {
        let table = parse(OUTPUT);
        assert_eq!(lookup(&table, "aa-bb-cc-dd-ee-02"), WpsState::Locked);
        assert_eq!(lookup(&table, "AA:BB:CC:DD:EE:09"), WpsState::None);
    }
}
