//! Parser for the CSV file `airodump-ng --output-format csv` keeps rewriting.
//!
//! The file holds two sections separated by a blank line: access points
//! (`BSSID, First time seen, ...`) and stations (`Station MAC, ...`).

use airlock_common::wireless::bssid;
use airlock_common::wireless::target::{Encryption, Target};

const AP_LEADING_FIELDS: usize = 13;
const STATION_FIELDS: usize = 7;

/// Everything read from one snapshot of the dump.
#[derive(Debug, Default, Clone)]
pub struct Observation {
    pub access_points: Vec<Target>,
    /// `(client MAC, associated BSSID)` pairs.
    pub stations: Vec<(String, String)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    None,
    AccessPoints,
    Stations,
}

pub fn parse(text: &str) -> Observation {
    let mut observation = Observation::default();
    let mut section = Section::None;

    for line in text.lines() {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }

        if line.starts_with("BSSID") {
            section = Section::AccessPoints;
            continue;
        }
        if line.starts_with("Station MAC") {
            section = Section::Stations;
            continue;
        }

        match section {
            Section::AccessPoints => {
                if let Some(target) = parse_access_point(line) {
                    observation.access_points.push(target);
                }
            }
            Section::Stations => {
                if let Some(station) = parse_station(line) {
                    observation.stations.push(station);
                }
            }
            Section::None => {}
        }
    }

    observation
}

/// `BSSID, First, Last, channel, Speed, Privacy, Cipher, Auth, Power, beacons, IV, LAN IP, ID-length, ESSID, Key`
fn parse_access_point(line: &str) -> Option<Target> {
    let fields: Vec<&str> = line.splitn(AP_LEADING_FIELDS + 1, ',').map(str::trim).collect();
    if fields.len() <= AP_LEADING_FIELDS {
        return None;
    }

    let bssid = bssid::canonical(fields[0])?;
    let encryption: Encryption = fields[5].parse().ok()?;
    let channel: u16 = fields[3].parse().unwrap_or(0);
    let power: i32 = fields[8].parse().unwrap_or(0);

    // ESSIDs may contain commas; the trailing field is the key.
    let rest: &str = fields[AP_LEADING_FIELDS];
    let essid: &str = rest.rsplit_once(',').map_or(rest, |(essid, _key)| essid).trim();
    let essid: &str = if essid.chars().all(|c| c == '\0') { "" } else { essid };

    Some(
        Target::new(bssid, essid, channel)
            .with_encryption(encryption)
            .with_power(power),
    )
}

/// `Station MAC, First, Last, Power, packets, BSSID, Probed ESSIDs`
fn parse_station(line: &str) -> Option<(String, String)> {
    let fields: Vec<&str> = line.splitn(STATION_FIELDS, ',').map(str::trim).collect();
    if fields.len() < STATION_FIELDS - 1 {
        return None;
    }

    let client = bssid::canonical(fields[0])?;
    let ap = bssid::canonical(fields[5])?;
    Some((client, ap))
}
