//! # Capture Sources
//!
//! Concrete [`CaptureSource`](airlock_common::ports::capture::CaptureSource)
//! implementations and the merge step they share.
//!
//! * [`airodump`]: drives `airodump-ng` and reads its CSV dump.
//! * [`csv`]: parser for that dump.
//! * [`wash`]: WPS state read from the capture's pcap.

pub mod airodump;
pub mod csv;
pub mod wash;

use std::collections::HashMap;

use airlock_common::wireless::target::{Target, WpsState};

use self::csv::Observation;

/// Folds one observation into the previous target list.
///
/// Known targets keep their position and take the fresh radio values; a
/// hidden ESSID never overwrites a known one, and a hidden network that
/// reveals its name is flagged as decloaked. Targets not seen this round are
/// kept as they were. New targets are appended in observation order.
pub fn merge_targets(previous: Vec<Target>, observation: Observation) -> Vec<Target> {
    let mut fresh: Vec<Target> = observation.access_points;
    for (client, bssid) in observation.stations {
        if let Some(ap) = fresh.iter_mut().find(|ap| ap.bssid.eq_ignore_ascii_case(&bssid)) {
            ap.clients.insert(client);
        }
    }

    let mut by_key: HashMap<String, Target> = HashMap::with_capacity(fresh.len());
    let mut order: Vec<String> = Vec::with_capacity(fresh.len());
    for target in fresh {
        let key = target.key();
        if !by_key.contains_key(&key) {
            order.push(key.clone());
        }
        by_key.insert(key, target);
    }

    let mut merged: Vec<Target> = Vec::with_capacity(previous.len() + order.len());
    for old in previous {
        let Some(mut update) = by_key.remove(&old.key()) else {
            merged.push(old);
            continue;
        };

        update.bssid = old.bssid;
        if update.wps == WpsState::Unknown {
            update.wps = old.wps;
        }
        if update.essid.is_empty() {
            update.essid = old.essid;
            update.decloaked = old.decloaked;
        } else if old.essid.is_empty() || old.decloaked {
            update.decloaked = true;
        }
        merged.push(update);
    }

    merged.extend(order.into_iter().filter_map(|key| by_key.remove(&key)));
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn observation(aps: Vec<Target>, stations: Vec<(&str, &str)>) -> Observation {
        Observation {
            access_points: aps,
            stations: stations
                .into_iter()
                .map(|(c, b)| (c.to_string(), b.to_string()))
                .collect(),
        }
    }

    #[test]
    fn test_keeps_order_and_appends_new() {
        let previous = vec![
            Target::new("AA:00:00:00:00:01", "One", 1),
            Target::new("AA:00:00:00:00:02", "Two", 6),
        ];
        let seen = observation(
            vec![
                Target::new("AA:00:00:00:00:03", "Three", 11),
                Target::new("AA:00:00:00:00:01", "One", 1).with_power(-40),
            ],
            vec![],
        );

        let merged = merge_targets(previous, seen);
        let essids: Vec<&str> = merged.iter().map(|t| t.essid.as_str()).collect();
        assert_eq!(essids, vec!["One", "Two", "Three"]);
        assert_eq!(merged[0].power, -40);
    }

    #[test]
    fn test_bssid_identity_is_preserved() {
        let previous = vec![Target::new("AA:00:00:00:00:01", "One", 1)];
        let seen = observation(vec![Target::new("aa:00:00:00:00:01", "One", 6)], vec![]);

        let merged = merge_targets(previous, seen);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].bssid, "AA:00:00:00:00:01");
        assert_eq!(merged[0].channel, 6);
    }

    #[test]
    fn test_hidden_essid_decloaks() {
        let previous = vec![Target::new("AA:00:00:00:00:01", "", 1)];
        let named = observation(vec![Target::new("AA:00:00:00:00:01", "Secret", 1)], vec![]);
        let merged = merge_targets(previous, named);
        assert_eq!(merged[0].essid, "Secret");
        assert!(merged[0].decloaked);

        let hidden_again = observation(vec![Target::new("AA:00:00:00:00:01", "", 1)], vec![]);
        let merged = merge_targets(merged, hidden_again);
        assert_eq!(merged[0].essid, "Secret");
        assert!(merged[0].decloaked);
    }

    #[test]
    fn test_known_wps_survives_unknown_update() {
        let previous = vec![Target::new("AA:00:00:00:00:01", "One", 1).with_wps(WpsState::Locked)];
        let seen = observation(vec![Target::new("AA:00:00:00:00:01", "One", 1)], vec![]);
        let merged = merge_targets(previous, seen);
        assert_eq!(merged[0].wps, WpsState::Locked);

        let seen = observation(
            vec![Target::new("AA:00:00:00:00:01", "One", 1).with_wps(WpsState::Unlocked)],
            vec![],
        );
        let merged = merge_targets(merged, seen);
        assert_eq!(merged[0].wps, WpsState::Unlocked);
    }

    #[test]
    fn test_attaches_clients() {
        let seen = observation(
            vec![Target::new("AA:00:00:00:00:01", "One", 1)],
            vec![("11:11:11:11:11:11", "aa:00:00:00:00:01"), ("22:22:22:22:22:22", "AA:00:00:00:00:09")],
        );
        let merged = merge_targets(Vec::new(), seen);
        assert_eq!(merged[0].clients.len(), 1);
        assert!(merged[0].clients.contains("11:11:11:11:11:11"));
    }
}
