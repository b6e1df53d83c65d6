//! Lock-on: find the operator's target among the discovered ones.

use airlock_common::config::TargetFilter;
use airlock_common::wireless::{bssid, target::Target};

/// Returns the first target matching `filter`, or `None`.
///
/// Targets are visited in discovery order. For each one the BSSID filter is
/// tried before the ESSID filter, so an ESSID match early in the list wins
/// over a BSSID match later on. With no BSSID and no ESSID configured this
/// never matches.
pub fn find<'a>(targets: &'a [Target], filter: &TargetFilter) -> Option<&'a Target> {
    if filter.is_empty() {
        return None;
    }

    targets.iter().find(|target| {
        if filter.wps_only && !target.wps.is_enabled() {
            return false;
        }

        let bssid_hit = filter
            .bssid
            .as_deref()
            .is_some_and(|wanted| !target.bssid.is_empty() && bssid::eq(wanted, &target.bssid));

        bssid_hit
            || filter.essid.as_deref().is_some_and(|wanted| {
                !target.essid.is_empty() && wanted.to_lowercase() == target.essid.to_lowercase()
            })
    })
}
