use std::str::FromStr;

use pnet::util::MacAddr;

/// Normalizes a MAC address to upper-case, colon separated form.
///
/// Accepts `:` or `-` separators. Returns `None` for anything that is not a MAC.
pub fn canonical(raw: &str) -> Option<String> {
    let normalized: String = raw.trim().replace('-', ":");
    let mac = MacAddr::from_str(&normalized).ok()?;
    Some(mac.to_string().to_ascii_uppercase())
}

/// Case-insensitive BSSID comparison. Separators must already match.
pub fn eq(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}
