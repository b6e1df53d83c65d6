//! # Target Model
//!
//! A [`Target`] is one access point aggregate: its radio parameters plus the
//! clients seen talking to it. Targets are rebuilt on every poll by the
//! capture source; the BSSID is the identity that survives those merges.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::wireless::bssid;

/// Wi-Fi Protected Setup state advertised by an access point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WpsState {
    /// The access point does not advertise WPS.
    None,
    Unlocked,
    Locked,
    /// WPS information has not been observed (yet).
    #[default]
    Unknown,
}

impl WpsState {
    /// True if the access point advertises WPS at all, locked or not.
    pub fn is_enabled(&self) -> bool {
        matches!(self, WpsState::Unlocked | WpsState::Locked)
    }

    pub fn label(&self) -> &'static str {
        match self {
            WpsState::None => "no",
            WpsState::Unlocked => "yes",
            WpsState::Locked => "lock",
            WpsState::Unknown => "n/a",
        }
    }
}

/// Strongest encryption advertised by an access point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Encryption {
    Open,
    Wep,
    Wpa,
    Wpa2,
    Wpa3,
}

impl fmt::Display for Encryption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Encryption::Open => "OPN",
            Encryption::Wep => "WEP",
            Encryption::Wpa => "WPA",
            Encryption::Wpa2 => "WPA2",
            Encryption::Wpa3 => "WPA3",
        };
        f.write_str(label)
    }
}

impl FromStr for Encryption {
    type Err = String;

    /// Parses a privacy field such as `"WPA2 WPA"`, `"OPN"` or `"WEP"`.
    ///
    /// When several protocols are listed the strongest one wins.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_ascii_uppercase();
        let strongest = upper
            .split_whitespace()
            .filter_map(|word| match word {
                "OPN" | "OPEN" => Some(Encryption::Open),
                "WEP" => Some(Encryption::Wep),
                "WPA" => Some(Encryption::Wpa),
                "WPA2" => Some(Encryption::Wpa2),
                "WPA3" => Some(Encryption::Wpa3),
                _ => None,
            })
            .max();

        strongest.ok_or_else(|| format!("unknown encryption: {s}"))
    }
}

/// One discovered access point and its associated clients.
#[derive(Debug, Clone)]
pub struct Target {
    pub bssid: String,
    /// Empty for hidden networks that have not been decloaked.
    pub essid: String,
    pub channel: u16,
    pub encryption: Encryption,
    /// Signal strength in dBm.
    pub power: i32,
    pub wps: WpsState,
    pub clients: BTreeSet<String>,
    pub decloaked: bool,
}

impl Target {
    pub fn new(bssid: impl Into<String>, essid: impl Into<String>, channel: u16) -> Self {
        Self {
            bssid: bssid.into(),
            essid: essid.into(),
            channel,
            encryption: Encryption::Wpa2,
            power: 0,
            wps: WpsState::Unknown,
            clients: BTreeSet::new(),
            decloaked: false,
        }
    }

    pub fn with_encryption(mut self, encryption: Encryption) -> Self {
        self.encryption = encryption;
        self
    }

    pub fn with_power(mut self, power: i32) -> Self {
        self.power = power;
        self
    }

    pub fn with_wps(mut self, wps: WpsState) -> Self {
        self.wps = wps;
        self
    }

    pub fn with_client(mut self, client: impl Into<String>) -> Self {
        self.clients.insert(client.into());
        self
    }

    /// Identity key: the case-folded BSSID.
    pub fn key(&self) -> String {
        self.bssid.to_ascii_lowercase()
    }

    pub fn is_hidden(&self) -> bool {
        self.essid.is_empty()
    }

    /// Renders the listing row shown to the operator.
    ///
    /// Columns: index, essid, bssid, channel, encryption, power, wps, clients.
    pub fn to_row(&self, idx: usize) -> String {
        let essid: String = if self.is_hidden() {
            format!("({})", self.bssid)
        } else {
            truncate(&self.essid, ESSID_WIDTH)
        };
        let essid = if self.decloaked { format!("*{essid}") } else { essid };

        format!(
            "{:>3}  {:>width$}  {:>17}  {:>3}  {:>4}  {:>4}db  {:>4}  {:>6}",
            idx,
            essid,
            self.bssid,
            self.channel,
            self.encryption.to_string(),
            self.power,
            self.wps.label(),
            self.clients.len(),
            width = ESSID_WIDTH,
        )
    }
}

impl PartialEq for Target {
    fn eq(&self, other: &Self) -> bool {
        bssid::eq(&self.bssid, &other.bssid)
    }
}

impl Eq for Target {}

pub const ESSID_WIDTH: usize = 24;

/// Header rows matching [`Target::to_row`].
pub fn table_header() -> String {
    format!(
        "{:>3}  {:>width$}  {:>17}  {:>3}  {:>4}  {:>6}  {:>4}  {:>6}\n{}  {}  {}  {}  {}  {}  {}  {}",
        "NUM",
        "ESSID",
        "BSSID",
        "CH",
        "ENCR",
        "POWER",
        "WPS",
        "CLIENT",
        "-".repeat(3),
        "-".repeat(ESSID_WIDTH),
        "-".repeat(17),
        "-".repeat(3),
        "-".repeat(4),
        "-".repeat(6),
        "-".repeat(4),
        "-".repeat(6),
        width = ESSID_WIDTH,
    )
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(2)).collect();
    format!("{kept}..")
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
