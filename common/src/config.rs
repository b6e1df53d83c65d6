use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_HANDSHAKE_DIR: &str = "hs";
pub const DEFAULT_CRACKED_FILE: &str = "cracked.json";

/// Lock-on filters: stop scanning as soon as a matching target shows up.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetFilter {
    pub bssid: Option<String>,
    pub essid: Option<String>,
    /// Ignore access points that do not advertise WPS.
    pub wps_only: bool,
}

impl TargetFilter {
    pub fn is_empty(&self) -> bool {
        self.bssid.is_none() && self.essid.is_none()
    }
}

/// Run configuration, built once from the command line.
#[derive(Debug, Clone)]
pub struct Config {
    /// Monitor-mode interface handed to the capture source.
    pub interface: Option<String>,
    /// Fixed channel; `None` hops across all channels.
    pub channel: Option<u16>,
    pub filter: TargetFilter,
    /// Maximum scan duration. Zero scans until interrupted.
    ///
    /// A non-zero value also selects every target once the scan ends.
    pub scan_time: Duration,
    pub wordlist: Option<PathBuf>,
    pub handshake_dir: PathBuf,
    pub cracked_file: PathBuf,
    pub quiet: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            interface: None,
            channel: None,
            filter: TargetFilter::default(),
            scan_time: Duration::ZERO,
            wordlist: None,
            handshake_dir: PathBuf::from(DEFAULT_HANDSHAKE_DIR),
            cracked_file: PathBuf::from(DEFAULT_CRACKED_FILE),
            quiet: 0,
        }
    }
}
