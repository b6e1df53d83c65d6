pub mod crack;
pub mod cracked;
pub mod scan;

use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Args, Parser, Subcommand};

use airlock_common::config::{Config, DEFAULT_CRACKED_FILE, DEFAULT_HANDSHAKE_DIR, TargetFilter};
use airlock_common::wireless::bssid;

#[derive(Parser)]
#[command(name = "airlock")]
#[command(about = "Wireless target discovery and handshake cracking.")]
#[command(version)]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Less output (-q hides banners, -qq hides progress)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub quiet: u8,

    /// JSON file holding recovered keys
    #[arg(long, global = true, default_value = DEFAULT_CRACKED_FILE)]
    pub cracked_file: PathBuf,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Discover nearby access points and pick targets
    #[command(alias = "s")]
    Scan(ScanArgs),
    /// Crack captured handshakes against a wordlist
    #[command(alias = "c")]
    Crack(CrackArgs),
    /// Show previously cracked networks
    Cracked,
}

#[derive(Args)]
pub struct ScanArgs {
    /// Monitor-mode wireless interface
    #[arg(short, long)]
    pub interface: String,

    /// Listen on a single channel instead of hopping
    #[arg(short, long)]
    pub channel: Option<u16>,

    /// Stop as soon as this access point is seen
    #[arg(short, long, value_parser = parse_bssid)]
    pub bssid: Option<String>,

    /// Stop as soon as this network name is seen
    #[arg(short, long)]
    pub essid: Option<String>,

    /// Only lock on to targets with WPS enabled
    #[arg(long)]
    pub wps: bool,

    /// Stop after this many seconds and take every target (0 waits for Ctrl+C)
    #[arg(short = 't', long, value_name = "SECONDS", default_value_t = 0)]
    pub scan_time: u64,
}

#[derive(Args)]
pub struct CrackArgs {
    /// Wordlist to crack with; asked for when missing
    #[arg(short, long)]
    pub wordlist: Option<PathBuf>,

    /// Directory holding captured handshakes
    #[arg(long = "hs-dir", default_value = DEFAULT_HANDSHAKE_DIR)]
    pub handshake_dir: PathBuf,
}

fn parse_bssid(raw: &str) -> Result<String, String> {
    bssid::canonical(raw).ok_or_else(|| format!("'{raw}' is not a MAC address"))
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn to_config(&self) -> Config {
        let mut cfg = Config {
            cracked_file: self.cracked_file.clone(),
            quiet: self.quiet,
            ..Config::default()
        };

        match &self.command {
            Commands::Scan(args) => {
                cfg.interface = Some(args.interface.clone());
                cfg.channel = args.channel;
                cfg.filter = TargetFilter {
                    bssid: args.bssid.clone(),
                    essid: args.essid.clone(),
                    wps_only: args.wps,
                };
                cfg.scan_time = Duration::from_secs(args.scan_time);
            }
            Commands::Crack(args) => {
                cfg.wordlist = args.wordlist.clone();
                cfg.handshake_dir = args.handshake_dir.clone();
            }
            Commands::Cracked => {}
        }

        cfg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CommandLine {
        CommandLine::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_scan_arguments() {
        let cfg = parse(&[
            "airlock", "s", "-i", "wlan0mon", "-c", "6", "-b", "aa-bb-cc-dd-ee-ff", "--wps", "-t", "30",
        ])
        .to_config();

        assert_eq!(cfg.interface.as_deref(), Some("wlan0mon"));
        assert_eq!(cfg.channel, Some(6));
        assert_eq!(cfg.filter.bssid.as_deref(), Some("AA:BB:CC:DD:EE:FF"));
        assert!(cfg.filter.wps_only);
        assert_eq!(cfg.scan_time, Duration::from_secs(30));
    }

    #[test]
    fn test_rejects_bad_bssid() {
        assert!(CommandLine::try_parse_from(["airlock", "scan", "-i", "wlan0", "-b", "nope"]).is_err());
    }

    #[test]
    fn test_crack_defaults() {
        let cfg = parse(&["airlock", "-qq", "crack"]).to_config();
        assert_eq!(cfg.handshake_dir, PathBuf::from(DEFAULT_HANDSHAKE_DIR));
        assert_eq!(cfg.cracked_file, PathBuf::from(DEFAULT_CRACKED_FILE));
        assert_eq!(cfg.wordlist, None);
        assert_eq!(cfg.quiet, 2);
    }
}
