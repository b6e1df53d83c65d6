//! A capture source backed by a running `airodump-ng`.
//!
//! `airodump-ng` rewrites `<prefix>-01.csv` once per second inside a scratch
//! directory owned by this adapter. Each [`merge`](CaptureSource::merge)
//! reads the latest snapshot and folds it into the previous target list.
//!
//! When `wash` is installed the capture also keeps a pcap, and each merge
//! asks `wash` which access points advertise WPS.

use std::fs;
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};

use anyhow::Context;
use tempfile::TempDir;
use tracing::{debug, warn};

use airlock_common::config::Config;
use airlock_common::ports::capture::CaptureSource;
use airlock_common::wireless::target::Target;

use crate::system;

use super::{csv, merge_targets, wash};

pub const AIRODUMP: &str = "airodump-ng";
const PREFIX: &str = "airlock";

pub struct AirodumpSource {
    interface: String,
    channel: Option<u16>,
    wps_lookup: bool,
    scratch: Option<TempDir>,
    child: Option<Child>,
}

impl AirodumpSource {
    pub fn new(interface: impl Into<String>, channel: Option<u16>) -> Self {
        Self {
            interface: interface.into(),
            channel,
            wps_lookup: false,
            scratch: None,
            child: None,
        }
    }

    pub fn from_config(cfg: &Config) -> anyhow::Result<Self> {
        let interface = cfg
            .interface
            .clone()
            .context("no monitor-mode interface given (use --interface)")?;
        let source = Self::new(interface, cfg.channel).with_wps_lookup(system::exists(wash::WASH));
        if !source.wps_lookup {
            debug!("{} not found, WPS state stays unknown", wash::WASH);
        }
        Ok(source)
    }

    /// Also write a pcap and read WPS state from it with `wash`.
    pub fn with_wps_lookup(mut self, enabled: bool) -> Self {
        self.wps_lookup = enabled;
        self
    }

    fn dump_path(&self, extension: &str) -> Option<PathBuf> {
        self.scratch
            .as_ref()
            .map(|dir| dir.path().join(format!("{PREFIX}-01.{extension}")))
    }

    fn apply_wps(&self, targets: &mut [Target]) {
        let Some(pcap) = self.dump_path("cap").filter(|path| path.exists()) else {
            return;
        };

        match wash::read(&pcap) {
            Ok(table) => {
                for target in targets.iter_mut() {
                    target.wps = wash::lookup(&table, &target.bssid);
                }
            }
            Err(e) => debug!("WPS state unavailable this round: {e:#}"),
        }
    }

    fn command(&self, prefix: PathBuf) -> Command {
        let mut cmd = Command::new(AIRODUMP);
        cmd.arg(&self.interface)
            .arg("-a")
            .arg("-w")
            .arg(prefix)
            .args(["--write-interval", "1", "--output-format"])
            .arg(if self.wps_lookup { "csv,pcap" } else { "csv" });
        if let Some(channel) = self.channel {
            cmd.arg("-c").arg(channel.to_string());
        }
        cmd.stdin(Stdio::null()).stdout(Stdio::null()).stderr(Stdio::null());
        cmd
    }
}

impl CaptureSource for AirodumpSource {
    fn acquire(&mut self) -> anyhow::Result<()> {
        let scratch = TempDir::new().context("failed to create capture directory")?;
        let mut cmd = self.command(scratch.path().join(PREFIX));
        debug!(?cmd, "starting capture");

        let child = cmd
            .spawn()
            .with_context(|| format!("failed to start {AIRODUMP} on {}", self.interface))?;

        self.scratch = Some(scratch);
        self.child = Some(child);
        Ok(())
    }

    fn release(&mut self) {
        if let Some(mut child) = self.child.take() {
            if let Err(e) = child.kill() {
                debug!("{AIRODUMP} already stopped: {e}");
            }
            let _ = child.wait();
        }
        if let Some(scratch) = self.scratch.take() {
            if let Err(e) = scratch.close() {
                warn!("Failed to remove capture directory: {e}");
            }
        }
    }

    fn is_alive(&mut self) -> bool {
        match self.child.as_mut().map(Child::try_wait) {
            Some(Ok(None)) => true,
            Some(Ok(Some(status))) => {
                debug!("{AIRODUMP} exited with {status}");
                false
            }
            Some(Err(e)) => {
                warn!("Cannot poll {AIRODUMP}: {e}");
                false
            }
            None => false,
        }
    }

    fn reports_wps(&self) -> bool {
        self.wps_lookup
    }

    fn merge(&mut self, previous: Vec<Target>) -> anyhow::Result<Vec<Target>> {
        let Some(path) = self.dump_path("csv") else {
            return Ok(previous);
        };

        // Nothing written yet during the first second.
        if !path.exists() {
            return Ok(previous);
        }

        let bytes = fs::read(&path).with_context(|| format!("failed to read {}", path.display()))?;
        let mut observation = csv::parse(&String::from_utf8_lossy(&bytes));
        if self.wps_lookup {
            self.apply_wps(&mut observation.access_points);
        }
        Ok(merge_targets(previous, observation))
    }
}
