//! Runs `aircrack-ng` or `hashcat` against a wordlist.
//!
//! 4-way handshakes cracked with hashcat are first converted to the 22000
//! hash format with `hcxpcapngtool`. PMKID artifacts already are hashcat
//! input (mode 16800).

use std::path::{Path, PathBuf};
use std::process::Stdio;

use anyhow::{Context, bail};
use async_trait::async_trait;
use tempfile::TempDir;
use tokio::fs;
use tokio::process::Command;
use tracing::{debug, info};

use airlock_common::handshake::{HandshakeKind, HandshakeRecord};
use airlock_common::ports::cracking::{CrackEngine, CrackTool};

use crate::system;

const HASHCAT_WPA_MODE: &str = "22000";
const HASHCAT_PMKID_MODE: &str = "16800";

pub struct ExternalCrackEngine {
    wordlist: PathBuf,
}

impl ExternalCrackEngine {
    pub fn new(wordlist: impl Into<PathBuf>) -> Self {
        Self {
            wordlist: wordlist.into(),
        }
    }

    async fn aircrack(&self, record: &HandshakeRecord, scratch: &Path) -> anyhow::Result<Option<String>> {
        let key_file = scratch.join("key");
        let mut cmd = Command::new("aircrack-ng");
        cmd.args(["-a", "2", "-w"])
            .arg(&self.wordlist)
            .arg("--bssid")
            .arg(&record.bssid)
            .arg("-l")
            .arg(&key_file)
            .arg(&record.path);

        run(cmd).await?;
        read_key(&key_file).await
    }

    async fn hashcat(&self, hash_file: &Path, mode: &str, scratch: &Path) -> anyhow::Result<Option<String>> {
        let out_file = scratch.join("cracked");
        let mut cmd = Command::new("hashcat");
        cmd.args(["--quiet", "--force", "-a", "0", "-m", mode])
            .arg("--potfile-disable")
            .arg("-o")
            .arg(&out_file)
            .args(["--outfile-format", "2"])
            .arg(hash_file)
            .arg(&self.wordlist);

        run(cmd).await?;
        read_key(&out_file).await
    }

    async fn convert_to_22000(&self, capture: &Path, scratch: &Path) -> anyhow::Result<PathBuf> {
        let hash_file = scratch.join("handshake.22000");
        let mut cmd = Command::new("hcxpcapngtool");
        cmd.arg("-o").arg(&hash_file).arg(capture);
        run(cmd).await?;

        let has_hashes = fs::metadata(&hash_file)
            .await
            .map(|meta| meta.len() > 0)
            .unwrap_or(false);
        if !has_hashes {
            bail!("no crackable handshake found in {}", capture.display());
        }
        Ok(hash_file)
    }
}

#[async_trait]
impl CrackEngine for ExternalCrackEngine {
    fn missing_dependencies(&self, tool: CrackTool) -> Vec<&'static str> {
        tool.dependencies()
            .iter()
            .copied()
            .filter(|program| !system::exists(program))
            .collect()
    }

    async fn crack(&self, record: &HandshakeRecord, tool: CrackTool) -> anyhow::Result<Option<String>> {
        let scratch = TempDir::new().context("failed to create scratch directory")?;

        match (record.kind, tool) {
            (HandshakeKind::Pmkid, _) => {
                self.hashcat(&record.path, HASHCAT_PMKID_MODE, scratch.path())
                    .await
            }
            (HandshakeKind::FourWay, CrackTool::Aircrack) => self.aircrack(record, scratch.path()).await,
            (HandshakeKind::FourWay, CrackTool::Hashcat) => {
                let hash_file = self.convert_to_22000(&record.path, scratch.path()).await?;
                self.hashcat(&hash_file, HASHCAT_WPA_MODE, scratch.path()).await
            }
        }
    }
}

/// Runs `cmd` to completion. Tools signal "not found" through their exit
/// code, so only a failure to start is an error.
async fn run(mut cmd: Command) -> anyhow::Result<()> {
    let program = cmd.as_std().get_program().to_string_lossy().into_owned();
    info!("Running {program}");
    debug!(?cmd, "spawning cracking tool");

    let status = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .status()
        .await
        .with_context(|| format!("failed to run {program}"))?;

    debug!("{program} exited with {status}");
    Ok(())
}

/// First non-empty line of `path`, if any.
async fn read_key(path: &Path) -> anyhow::Result<Option<String>> {
    let text = match fs::read_to_string(path).await {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e).with_context(|| format!("failed to read {}", path.display())),
    };

    Ok(text
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(str::to_string))
}
