//! # Handshake Catalog
//!
//! Lists capture artifacts that can still be cracked, newest first.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use airlock_common::handshake::{HandshakeKind, HandshakeRecord};

#[derive(Debug, Default, Clone)]
pub struct Catalog {
    pub records: Vec<HandshakeRecord>,
    /// Artifacts that already have a stored result.
    pub skipped_cracked: usize,
    /// PMKID hashes skipped because nothing can crack them.
    pub skipped_pmkid: usize,
    /// Names that look like artifacts but do not decode.
    pub malformed: usize,
}

impl Catalog {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Scans `dir` for crackable artifacts.
///
/// `cracked` holds basenames from the result store. A missing directory
/// yields an empty catalog.
pub fn list(dir: &Path, pmkid_supported: bool, cracked: &HashSet<String>) -> Catalog {
    let mut catalog = Catalog::default();

    if !dir.is_dir() {
        warn!("Directory not found: {}", dir.display());
        return catalog;
    }

    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Cannot read {}: {e}", dir.display());
            return catalog;
        }
    };

    let base: PathBuf = dir.canonicalize().unwrap_or_else(|_| dir.to_path_buf());
    info!("Listing captured handshakes from {}", base.display());

    for entry in entries.flatten() {
        let file_name = entry.file_name().to_string_lossy().into_owned();

        if file_name.matches('_').count() != 3 {
            continue;
        }

        if cracked.contains(&file_name) {
            catalog.skipped_cracked += 1;
            continue;
        }

        let kind = Path::new(&file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(HandshakeKind::from_extension);

        match kind {
            None => continue,
            Some(HandshakeKind::Pmkid) if !pmkid_supported => {
                catalog.skipped_pmkid += 1;
                continue;
            }
            Some(_) => {}
        }

        match HandshakeRecord::from_file_name(&base, &file_name) {
            Ok(record) => catalog.records.push(record),
            Err(e) => {
                debug!("{e}");
                catalog.malformed += 1;
            }
        }
    }

    if catalog.skipped_pmkid > 0 {
        warn!(
            "Skipping {} *.16800 files because hashcat is missing",
            catalog.skipped_pmkid
        );
    }
    if catalog.skipped_cracked > 0 {
        info!("Skipping {} already cracked files", catalog.skipped_cracked);
    }

    catalog
        .records
        .sort_by(|a, b| b.captured_at.cmp(&a.captured_at));
    catalog
}

/// Menu block: header plus one row per record, numbered from 1.
pub fn handshake_table(records: &[HandshakeRecord]) -> String {
    let width: usize = records
        .iter()
        .map(|hs| hs.essid.chars().count())
        .chain(std::iter::once("ESSID (truncated)".len()))
        .max()
        .unwrap_or_default();

    let mut output = format!(
        "{:>3}  {:<width$}  {:<17}  {:<5}  {}\n{}  {}  {}  {}  {}",
        "NUM",
        "ESSID (truncated)",
        "BSSID",
        "TYPE",
        "DATE CAPTURED",
        "-".repeat(3),
        "-".repeat(width),
        "-".repeat(17),
        "-".repeat(5),
        "-".repeat(19),
    );
    for (idx, record) in records.iter().enumerate() {
        output.push('\n');
        output.push_str(&record.to_row(idx + 1, width));
    }
    output
}
