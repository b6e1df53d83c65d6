use std::path::PathBuf;

use chrono::{DateTime, Local, TimeZone};
use serde::{Deserialize, Serialize};

use super::record::{HandshakeKind, HandshakeRecord, basename};

/// A key recovered from a handshake artifact.
///
/// Stored as `{"type", "date", "essid", "bssid", "key", "<kind>_file"}`,
/// where the file key is `handshake_file` or `pmkid_file`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "StoredResult", try_from = "StoredResult")]
pub struct CrackResult {
    pub bssid: String,
    pub essid: String,
    pub file: PathBuf,
    pub key: String,
    pub kind: HandshakeKind,
    /// Unix seconds when the key was recovered.
    pub date: i64,
}

/// On-disk shape of a [`CrackResult`].
#[derive(Serialize, Deserialize)]
struct StoredResult {
    #[serde(rename = "type")]
    kind: HandshakeKind,
    #[serde(default)]
    date: i64,
    #[serde(default)]
    essid: String,
    #[serde(default)]
    bssid: String,
    #[serde(default)]
    key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    handshake_file: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pmkid_file: Option<PathBuf>,
}

impl From<CrackResult> for StoredResult {
    fn from(result: CrackResult) -> Self {
        let (handshake_file, pmkid_file) = match result.kind {
            HandshakeKind::FourWay => (Some(result.file), None),
            HandshakeKind::Pmkid => (None, Some(result.file)),
        };

        Self {
            kind: result.kind,
            date: result.date,
            essid: result.essid,
            bssid: result.bssid,
            key: result.key,
            handshake_file,
            pmkid_file,
        }
    }
}

impl TryFrom<StoredResult> for CrackResult {
    type Error = String;

    fn try_from(stored: StoredResult) -> Result<Self, Self::Error> {
        if stored.key.is_empty() {
            return Err("stored result has no key".to_string());
        }
        let file = stored
            .handshake_file
            .or(stored.pmkid_file)
            .ok_or_else(|| "stored result has no file".to_string())?;

        Ok(Self {
            bssid: stored.bssid,
            essid: stored.essid,
            file,
            key: stored.key,
            kind: stored.kind,
            date: stored.date,
        })
    }
}

impl CrackResult {
    /// Returns `None` for an empty key; a result always carries a key.
    pub fn new(record: &HandshakeRecord, key: impl Into<String>) -> Option<Self> {
        let key: String = key.into();
        if key.is_empty() {
            return None;
        }

        Some(Self {
            bssid: record.bssid.clone(),
            essid: record.essid.clone(),
            file: record.path.clone(),
            key,
            kind: record.kind,
            date: Local::now().timestamp(),
        })
    }

    pub fn file_name(&self) -> String {
        basename(&self.file)
    }

    pub fn recovered_at(&self) -> Option<DateTime<Local>> {
        Local.timestamp_opt(self.date, 0).single()
    }
}
