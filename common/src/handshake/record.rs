//! Capture artifacts are named
//! `<tag>_<essid>_<bssid-with-dashes>_<date>T<time-with-dashes>.<ext>`,
//! e.g. `wpa_MyNet_AA-BB-CC-DD-EE-FF_2023-01-01T12-00-00.cap`.

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const FOUR_WAY_EXTENSION: &str = "cap";
pub const PMKID_EXTENSION: &str = "16800";

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Kind of key-exchange material held by an artifact.
///
/// Serialized as the `type` of a stored result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandshakeKind {
    /// Full WPA 4-way handshake in a pcap file.
    #[serde(rename = "WPA")]
    FourWay,
    /// PMKID hash in hashcat's 16800 format.
    #[serde(rename = "PMKID")]
    Pmkid,
}

impl HandshakeKind {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            FOUR_WAY_EXTENSION => Some(HandshakeKind::FourWay),
            PMKID_EXTENSION => Some(HandshakeKind::Pmkid),
            _ => None,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            HandshakeKind::FourWay => "4-Way Handshake",
            HandshakeKind::Pmkid => "PMKID Hash",
        }
    }
}

impl fmt::Display for HandshakeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandshakeKind::FourWay => f.write_str("4-WAY"),
            HandshakeKind::Pmkid => f.write_str("PMKID"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArtifactError {
    #[error("expected 4 underscore separated fields in '{0}'")]
    FieldCount(String),
    #[error("unsupported artifact extension in '{0}'")]
    Extension(String),
    #[error("cannot decode capture date '{0}'")]
    Date(String),
}

/// A handshake capture found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandshakeRecord {
    pub path: PathBuf,
    pub bssid: String,
    pub essid: String,
    pub captured_at: NaiveDateTime,
    pub kind: HandshakeKind,
}

impl HandshakeRecord {
    /// Decodes an artifact file name located in `dir`.
    pub fn from_file_name(dir: &Path, file_name: &str) -> Result<Self, ArtifactError> {
        let fields: Vec<&str> = file_name.split('_').collect();
        let [_tag, essid, bssid, stamp] = fields.as_slice() else {
            return Err(ArtifactError::FieldCount(file_name.to_string()));
        };

        let (stamp, ext) = stamp
            .rsplit_once('.')
            .ok_or_else(|| ArtifactError::Extension(file_name.to_string()))?;
        let kind = HandshakeKind::from_extension(ext)
            .ok_or_else(|| ArtifactError::Extension(file_name.to_string()))?;

        Ok(Self {
            path: dir.join(file_name),
            bssid: bssid.replace('-', ":"),
            essid: essid.to_string(),
            captured_at: decode_date(stamp)?,
            kind,
        })
    }

    pub fn file_name(&self) -> String {
        basename(&self.path)
    }

    /// Renders the listing row shown to the operator.
    pub fn to_row(&self, idx: usize, essid_width: usize) -> String {
        format!(
            "{:>3}  {:<essid_width$}  {:<17}  {:<5}  {}",
            idx,
            self.essid,
            self.bssid,
            self.kind.to_string(),
            self.captured_at.format(DATE_FORMAT),
        )
    }
}

/// `2023-01-01T12-00-00` → `2023-01-01 12:00:00`.
fn decode_date(stamp: &str) -> Result<NaiveDateTime, ArtifactError> {
    let (days, hours) = stamp
        .split_once('T')
        .ok_or_else(|| ArtifactError::Date(stamp.to_string()))?;
    let text = format!("{} {}", days, hours.replace('-', ":"));

    NaiveDateTime::parse_from_str(&text, DATE_FORMAT).map_err(|_| ArtifactError::Date(stamp.to_string()))
}

pub fn basename(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
