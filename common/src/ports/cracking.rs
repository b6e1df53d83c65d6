use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;

use crate::handshake::{HandshakeKind, HandshakeRecord};

/// External programs able to recover a key from a handshake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrackTool {
    Aircrack,
    Hashcat,
}

impl CrackTool {
    pub const ALL: [CrackTool; 2] = [CrackTool::Aircrack, CrackTool::Hashcat];

    /// Executables that must be installed for this tool to work.
    pub fn dependencies(&self) -> &'static [&'static str] {
        match self {
            CrackTool::Aircrack => &["aircrack-ng"],
            CrackTool::Hashcat => &["hashcat", "hcxpcapngtool"],
        }
    }

    /// Executables needed to crack one kind of artifact. PMKID hashes are
    /// already hashcat input and skip the `hcxpcapngtool` conversion.
    pub fn dependencies_for(&self, kind: HandshakeKind) -> &'static [&'static str] {
        match (self, kind) {
            (CrackTool::Hashcat, HandshakeKind::Pmkid) => &["hashcat"],
            _ => self.dependencies(),
        }
    }
}

impl fmt::Display for CrackTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CrackTool::Aircrack => f.write_str("aircrack"),
            CrackTool::Hashcat => f.write_str("hashcat"),
        }
    }
}

impl FromStr for CrackTool {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "aircrack" | "aircrack-ng" => Ok(CrackTool::Aircrack),
            "hashcat" => Ok(CrackTool::Hashcat),
            other => Err(format!("unknown cracking tool: {other}")),
        }
    }
}

/// Offline key recovery.
#[async_trait]
pub trait CrackEngine: Send + Sync {
    /// Names of the executables `tool` needs that are not installed.
    fn missing_dependencies(&self, tool: CrackTool) -> Vec<&'static str>;

    fn is_available(&self, tool: CrackTool) -> bool {
        self.missing_dependencies(tool).is_empty()
    }

    /// True if `tool` can run against an artifact of `kind`.
    fn can_crack(&self, kind: HandshakeKind, tool: CrackTool) -> bool {
        let missing = self.missing_dependencies(tool);
        tool.dependencies_for(kind)
            .iter()
            .all(|program| !missing.contains(program))
    }

    fn supports_pmkid(&self) -> bool {
        self.can_crack(HandshakeKind::Pmkid, CrackTool::Hashcat)
    }

    /// Tries to recover the key. `Ok(None)` means the wordlist did not contain it.
    async fn crack(&self, record: &HandshakeRecord, tool: CrackTool) -> anyhow::Result<Option<String>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_names_round_trip_through_display() {
        for tool in CrackTool::ALL {
            assert_eq!(tool.to_string().parse::<CrackTool>(), Ok(tool));
        }
        assert_eq!(" Aircrack-NG ".parse::<CrackTool>(), Ok(CrackTool::Aircrack));
        assert!("john".parse::<CrackTool>().is_err());
    }

    struct HashcatOnly;

    #[async_trait]
    impl CrackEngine for HashcatOnly {
        fn missing_dependencies(&self, tool: CrackTool) -> Vec<&'static str> {
            tool.dependencies()
                .iter()
                .copied()
                .filter(|program| *program != "hashcat")
                .collect()
        }

        async fn crack(&self, _: &HandshakeRecord, _: CrackTool) -> anyhow::Result<Option<String>> {
            Ok(None)
        }
    }

    #[test]
    fn test_pmkid_needs_only_hashcat() {
        let engine = HashcatOnly;
        assert!(!engine.is_available(CrackTool::Hashcat));
        assert!(engine.supports_pmkid());
        assert!(engine.can_crack(HandshakeKind::Pmkid, CrackTool::Hashcat));
        assert!(!engine.can_crack(HandshakeKind::FourWay, CrackTool::Hashcat));
        assert!(!engine.can_crack(HandshakeKind::FourWay, CrackTool::Aircrack));
    }
}
