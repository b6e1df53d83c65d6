use tracing::{error, info, warn};

use airlock_common::handshake::{CrackResult, HandshakeKind, HandshakeRecord};
use airlock_common::ports::cracking::{CrackEngine, CrackTool};
use airlock_common::success;

use crate::store::ResultStore;

/// A tool that cannot run, with the executables it is missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingTool {
    pub tool: CrackTool,
    pub dependencies: Vec<&'static str>,
}

pub fn missing_tools(engine: &dyn CrackEngine) -> Vec<MissingTool> {
    CrackTool::ALL
        .into_iter()
        .filter_map(|tool| {
            let dependencies = engine.missing_dependencies(tool);
            (!dependencies.is_empty()).then_some(MissingTool { tool, dependencies })
        })
        .collect()
}

pub fn available_tools(engine: &dyn CrackEngine) -> Vec<CrackTool> {
    CrackTool::ALL
        .into_iter()
        .filter(|tool| engine.is_available(*tool))
        .collect()
}

/// How the cracking tool gets picked for a selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolChoice {
    /// Every record is a PMKID hash; only hashcat applies.
    Fixed(CrackTool),
    /// Ask the operator to choose among these.
    Ask(Vec<CrackTool>),
}

pub fn plan_tool(records: &[HandshakeRecord], engine: &dyn CrackEngine) -> ToolChoice {
    if !records.is_empty() && records.iter().all(|hs| hs.kind == HandshakeKind::Pmkid) {
        return ToolChoice::Fixed(CrackTool::Hashcat);
    }
    ToolChoice::Ask(available_tools(engine))
}

/// Maps the operator's answer to a tool, falling back to aircrack.
pub fn resolve_tool(answer: &str, available: &[CrackTool]) -> CrackTool {
    match answer.parse::<CrackTool>() {
        Ok(tool) if available.contains(&tool) => tool,
        _ => {
            warn!("\"{}\" tool not found, defaulting to aircrack", answer.trim());
            CrackTool::Aircrack
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrackOutcome {
    Cracked(CrackResult),
    /// The wordlist did not contain the key.
    NotFound,
    /// The tool required for this record is not installed.
    Unavailable,
    Failed,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CrackSummary {
    pub cracked: usize,
    pub not_found: usize,
    pub skipped: usize,
}

pub struct CrackSession<'a> {
    engine: &'a dyn CrackEngine,
    store: &'a ResultStore,
}

impl<'a> CrackSession<'a> {
    pub fn new(engine: &'a dyn CrackEngine, store: &'a ResultStore) -> Self {
        Self { engine, store }
    }

    /// Cracks one record and stores the key if found.
    ///
    /// PMKID hashes always go through hashcat, whatever `tool` says.
    pub async fn crack_one(&self, record: &HandshakeRecord, tool: CrackTool) -> anyhow::Result<CrackOutcome> {
        info!(
            "Cracking {} {} ({})",
            record.kind.description(),
            record.essid,
            record.bssid
        );

        let tool = match record.kind {
            HandshakeKind::Pmkid if tool != CrackTool::Hashcat => {
                info!("Note: PMKID hashes can only be cracked using hashcat");
                CrackTool::Hashcat
            }
            _ => tool,
        };

        if !self.engine.can_crack(record.kind, tool) {
            warn!("{tool} is missing, cannot crack {}", record.file_name());
            return Ok(CrackOutcome::Unavailable);
        }

        let key = match self.engine.crack(record, tool).await {
            Ok(key) => key,
            Err(e) => {
                error!("Error: {e:#}");
                return Ok(CrackOutcome::Failed);
            }
        };

        match key.and_then(|key| CrackResult::new(record, key)) {
            Some(result) => {
                success!(
                    "Cracked {} ({}). Key: \"{}\"",
                    record.essid,
                    record.bssid,
                    result.key
                );
                self.store.save(&result)?;
                Ok(CrackOutcome::Cracked(result))
            }
            None => {
                warn!(
                    "Failed to crack {} ({}): Passphrase not in dictionary",
                    record.essid, record.bssid
                );
                Ok(CrackOutcome::NotFound)
            }
        }
    }

    pub async fn crack_all(&self, records: &[HandshakeRecord], tool: CrackTool) -> anyhow::Result<CrackSummary> {
        let mut summary = CrackSummary::default();
        for record in records {
            match self.crack_one(record, tool).await? {
                CrackOutcome::Cracked(_) => summary.cracked += 1,
                CrackOutcome::NotFound => summary.not_found += 1,
                CrackOutcome::Unavailable | CrackOutcome::Failed => summary.skipped += 1,
            }
        }
        Ok(summary)
    }
}
