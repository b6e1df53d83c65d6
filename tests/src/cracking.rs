#![cfg(test)]
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::json;
use tempfile::TempDir;

use airlock_common::handshake::{HandshakeKind, HandshakeRecord};
use airlock_common::ports::cracking::{CrackEngine, CrackTool};
use airlock_common::selection;
use airlock_core::catalog;
use airlock_core::cracking::session::{self, CrackSession, CrackSummary, ToolChoice};
use airlock_core::store::ResultStore;

const EVERY_PROGRAM: [&str; 3] = ["aircrack-ng", "hashcat", "hcxpcapngtool"];

/// Cracking tools that "know" the key of some BSSIDs.
struct ScriptedTools {
    keys: HashMap<String, String>,
    installed: Vec<&'static str>,
    used: Mutex<Vec<CrackTool>>,
}

impl ScriptedTools {
    fn new(installed: &[&'static str], keys: &[(&str, &str)]) -> Self {
        Self {
            keys: keys
                .iter()
                .map(|(bssid, key)| (bssid.to_string(), key.to_string()))
                .collect(),
            installed: installed.to_vec(),
            used: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl CrackEngine for ScriptedTools {
    fn missing_dependencies(&self, tool: CrackTool) -> Vec<&'static str> {
        tool.dependencies()
            .iter()
            .copied()
            .filter(|program| !self.installed.contains(program))
            .collect()
    }

    async fn crack(&self, record: &HandshakeRecord, tool: CrackTool) -> anyhow::Result<Option<String>> {
        self.used.lock().unwrap().push(tool);
        Ok(self.keys.get(&record.bssid).cloned())
    }
}

fn touch(dir: &Path, names: &[&str]) {
    for name in names {
        fs::write(dir.join(name), b"").unwrap();
    }
}

#[tokio::test]
async fn test_crack_then_catalog_hides_cracked() {
    let hs = TempDir::new().unwrap();
    touch(
        hs.path(),
        &[
            "handshake_Home_AA-AA-AA-AA-AA-01_2023-03-01T10-00-00.cap",
            "handshake_Cafe_AA-AA-AA-AA-AA-02_2023-05-01T10-00-00.cap",
            "pmkid_Lab_AA-AA-AA-AA-AA-03_2023-04-01T10-00-00.16800",
            "notes.txt",
        ],
    );
    let store = ResultStore::new(hs.path().join("cracked.json"));
    let tools = ScriptedTools::new(&EVERY_PROGRAM, &[("AA:AA:AA:AA:AA:01", "letmein1")]);

    let listed = catalog::list(hs.path(), true, &store.cracked_files().unwrap());
    let essids: Vec<&str> = listed.records.iter().map(|r| r.essid.as_str()).collect();
    assert_eq!(essids, vec!["Cafe", "Lab", "Home"]);

    let chosen = selection::select(&listed.records, "all").unwrap();
    assert_eq!(
        session::plan_tool(&chosen, &tools),
        ToolChoice::Ask(vec![CrackTool::Aircrack, CrackTool::Hashcat])
    );

    let summary = CrackSession::new(&tools, &store)
        .crack_all(&chosen, CrackTool::Aircrack)
        .await
        .unwrap();
    assert_eq!(
        summary,
        CrackSummary {
            cracked: 1,
            not_found: 2,
            skipped: 0
        }
    );
    assert_eq!(
        *tools.used.lock().unwrap(),
        vec![CrackTool::Aircrack, CrackTool::Hashcat, CrackTool::Aircrack]
    );

    let results = store.results().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].key, "letmein1");
    assert_eq!(results[0].kind, HandshakeKind::FourWay);

    let relisted = catalog::list(hs.path(), true, &store.cracked_files().unwrap());
    assert_eq!(relisted.records.len(), 2);
    assert_eq!(relisted.skipped_cracked, 1);
}

#[tokio::test]
async fn test_existing_store_entries_and_missing_hashcat() {
    let hs = TempDir::new().unwrap();
    touch(
        hs.path(),
        &[
            "handshake_Old_AA-AA-AA-AA-AA-10_2022-01-01T00-00-00.cap",
            "handshake_New_AA-AA-AA-AA-AA-11_2022-02-01T00-00-00.cap",
            "pmkid_Lab_AA-AA-AA-AA-AA-12_2022-03-01T00-00-00.16800",
        ],
    );

    let store_path = hs.path().join("cracked.json");
    let existing = json!([{
        "type": "WPA",
        "date": 1_650_000_000,
        "essid": "Old",
        "bssid": "AA:AA:AA:AA:AA:10",
        "key": "oldsecret",
        "handshake_file": "/somewhere/else/handshake_Old_AA-AA-AA-AA-AA-10_2022-01-01T00-00-00.cap"
    }]);
    fs::write(&store_path, existing.to_string()).unwrap();

    let store = ResultStore::new(&store_path);
    let tools = ScriptedTools::new(&["aircrack-ng"], &[]);

    let listed = catalog::list(
        hs.path(),
        tools.supports_pmkid(),
        &store.cracked_files().unwrap(),
    );
    assert_eq!(listed.records.len(), 1);
    assert_eq!(listed.records[0].essid, "New");
    assert_eq!((listed.skipped_cracked, listed.skipped_pmkid), (1, 1));

    let missing = session::missing_tools(&tools);
    assert_eq!(missing.len(), 1);
    assert_eq!(missing[0].tool, CrackTool::Hashcat);

    let tool = session::resolve_tool("hashcat", &session::available_tools(&tools));
    assert_eq!(tool, CrackTool::Aircrack);

    let summary = CrackSession::new(&tools, &store)
        .crack_all(&listed.records, tool)
        .await
        .unwrap();
    assert_eq!(summary.not_found, 1);
    assert_eq!(store.results().unwrap().len(), 1);
}

#[tokio::test]
async fn test_pmkid_listed_and_cracked_with_hashcat_alone() {
    let hs = TempDir::new().unwrap();
    touch(
        hs.path(),
        &[
            "pmkid_Lab_AA-AA-AA-AA-AA-20_2024-01-01T00-00-00.16800",
            "handshake_Home_AA-AA-AA-AA-AA-21_2024-01-02T00-00-00.cap",
        ],
    );
    let store = ResultStore::new(hs.path().join("cracked.json"));
    let tools = ScriptedTools::new(&["hashcat"], &[("AA:AA:AA:AA:AA:20", "pmkidkey")]);

    let listed = catalog::list(hs.path(), tools.supports_pmkid(), &store.cracked_files().unwrap());
    assert_eq!(listed.skipped_pmkid, 0);
    assert_eq!(listed.records.len(), 2);

    let summary = CrackSession::new(&tools, &store)
        .crack_all(&listed.records, CrackTool::Hashcat)
        .await
        .unwrap();
    assert_eq!(
        summary,
        CrackSummary {
            cracked: 1,
            not_found: 0,
            skipped: 1
        }
    );
    assert_eq!(*tools.used.lock().unwrap(), vec![CrackTool::Hashcat]);
    assert_eq!(store.results().unwrap()[0].kind, HandshakeKind::Pmkid);
}
