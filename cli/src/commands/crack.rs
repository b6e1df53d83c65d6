use std::path::PathBuf;

use anyhow::bail;
use tracing::{info, warn};

use airlock_common::config::Config;
use airlock_common::ports::cracking::CrackEngine;
use airlock_core::catalog;
use airlock_core::cracking::external::ExternalCrackEngine;
use airlock_core::cracking::session::{self, CrackSession, ToolChoice};
use airlock_core::store::ResultStore;

use crate::terminal::{print, prompt};

pub async fn crack(cfg: &Config) -> anyhow::Result<()> {
    let wordlist = match &cfg.wordlist {
        Some(path) => path.clone(),
        None => PathBuf::from(prompt::ask("Enter wordlist file to use for cracking")?),
    };
    if !wordlist.is_file() {
        bail!("Wordlist {} not found", wordlist.display());
    }

    let engine = ExternalCrackEngine::new(wordlist);
    let store = ResultStore::new(&cfg.cracked_file);

    let cracked = store.cracked_files()?;
    let pmkid_supported = engine.supports_pmkid();
    let catalog = catalog::list(&cfg.handshake_dir, pmkid_supported, &cracked);
    if catalog.is_empty() {
        warn!("No handshakes found in {}", cfg.handshake_dir.display());
        return Ok(());
    }

    print::table(&catalog::handshake_table(&catalog.records));
    let records = prompt::ask_selection(&catalog.records, "handshake(s) to crack")?;

    for missing in session::missing_tools(&engine) {
        warn!(
            "{} unavailable, missing: {}",
            missing.tool,
            missing.dependencies.join(", ")
        );
    }

    let tool = match session::plan_tool(&records, &engine) {
        ToolChoice::Fixed(tool) => {
            info!("Note: PMKID hashes can only be cracked using {tool}");
            tool
        }
        ToolChoice::Ask(available) if available.is_empty() => {
            bail!("no cracking tool installed");
        }
        ToolChoice::Ask(available) => {
            let names: Vec<String> = available.iter().map(ToString::to_string).collect();
            let answer = prompt::ask(&format!(
                "Enter the cracking tool to use ({})",
                names.join("/")
            ))?;
            session::resolve_tool(&answer, &available)
        }
    };

    let cracker = CrackSession::new(&engine, &store);
    tokio::select! {
        summary = cracker.crack_all(&records, tool) => {
            let summary = summary?;
            info!(
                "Done: {} cracked, {} not in wordlist, {} skipped",
                summary.cracked, summary.not_found, summary.skipped
            );
        }
        _ = tokio::signal::ctrl_c() => warn!("Interrupted"),
    }

    print::end_of_program(cfg.quiet);
    Ok(())
}
