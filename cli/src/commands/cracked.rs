use colored::*;
use tracing::info;

use airlock_common::config::Config;
use airlock_core::store::ResultStore;

use crate::terminal::{colors, print};

pub fn cracked(cfg: &Config) -> anyhow::Result<()> {
    let store = ResultStore::new(&cfg.cracked_file);
    let results = store.results()?;

    if results.is_empty() {
        info!("No cracked networks in {}", store.path().display());
        return Ok(());
    }

    info!("{} cracked network(s)", results.len());
    for (idx, result) in results.iter().enumerate() {
        print::tree_head(idx + 1, &result.essid);

        let date = result
            .recovered_at()
            .map(|date| date.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "?".to_string());

        print::as_tree_one_level(vec![
            ("bssid".to_string(), result.bssid.color(colors::MAC_ADDR)),
            ("type".to_string(), result.kind.to_string().normal()),
            ("key".to_string(), result.key.color(colors::KEY).bold()),
            ("file".to_string(), result.file_name().normal()),
            ("date".to_string(), date.normal()),
        ]);
    }

    print::end_of_program(cfg.quiet);
    Ok(())
}
