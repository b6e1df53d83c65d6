use std::io;

use anyhow::Context;
use colored::*;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use airlock_common::config::Config;
use airlock_common::wireless::target::Target;
use airlock_core::capture::airodump::{AIRODUMP, AirodumpSource};
use airlock_core::discovery::{
    self, CancelSignal, Canceller, DiscoveryLoop, ScanError, TargetChoice, Termination,
};
use airlock_core::system;

use crate::terminal::presenter::TerminalPresenter;
use crate::terminal::{colors, print, prompt};

pub async fn scan(cfg: &Config) -> anyhow::Result<()> {
    if !system::exists(AIRODUMP) {
        anyhow::bail!("{AIRODUMP} not found in PATH");
    }
    if !is_root::is_root() {
        warn!("Not running as root; {AIRODUMP} will probably fail");
    }

    let mut source = AirodumpSource::from_config(cfg)?;
    let (canceller, mut signal) = CancelSignal::new();
    let relay = cancel_on_interrupt(tokio::signal::ctrl_c(), canceller);

    let outcome = {
        let mut presenter = TerminalPresenter::new();
        DiscoveryLoop::from_config(cfg)
            .run(&mut source, &mut presenter, &mut signal)
            .await
    };
    relay.abort();
    exit_on_interrupt();
    let outcome = outcome.context("scan failed")?;

    match &outcome.termination {
        Termination::SourceDied => warn!("{AIRODUMP} stopped unexpectedly"),
        Termination::TimedOut => info!("Scan time elapsed"),
        Termination::Cancelled => info!("Interrupted"),
        Termination::LockedOn(_) => {}
    }

    let targets = match discovery::plan_selection(outcome, cfg) {
        Ok(TargetChoice::Ready(targets)) => targets,
        Ok(TargetChoice::AskOperator(targets)) => {
            print::table(&discovery::target_table(&targets));
            prompt::ask_selection(&targets, "target(s)")?
        }
        Err(e) => {
            if e == ScanError::NoTargets {
                print::no_results();
            }
            return Err(e.into());
        }
    };

    report(&targets);
    print::end_of_program(cfg.quiet);
    Ok(())
}

/// Relays one interrupt to the running scan. Abort the handle once the
/// scan is over so later interrupts reach [`exit_on_interrupt`].
fn cancel_on_interrupt<F>(interrupt: F, canceller: Canceller) -> JoinHandle<()>
where
    F: Future<Output = io::Result<()>> + Send + 'static,
{
    tokio::spawn(async move {
        if interrupt.await.is_ok() {
            canceller.cancel();
        }
    })
}

/// Ctrl+C at the selection prompt ends the program.
fn exit_on_interrupt() {
    tokio::spawn(async {
        if tokio::signal::ctrl_c().await.is_ok() {
            std::process::exit(130);
        }
    });
}

fn report(targets: &[Target]) {
    info!("{} target(s) selected", targets.len());

    for (idx, target) in targets.iter().enumerate() {
        let name = if target.is_hidden() {
            "<hidden>"
        } else {
            target.essid.as_str()
        };
        print::tree_head(idx + 1, name);

        let mut details = vec![
            ("bssid".to_string(), target.bssid.color(colors::MAC_ADDR)),
            ("channel".to_string(), target.channel.to_string().normal()),
            ("encryption".to_string(), target.encryption.to_string().normal()),
            ("power".to_string(), format!("{} dBm", target.power).normal()),
            ("wps".to_string(), target.wps.label().normal()),
        ];
        if !target.clients.is_empty() {
            details.push(("clients".to_string(), target.clients.len().to_string().normal()));
        }
        print::as_tree_one_level(details);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::oneshot;

    fn interrupt(rx: oneshot::Receiver<()>) -> impl Future<Output = io::Result<()>> + Send + 'static {
        async move { rx.await.map_err(io::Error::other) }
    }

    #[tokio::test]
    async fn test_interrupt_cancels_running_scan() {
        let (tx, rx) = oneshot::channel();
        let (canceller, signal) = CancelSignal::new();

        let relay = cancel_on_interrupt(interrupt(rx), canceller);
        tx.send(()).unwrap();
        relay.await.unwrap();

        assert!(signal.is_cancelled());
    }

    #[tokio::test]
    async fn test_aborted_relay_stops_listening() {
        let (tx, rx) = oneshot::channel();
        let (canceller, signal) = CancelSignal::new();

        let relay = cancel_on_interrupt(interrupt(rx), canceller);
        relay.abort();
        assert!(relay.await.unwrap_err().is_cancelled());

        assert!(tx.send(()).is_err());
        assert!(!signal.is_cancelled());
    }
}
