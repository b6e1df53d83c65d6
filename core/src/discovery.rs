//! # Live Target Discovery
//!
//! Polls a [`CaptureSource`] once per second, keeps the merged target list,
//! redraws the table only when it changed and stops when:
//!
//! 1. the capture source dies ([`Termination::SourceDied`]),
//! 2. a target matching the lock-on filter appears ([`Termination::LockedOn`]),
//! 3. the configured scan time elapses ([`Termination::TimedOut`]),
//! 4. the operator cancels ([`Termination::Cancelled`]).
//!
//! None of these is an error. Only a failing collaborator (e.g. an unreadable
//! capture file) is returned as `Err`, after the capture has been released.

use std::ops::{Deref, DerefMut};
use std::time::Duration;

use thiserror::Error;
use tokio::sync::watch;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use airlock_common::config::{Config, TargetFilter};
use airlock_common::ports::capture::CaptureSource;
use airlock_common::ports::presenter::Presenter;
use airlock_common::success;
use airlock_common::wireless::target::{self, Target};

use crate::fingerprint::ChangeDetector;
use crate::matcher;

pub const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Why the discovery loop stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Termination {
    SourceDied,
    LockedOn(Target),
    TimedOut,
    Cancelled,
}

#[derive(Debug, Clone)]
pub struct DiscoveryOutcome {
    pub targets: Vec<Target>,
    pub termination: Termination,
}

impl DiscoveryOutcome {
    pub fn locked_on(&self) -> Option<&Target> {
        match &self.termination {
            Termination::LockedOn(target) => Some(target),
            _ => None,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScanError {
    #[error(
        "No targets found. You may need to wait longer, or you may have issues with your wifi card"
    )]
    NoTargets,
    #[error("WPS filtering needs a capture source that reports WPS state (is `wash` installed?)")]
    WpsUnsupported,
}

/// What to do with the targets once the loop has stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetChoice {
    /// No operator input needed.
    Ready(Vec<Target>),
    /// Show the menu and let the operator pick from these.
    AskOperator(Vec<Target>),
}

/// Decides how targets are chosen after a scan.
///
/// A locked-on target is used alone. Unattended scans (`scan_time > 0`)
/// take every target. Otherwise the operator picks.
pub fn plan_selection(outcome: DiscoveryOutcome, cfg: &Config) -> Result<TargetChoice, ScanError> {
    if let Termination::LockedOn(target) = outcome.termination {
        return Ok(TargetChoice::Ready(vec![target]));
    }

    if outcome.targets.is_empty() {
        return Err(ScanError::NoTargets);
    }

    if !cfg.scan_time.is_zero() {
        return Ok(TargetChoice::Ready(outcome.targets));
    }

    Ok(TargetChoice::AskOperator(outcome.targets))
}

/// Sending half of a cancellation signal.
#[derive(Debug, Clone)]
pub struct Canceller {
    tx: watch::Sender<bool>,
}

impl Canceller {
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }
}

/// Receiving half, checked by the loop once per iteration and raced against its sleep.
#[derive(Debug, Clone)]
pub struct CancelSignal {
    rx: watch::Receiver<bool>,
}

impl CancelSignal {
    pub fn new() -> (Canceller, CancelSignal) {
        let (tx, rx) = watch::channel(false);
        (Canceller { tx }, CancelSignal { rx })
    }

    /// A signal that never fires.
    pub fn never() -> CancelSignal {
        let (_, signal) = Self::new();
        signal
    }

    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once cancellation was requested.
    pub async fn cancelled(&mut self) {
        loop {
            if *self.rx.borrow_and_update() {
                return;
            }
            if self.rx.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        }
    }
}

/// Releases the capture source when dropped, whatever path left the loop.
struct CaptureSession<'s, S: CaptureSource + ?Sized> {
    source: &'s mut S,
}

impl<'s, S: CaptureSource + ?Sized> CaptureSession<'s, S> {
    fn acquire(source: &'s mut S) -> anyhow::Result<Self> {
        source.acquire()?;
        Ok(Self { source })
    }
}

impl<S: CaptureSource + ?Sized> Deref for CaptureSession<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        self.source
    }
}

impl<S: CaptureSource + ?Sized> DerefMut for CaptureSession<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        self.source
    }
}

impl<S: CaptureSource + ?Sized> Drop for CaptureSession<'_, S> {
    fn drop(&mut self) {
        self.source.release();
        debug!("capture source released");
    }
}

pub struct DiscoveryLoop {
    filter: TargetFilter,
    max_scan_time: Duration,
    detector: ChangeDetector,
    targets: Vec<Target>,
}

impl DiscoveryLoop {
    pub fn new(filter: TargetFilter, max_scan_time: Duration) -> Self {
        Self {
            filter,
            max_scan_time,
            detector: ChangeDetector::new(),
            targets: Vec::new(),
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(cfg.filter.clone(), cfg.scan_time)
    }

    /// Runs until one of the [`Termination`] conditions is reached.
    pub async fn run<S, P>(
        mut self,
        source: &mut S,
        presenter: &mut P,
        cancel: &mut CancelSignal,
    ) -> anyhow::Result<DiscoveryOutcome>
    where
        S: CaptureSource + ?Sized,
        P: Presenter + ?Sized,
    {
        if self.filter.wps_only && !source.reports_wps() {
            return Err(ScanError::WpsUnsupported.into());
        }

        let mut session = CaptureSession::acquire(source)?;
        let start: Instant = Instant::now();

        loop {
            if cancel.is_cancelled() {
                return Ok(self.finish(Termination::Cancelled));
            }

            if !session.is_alive() {
                return Ok(self.finish(Termination::SourceDied));
            }

            let previous: Vec<Target> = std::mem::take(&mut self.targets);
            self.targets = session.merge(previous)?;

            if !session.is_alive() {
                return Ok(self.finish(Termination::SourceDied));
            }

            if let Some(found) = matcher::find(&self.targets, &self.filter).cloned() {
                success!("Found target {} ({})", found.bssid, found.essid);
                return Ok(self.finish(Termination::LockedOn(found)));
            }

            if self.detector.changed(&self.targets) {
                presenter.render_block(&target_table(&self.targets));
            }

            let elapsed: Duration = start.elapsed();
            let clients: usize = self.targets.iter().map(|t| t.clients.len()).sum();
            presenter.render_status(&status_line(
                self.targets.len(),
                clients,
                session.is_decloaking(),
                elapsed,
            ));

            if !self.max_scan_time.is_zero() && elapsed > self.max_scan_time {
                return Ok(self.finish(Termination::TimedOut));
            }

            tokio::select! {
                _ = tokio::time::sleep(POLL_INTERVAL) => {}
                _ = cancel.cancelled() => {
                    return Ok(self.finish(Termination::Cancelled));
                }
            }
        }
    }

    fn finish(self, termination: Termination) -> DiscoveryOutcome {
        match &termination {
            Termination::SourceDied => warn!("Capture source terminated unexpectedly"),
            Termination::TimedOut => info!("Scan time of {}s elapsed", self.max_scan_time.as_secs()),
            Termination::Cancelled => info!("Scan interrupted"),
            Termination::LockedOn(_) => {}
        }
        debug!(targets = self.targets.len(), ?termination, "discovery finished");

        DiscoveryOutcome {
            targets: self.targets,
            termination,
        }
    }
}

/// Full menu block: header plus one row per target, numbered from 1.
pub fn target_table(targets: &[Target]) -> String {
    if targets.is_empty() {
        return String::new();
    }

    let mut output: String = target::table_header();
    for (idx, target) in targets.iter().enumerate() {
        output.push('\n');
        output.push_str(&target.to_row(idx + 1));
    }
    output
}

pub fn status_line(targets: usize, clients: usize, decloaking: bool, elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    let mut line = String::from("Scanning");
    if decloaking {
        line.push_str(" & decloaking");
    }
    line.push_str(&format!(
        ". Found {targets} target(s), {clients} client(s). Ctrl+C when ready [{:02}:{:02}]",
        secs / 60,
        secs % 60
    ));
    line
}
