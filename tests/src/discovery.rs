#![cfg(test)]
use std::collections::VecDeque;
use std::time::Duration;

use airlock_common::config::{Config, TargetFilter};
use airlock_common::ports::capture::CaptureSource;
use airlock_common::ports::presenter::RecordingPresenter;
use airlock_common::selection;
use airlock_common::wireless::target::{Encryption, Target};
use airlock_core::capture::{csv, merge_targets};
use airlock_core::discovery::{
    self, CancelSignal, DiscoveryLoop, ScanError, TargetChoice, Termination,
};

const HEADER: &str = "\r\nBSSID, First time seen, Last time seen, channel, Speed, Privacy, Cipher, Authentication, Power, # beacons, # IV, LAN IP, ID-length, ESSID, Key\r\n";
const STATIONS: &str = "\r\nStation MAC, First time seen, Last time seen, Power, # packets, BSSID, Probed ESSIDs\r\n";

fn ap_row(n: u8, channel: u16, essid: &str) -> String {
    format!(
        "AA:BB:CC:DD:EE:{n:02X}, 2023-01-01 12:00:00, 2023-01-01 12:00:05, {channel:>2}, 54, WPA2, CCMP, PSK, -50, 10, 0, 0.  0.  0.  0, {}, {essid}, \r\n",
        essid.len()
    )
}

fn dump(rows: &[String], stations: &[&str]) -> String {
    let mut text = String::from(HEADER);
    rows.iter().for_each(|row| text.push_str(row));
    text.push_str(STATIONS);
    stations.iter().for_each(|row| text.push_str(row));
    text
}

/// Feeds one airodump CSV snapshot per poll through the real parser.
#[derive(Default)]
struct DumpReplay {
    dumps: VecDeque<String>,
    hold_last: bool,
    released: bool,
}

impl DumpReplay {
    fn new(dumps: Vec<String>) -> Self {
        Self {
            dumps: dumps.into(),
            ..Default::default()
        }
    }
}

impl CaptureSource for DumpReplay {
    fn acquire(&mut self) -> anyhow::Result<()> {
        Ok(())
    }

    fn release(&mut self) {
        self.released = true;
    }

    fn is_alive(&mut self) -> bool {
        self.hold_last || !self.dumps.is_empty()
    }

    fn merge(&mut self, previous: Vec<Target>) -> anyhow::Result<Vec<Target>> {
        let text = match self.dumps.len() {
            0 => return Ok(previous),
            1 if self.hold_last => self.dumps[0].clone(),
            _ => self.dumps.pop_front().unwrap_or_default(),
        };
        Ok(merge_targets(previous, csv::parse(&text)))
    }
}

#[tokio::test(start_paused = true)]
async fn test_hidden_network_decloaks_during_scan() {
    let station = "11:22:33:44:55:66, 2023-01-01 12:00:00, 2023-01-01 12:00:05, -50, 20, AA:BB:CC:DD:EE:02, \r\n";
    let mut source = DumpReplay::new(vec![
        dump(&[ap_row(1, 6, "Home"), ap_row(2, 11, "")], &[]),
        dump(&[ap_row(1, 6, "Home"), ap_row(2, 11, "")], &[station]),
        dump(&[ap_row(1, 6, "Home"), ap_row(2, 11, "Secret")], &[station]),
    ]);
    let mut presenter = RecordingPresenter::default();

    let outcome = DiscoveryLoop::new(TargetFilter::default(), Duration::ZERO)
        .run(&mut source, &mut presenter, &mut CancelSignal::never())
        .await
        .unwrap();

    assert_eq!(outcome.termination, Termination::SourceDied);
    assert!(source.released);

    let hidden = &outcome.targets[1];
    assert_eq!(hidden.essid, "Secret");
    assert!(hidden.decloaked);
    assert_eq!(hidden.clients.len(), 1);
    assert_eq!(outcome.targets[0].encryption, Encryption::Wpa2);

    // Clients are not part of the fingerprint; only the first snapshot is drawn.
    assert_eq!(presenter.blocks.len(), 1);
    assert!(presenter.statuses[1].contains("1 client(s)"));
}

#[tokio::test(start_paused = true)]
async fn test_lock_on_by_bssid_skips_the_menu() {
    let mut source = DumpReplay::new(vec![
        dump(&[ap_row(1, 6, "Home")], &[]),
        dump(&[ap_row(1, 6, "Home"), ap_row(7, 1, "Office")], &[]),
    ]);
    source.hold_last = true;

    let cfg = Config {
        filter: TargetFilter {
            bssid: Some("aa:bb:cc:dd:ee:07".into()),
            ..Default::default()
        },
        ..Default::default()
    };

    let outcome = DiscoveryLoop::from_config(&cfg)
        .run(&mut source, &mut RecordingPresenter::default(), &mut CancelSignal::never())
        .await
        .unwrap();

    match discovery::plan_selection(outcome, &cfg).unwrap() {
        TargetChoice::Ready(targets) => {
            assert_eq!(targets.len(), 1);
            assert_eq!(targets[0].essid, "Office");
        }
        other => panic!("expected lock-on, got {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn test_cancelled_scan_goes_to_operator_selection() {
    let mut source = DumpReplay::new(vec![dump(
        &[ap_row(1, 6, "Home"), ap_row(2, 11, "Cafe"), ap_row(3, 1, "Lab")],
        &[],
    )]);
    source.hold_last = true;

    let (canceller, mut signal) = CancelSignal::new();
    let cfg = Config::default();

    let scan = tokio::spawn(async move {
        let outcome = DiscoveryLoop::from_config(&cfg)
            .run(&mut source, &mut RecordingPresenter::default(), &mut signal)
            .await;
        (outcome, source.released)
    });

    tokio::time::sleep(Duration::from_millis(2500)).await;
    canceller.cancel();

    let (outcome, released) = scan.await.unwrap();
    let outcome = outcome.unwrap();
    assert_eq!(outcome.termination, Termination::Cancelled);
    assert!(released);

    let TargetChoice::AskOperator(targets) =
        discovery::plan_selection(outcome, &Config::default()).unwrap()
    else {
        panic!("operator should pick");
    };

    let chosen = selection::select(&targets, "3,1").unwrap();
    let names: Vec<&str> = chosen.iter().map(|t| t.essid.as_str()).collect();
    assert_eq!(names, vec!["Lab", "Home"]);
    assert!(selection::select(&targets, "1,9").is_err());
}

#[tokio::test(start_paused = true)]
async fn test_unattended_scan_takes_everything() {
    let mut source = DumpReplay::new(vec![dump(&[ap_row(1, 6, "Home"), ap_row(2, 11, "Cafe")], &[])]);
    source.hold_last = true;

    let cfg = Config {
        scan_time: Duration::from_secs(3),
        ..Default::default()
    };

    let outcome = DiscoveryLoop::from_config(&cfg)
        .run(&mut source, &mut RecordingPresenter::default(), &mut CancelSignal::never())
        .await
        .unwrap();

    assert_eq!(outcome.termination, Termination::TimedOut);
    assert_eq!(
        discovery::plan_selection(outcome, &cfg).unwrap(),
        TargetChoice::Ready(vec![
            Target::new("AA:BB:CC:DD:EE:01", "Home", 6),
            Target::new("AA:BB:CC:DD:EE:02", "Cafe", 11),
        ])
    );
}

#[tokio::test(start_paused = true)]
async fn test_empty_scan_reports_no_targets() {
    let mut source = DumpReplay::new(vec![dump(&[], &[])]);

    let outcome = DiscoveryLoop::from_config(&Config::default())
        .run(&mut source, &mut RecordingPresenter::default(), &mut CancelSignal::never())
        .await
        .unwrap();

    assert_eq!(
        discovery::plan_selection(outcome, &Config::default()),
        Err(ScanError::NoTargets)
    );
}
