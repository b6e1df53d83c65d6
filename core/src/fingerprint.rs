//! Cheap change detection for the live target table.
//!
//! The fingerprint covers the ordered `(bssid, essid, channel)` triples only;
//! power and client counts change every second and are shown on the status
//! line instead of forcing a redraw.

use sha2::{Digest, Sha256};

use airlock_common::wireless::target::Target;

const FIELD_SEPARATOR: u8 = 0x1f;
const RECORD_SEPARATOR: u8 = 0x1e;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    pub fn of(targets: &[Target]) -> Self {
        let mut hasher = Sha256::new();
        for target in targets {
            hasher.update(target.bssid.as_bytes());
            hasher.update([FIELD_SEPARATOR]);
            hasher.update(target.essid.as_bytes());
            hasher.update([FIELD_SEPARATOR]);
            hasher.update(target.channel.to_string().as_bytes());
            hasher.update([RECORD_SEPARATOR]);
        }
        Self(hasher.finalize().into())
    }
}

/// Remembers the last fingerprint and reports whether the table changed.
#[derive(Debug, Default)]
pub struct ChangeDetector {
    last: Option<Fingerprint>,
}

impl ChangeDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the fingerprint of `targets`; true if it differs from the previous call.
    pub fn changed(&mut self, targets: &[Target]) -> bool {
        let current = Fingerprint::of(targets);
        if self.last == Some(current) {
            return false;
        }
        self.last = Some(current);
        true
    }
}
