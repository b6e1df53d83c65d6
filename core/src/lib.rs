//! # Airlock Core
//!
//! The discovery loop and everything it needs, plus handshake bookkeeping.
//!
//! * [`discovery`]: the once-per-second scan loop and its termination rules.
//! * [`matcher`]: lock-on search over the live target list.
//! * [`fingerprint`]: change detection that keeps redraws rare.
//! * [`capture`]: the `airodump-ng` capture source.
//! * [`catalog`]: crackable handshake listing.
//! * [`store`]: the cracked results file.
//! * [`cracking`]: key recovery through external tools.

pub mod capture;
pub mod catalog;
pub mod cracking;
pub mod discovery;
pub mod fingerprint;
pub mod matcher;
pub mod store;
pub mod system;
