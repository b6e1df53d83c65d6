//! # Key Recovery
//!
//! * [`external`]: the [`CrackEngine`](airlock_common::ports::cracking::CrackEngine) driving aircrack-ng and hashcat.
//! * [`session`]: tool selection and the per-handshake crack/report/save cycle.

pub mod external;
pub mod session;
