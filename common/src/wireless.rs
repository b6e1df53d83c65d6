//! # Wireless Models
//!
//! * [`target::Target`]: one access point aggregate seen by the capture source.
//! * [`bssid`]: canonical MAC formatting shared by targets and handshake files.

pub mod bssid;
pub mod target;
