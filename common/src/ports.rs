//! # Ports
//!
//! Traits the core depends on and the adapters implement.
//!
//! * [`capture::CaptureSource`]: something that keeps observing the air and merges targets.
//! * [`cracking::CrackEngine`]: offline key recovery against a handshake artifact.
//! * [`presenter::Presenter`]: where the discovery loop draws its output.

pub mod capture;
pub mod cracking;
pub mod presenter;
