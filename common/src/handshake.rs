//! # Handshake Artifacts
//!
//! * [`record::HandshakeRecord`]: a capture file found on disk, decoded from its name.
//! * [`result::CrackResult`]: a key recovered from one of those files.

pub mod record;
pub mod result;

pub use record::{ArtifactError, HandshakeKind, HandshakeRecord};
pub use result::CrackResult;
