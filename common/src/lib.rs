//! # Airlock Common
//!
//! Shared models, ports and configuration for the `airlock` workspace.
//!
//! * **[`wireless`]**: discovered access points ([`wireless::target::Target`]) and MAC handling.
//! * **[`handshake`]**: captured handshake artifacts and recovered keys.
//! * **[`selection`]**: the operator's `1,3,5-7,all` selection grammar.
//! * **[`ports`]**: traits implemented by the capture, cracking and terminal adapters.
//! * **[`config`]**: the run configuration built once by the CLI.

pub mod config;
pub mod handshake;
pub mod log;
pub mod ports;
pub mod selection;
pub mod wireless;
