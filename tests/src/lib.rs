//! End-to-end checks across `airlock-common` and `airlock-core`, using
//! replayed capture dumps and scripted cracking tools instead of radios.

mod cracking;
mod discovery;
