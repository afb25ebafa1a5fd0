//! # stepdown-core
//!
//! Container startup primitives: service account resolution, log
//! directory normalization, privilege dropping, and process replacement.
//!
//! The sequence is root-only setup first, then a permanent identity
//! switch, then exec. Everything here is synchronous; the only
//! suspension point is the final process replacement.

pub mod account;
pub mod entrypoint;
pub mod exec;
pub mod logdir;
pub mod privilege;
