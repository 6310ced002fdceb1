//! Shared helpers for the CLI commands.
//!
//! - [`logging`]: tracing subscriber and colour control from global flags
//! - [`settings`]: configuration lookup (`--config`, `REFMAN_CONFIG`, platform dir)
//! - [`files`]: reading inputs and writing rendered output

pub mod files;
pub mod logging;
pub mod settings;
