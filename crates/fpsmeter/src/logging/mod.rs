//! Logging utilities.
//!
//! The library itself only talks to the `log` facade. This module wires up
//! `env_logger` for binaries and tests that want to see the output.

mod init;

pub use init::{LoggingConfig, init_logging};
