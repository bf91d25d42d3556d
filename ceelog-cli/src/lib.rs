//! ceelog command-line interface
//!
//! The `ceelog` binary is a thin wrapper over these modules so that
//! integration tests can drive the command handlers directly.

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;
pub mod output;
