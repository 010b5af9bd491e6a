//! # Lumen Application Library
//!
//! Command-line front end for the Lumen theme and accessibility core. This
//! library holds everything the `lumen` binary wires together so it can be
//! exercised by integration tests.
//!
//! ## Modules
//!
//! - [`cli`] - Command-line argument definitions
//! - [`commands`] - Subcommand implementations and their reports
//! - [`config`] - Layered configuration loading and validation
//! - [`error`] - Application error type
//! - [`logger`] - Logging setup

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logger;
