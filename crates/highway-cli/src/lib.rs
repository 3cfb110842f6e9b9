//! Highway CLI library.
//!
//! Command handlers and configuration resolution for the `highway` binary.
//! The binary itself only parses arguments, installs logging and dispatches.

pub mod commands;
pub mod config;
