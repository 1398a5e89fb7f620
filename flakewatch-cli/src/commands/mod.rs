//! CLI command implementations.
//!
//! Each subcommand has its own module with argument definitions and
//! handlers.
//!
//! # Command Modules
//!
//! - [`sync`] - Sync flaky-test issues and emit a recurrence report

pub mod sync;
