//! Flight route CLI library.
//!
//! Command handlers, terminal styling and output formatting for the
//! `flightroute` binary.

pub mod commands;
pub mod output;
pub mod terminal;
