//! Time-tracking export converter CLI.
//!
//! This crate provides the `tp` binary: a thin wrapper around the
//! conversion pipeline in `tp-core`.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands, ConvertArgs, InspectArgs, SourceFormat, TargetFormat};
pub use config::Config;
