//! # pforge CLI
//!
//! Operator commands over a file-backed store. Every command bootstraps the built-in
//! catalog, opens the store and writes plain text (or JSON) to the given writer.
//!
//! ## Example
//! ```no_run
//! use clap::Parser;
//! use pforge::domain::config::EngineConfig;
//! use pforge_cli::{Cli, run};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let cli = Cli::parse_from(["pforge", "screens"]);
//!     run(&cli, EngineConfig::default(), &mut std::io::stdout().lock()).await
//! }
//! ```

mod args;
mod commands;

pub use crate::args::{ClientCommand, Cli, Command, CreateClient, NavCommand, Target};
pub use crate::commands::run;
