// Command-line interface: argument parsing and subcommand execution
pub mod commands;

pub use commands::{Cli, run};
