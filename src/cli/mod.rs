//! CLI module for iosplint
//!
//! - Argument parsing (`args`)
//! - Runtime setup (`setup`)
//!
//! Command implementations live in [`crate::commands`].

pub mod args;
pub mod setup;

pub use args::{Cli, Commands, OutputFormat};
pub use setup::{configure_color, configure_thread_pool, init_logging};

/// Parse CLI arguments using Clap
pub fn parse_args() -> Cli {
    args::parse_args()
}
