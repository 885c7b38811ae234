//! Command handlers for CLI subcommands

pub mod check;
pub mod explain;
pub mod init;

pub use check::{check_models, CheckConfig};
pub use explain::explain_rule;
pub use init::init_config;
