use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use crate::io::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "iosplint")]
#[command(about = "Integration Operation Segregation Principle checker", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check program models for IOSP violations
    Check {
        /// Program model files (JSON) produced by a front end
        #[arg(required = true)]
        models: Vec<PathBuf>,

        /// Output format (defaults to the configured format, then terminal)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Configuration file (defaults to the nearest .iosplint.toml)
        #[arg(short, long, env = "IOSPLINT_CONFIG")]
        config: Option<PathBuf>,

        /// Only report methods whose metric is at least this value
        #[arg(long = "min-metric")]
        min_metric: Option<usize>,

        /// Disable parallel processing
        #[arg(long = "no-parallel")]
        no_parallel: bool,

        /// Number of worker threads (0 = use all cores)
        #[arg(short = 'j', long = "jobs")]
        jobs: Option<usize>,

        /// Analyze files marked as generated code
        #[arg(long = "include-generated")]
        include_generated: bool,

        /// Disable colored output
        #[arg(long = "plain")]
        plain: bool,

        /// Increase verbosity level (can be repeated: -v, -vv, -vvv)
        #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
        verbosity: u8,
    },

    /// Initialize an iosplint configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },

    /// Describe the rule and print the active exclusion table
    Explain {
        /// Configuration file (defaults to the nearest .iosplint.toml)
        #[arg(short, long, env = "IOSPLINT_CONFIG")]
        config: Option<PathBuf>,
    },
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
