//! Configuration for iosplint, read from `.iosplint.toml`.

pub mod core;
pub mod loader;

pub use self::core::{AnalysisConfig, ExclusionConfig, IospConfig, OutputConfig, RuleConfig};
pub use loader::{
    directory_ancestors, discover_config, load_config, load_config_from, parse_config,
    CONFIG_FILE_NAME,
};
