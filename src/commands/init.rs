use crate::config::CONFIG_FILE_NAME;
use crate::io;
use anyhow::Result;
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG: &str = r#"# iosplint Configuration

[rule]
enabled = true
# Methods with a lower metric are not reported
min_metric = 0

[exclusions]
# Keep the built-in table (Task.Run, ConfigureAwait, test assertions,
# snapshot verification, logging)
use_defaults = true

# [[exclusions.rules]]
# category = "logging"
# namespace = "NLog"

[analysis]
parallel = true
jobs = 0
include_generated = false

[output]
default_format = "terminal"
"#;

pub fn init_config(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    write_default_config(&config_path, force)?;
    println!("Created {} configuration file", CONFIG_FILE_NAME);
    Ok(())
}

pub fn write_default_config(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }
    io::write_file(config_path, DEFAULT_CONFIG)
}
