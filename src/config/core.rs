use serde::{Deserialize, Serialize};

use crate::io::output::OutputFormat;
use crate::iosp::{ExclusionRule, ExclusionTable};

/// Root configuration structure for iosplint
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct IospConfig {
    /// Rule switches and reporting threshold
    #[serde(default)]
    pub rule: RuleConfig,

    /// Additional call exclusions
    #[serde(default)]
    pub exclusions: ExclusionConfig,

    /// Analysis execution settings
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

impl IospConfig {
    /// Exclusion table combining the built-in rules (unless disabled) with
    /// the configured ones
    ///
    /// # Examples
    ///
    /// ```
    /// use iosplint::config::IospConfig;
    /// let config = IospConfig::default();
    /// assert!(!config.exclusion_table().rules().is_empty());
    /// ```
    pub fn exclusion_table(&self) -> ExclusionTable {
        let mut table = if self.exclusions.use_defaults {
            ExclusionTable::defaults()
        } else {
            ExclusionTable::empty()
        };
        table.extend(self.exclusions.rules.iter().cloned());
        table
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RuleConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Diagnostics with a lower metric are not reported
    #[serde(default)]
    pub min_metric: usize,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_metric: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExclusionConfig {
    /// Keep the built-in exclusion table
    #[serde(default = "default_true")]
    pub use_defaults: bool,
    #[serde(default)]
    pub rules: Vec<ExclusionRule>,
}

impl Default for ExclusionConfig {
    fn default() -> Self {
        Self {
            use_defaults: true,
            rules: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnalysisConfig {
    #[serde(default = "default_true")]
    pub parallel: bool,
    /// Worker threads, 0 uses every available core
    #[serde(default)]
    pub jobs: usize,
    #[serde(default)]
    pub include_generated: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            jobs: 0,
            include_generated: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct OutputConfig {
    pub default_format: Option<OutputFormat>,
    /// Enable colored output (default: auto-detect based on TTY)
    #[serde(default)]
    pub use_color: Option<bool>,
}

fn default_true() -> bool {
    true
}
