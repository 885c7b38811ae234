//! Declarative table of external calls that carry no classification weight.
//!
//! Each rule names a namespace prefix, a containing type and/or a member
//! name; a call is excluded when every criterion a rule sets matches. New
//! exclusions are added as data, either in code or from `.iosplint.toml`.

use crate::core::TargetDescriptor;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExclusionCategory {
    TaskScheduling,
    AwaiterConfiguration,
    TestAssertion,
    SnapshotVerification,
    Logging,
    Custom,
}

impl std::fmt::Display for ExclusionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::TaskScheduling => "task scheduling",
            Self::AwaiterConfiguration => "awaiter configuration",
            Self::TestAssertion => "test assertion",
            Self::SnapshotVerification => "snapshot verification",
            Self::Logging => "logging",
            Self::Custom => "custom",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExclusionRule {
    #[serde(default = "default_category")]
    pub category: ExclusionCategory,
    /// Namespace prefix, matched on whole dotted segments
    #[serde(default)]
    pub namespace: Option<String>,
    /// Containing type name without generic arguments
    #[serde(default, rename = "type")]
    pub containing_type: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

fn default_category() -> ExclusionCategory {
    ExclusionCategory::Custom
}

impl ExclusionRule {
    pub fn namespace(category: ExclusionCategory, prefix: impl Into<String>) -> Self {
        Self {
            category,
            namespace: Some(prefix.into()),
            containing_type: None,
            name: None,
        }
    }

    pub fn member(
        category: ExclusionCategory,
        namespace: impl Into<String>,
        containing_type: Option<&str>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            category,
            namespace: Some(namespace.into()),
            containing_type: containing_type.map(str::to_string),
            name: Some(name.into()),
        }
    }

    /// A rule without any criterion never matches
    pub fn is_empty(&self) -> bool {
        self.namespace.is_none() && self.containing_type.is_none() && self.name.is_none()
    }

    pub fn matches(&self, target: &TargetDescriptor) -> bool {
        if self.is_empty() {
            return false;
        }

        let namespace_ok = self
            .namespace
            .as_deref()
            .is_none_or(|prefix| namespace_has_prefix(&target.containing_namespace, prefix));
        let type_ok = self
            .containing_type
            .as_deref()
            .is_none_or(|ty| type_base_name(&target.containing_type) == ty);
        let name_ok = self.name.as_deref().is_none_or(|name| target.name == name);

        namespace_ok && type_ok && name_ok
    }
}

fn namespace_has_prefix(namespace: &str, prefix: &str) -> bool {
    namespace
        .strip_prefix(prefix)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('.'))
}

/// `Task<int>` -> `Task`, `Func`2` -> `Func`
pub(crate) fn type_base_name(ty: &str) -> &str {
    let end = ty.find(['<', '`']).unwrap_or(ty.len());
    ty[..end].trim()
}

/// Ordered collection of exclusion rules
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionTable {
    rules: Vec<ExclusionRule>,
}

impl ExclusionTable {
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Built-in exclusions: task scheduling, awaiter configuration, test
    /// assertion and snapshot frameworks, structured logging.
    pub fn defaults() -> Self {
        use ExclusionCategory::*;

        let mut rules = vec![
            ExclusionRule::member(TaskScheduling, "System.Threading.Tasks", Some("Task"), "Run"),
            ExclusionRule::member(AwaiterConfiguration, "System", None, "ConfigureAwait"),
        ];
        rules.extend(
            [
                "NUnit.Framework",
                "Xunit",
                "Microsoft.VisualStudio.TestTools.UnitTesting",
                "FluentAssertions",
                "Shouldly",
            ]
            .map(|ns| ExclusionRule::namespace(TestAssertion, ns)),
        );
        rules.extend(
            ["VerifyTests", "VerifyNUnit", "VerifyXunit", "VerifyMSTest"]
                .map(|ns| ExclusionRule::namespace(SnapshotVerification, ns)),
        );
        rules.extend(
            ["Microsoft.Extensions.Logging", "Serilog"]
                .map(|ns| ExclusionRule::namespace(Logging, ns)),
        );

        Self { rules }
    }

    pub fn with_rule(mut self, rule: ExclusionRule) -> Self {
        self.push(rule);
        self
    }

    pub fn push(&mut self, rule: ExclusionRule) {
        if !rule.is_empty() {
            self.rules.push(rule);
        }
    }

    pub fn rules(&self) -> &[ExclusionRule] {
        &self.rules
    }

    /// First rule excluding `target`, if any
    pub fn find_match(&self, target: &TargetDescriptor) -> Option<&ExclusionRule> {
        self.rules.iter().find(|rule| rule.matches(target))
    }
}

impl Default for ExclusionTable {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Extend<ExclusionRule> for ExclusionTable {
    fn extend<I: IntoIterator<Item = ExclusionRule>>(&mut self, iter: I) {
        for rule in iter {
            self.push(rule);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category_of(target: &TargetDescriptor) -> Option<ExclusionCategory> {
        ExclusionTable::defaults().find_match(target).map(|r| r.category)
    }

    #[test]
    fn test_task_run_is_excluded_but_other_task_members_are_not() {
        let run = TargetDescriptor::external("System.Threading.Tasks", "Task", "Run");
        let generic_run = TargetDescriptor::external("System.Threading.Tasks", "Task<int>", "Run");
        let delay = TargetDescriptor::external("System.Threading.Tasks", "Task", "Delay");

        assert_eq!(category_of(&run), Some(ExclusionCategory::TaskScheduling));
        assert_eq!(category_of(&generic_run), Some(ExclusionCategory::TaskScheduling));
        assert_eq!(category_of(&delay), None);
    }

    #[test]
    fn test_configure_await_on_any_awaitable() {
        let task = TargetDescriptor::external("System.Threading.Tasks", "Task<int>", "ConfigureAwait");
        let value_task =
            TargetDescriptor::external("System.Threading.Tasks", "ValueTask", "ConfigureAwait");

        assert_eq!(category_of(&task), Some(ExclusionCategory::AwaiterConfiguration));
        assert_eq!(category_of(&value_task), Some(ExclusionCategory::AwaiterConfiguration));
    }

    #[test]
    fn test_namespace_prefix_matches_whole_segments() {
        let logger = TargetDescriptor::external(
            "Microsoft.Extensions.Logging",
            "LoggerExtensions",
            "LogInformation",
        );
        let nested = TargetDescriptor::external("NUnit.Framework.Legacy", "ClassicAssert", "AreEqual");
        let lookalike = TargetDescriptor::external("XunitExtras", "Helpers", "Check");

        assert_eq!(category_of(&logger), Some(ExclusionCategory::Logging));
        assert_eq!(category_of(&nested), Some(ExclusionCategory::TestAssertion));
        assert_eq!(category_of(&lookalike), None);
    }

    #[test]
    fn test_snapshot_frameworks() {
        let verify = TargetDescriptor::external("VerifyNUnit", "Verifier", "Verify");
        assert_eq!(category_of(&verify), Some(ExclusionCategory::SnapshotVerification));
    }

    #[test]
    fn test_empty_rules_are_ignored() {
        let empty = ExclusionRule {
            category: ExclusionCategory::Custom,
            namespace: None,
            containing_type: None,
            name: None,
        };
        let table = ExclusionTable::empty().with_rule(empty);
        assert!(table.rules().is_empty());
    }

    #[test]
    fn test_custom_rule_by_name_only() {
        let mut table = ExclusionTable::empty();
        table.extend([ExclusionRule {
            category: ExclusionCategory::Custom,
            namespace: None,
            containing_type: None,
            name: Some("Dispose".into()),
        }]);

        let dispose = TargetDescriptor::external("System.IO", "Stream", "Dispose");
        assert_eq!(
            table.find_match(&dispose).map(|r| r.category),
            Some(ExclusionCategory::Custom)
        );
    }

    #[test]
    fn test_type_base_name() {
        assert_eq!(type_base_name("Task<int>"), "Task");
        assert_eq!(type_base_name("Func`2"), "Func");
        assert_eq!(type_base_name("Object"), "Object");
    }
}
