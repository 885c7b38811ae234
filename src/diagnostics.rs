//! Diagnostic records produced for IOSP violations.

use crate::core::SourceLocation;
use serde::Serialize;

/// Static description of a rule, as shown by `iosplint explain`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RuleDescriptor {
    pub id: &'static str,
    pub title: &'static str,
    pub category: &'static str,
    pub description: &'static str,
    pub severity: Severity,
    pub enabled_by_default: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Warning => f.write_str("warning"),
        }
    }
}

pub const IOSP_RULE: RuleDescriptor = RuleDescriptor {
    id: "CCD0001",
    title: "IOSP violation",
    category: "Clean Code Developer Principles",
    description: "Integration Operation Segregation Principle (IOSP) is violated.",
    severity: Severity::Warning,
    enabled_by_default: true,
};

/// One reported violation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub rule_id: &'static str,
    pub severity: Severity,
    pub method_name: String,
    pub owning_type: String,
    pub metric: usize,
    pub integrations: Vec<String>,
    pub operations: Vec<String>,
    pub expressions: Vec<String>,
    pub integration_text: String,
    pub operation_text: String,
    pub location: SourceLocation,
}

impl Diagnostic {
    /// Headline of the message, without the per-call lines
    pub fn summary(&self) -> String {
        format!(
            "Method '{}' mixes integration with operation (metric {}).",
            self.method_name, self.metric
        )
    }

    pub fn message(&self) -> String {
        format!(
            "{}\n{}{}",
            self.summary(),
            self.integration_text,
            self.operation_text
        )
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {}[{}]: {}",
            self.location,
            self.severity,
            self.rule_id,
            self.message()
        )
    }
}

/// Receiver of diagnostics, zero or one per analyzed method
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}
