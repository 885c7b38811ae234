use crate::config::{load_config, load_config_from};
use crate::diagnostics::{RuleDescriptor, IOSP_RULE};
use crate::iosp::{ExclusionRule, ExclusionTable};
use anyhow::Result;
use colored::*;
use std::fmt::Write as _;
use std::path::Path;

pub fn explain_rule(config_path: Option<&Path>) -> Result<()> {
    let config = match config_path {
        Some(path) => load_config_from(path)?,
        None => load_config(),
    };
    print!("{}", render_explanation(&IOSP_RULE, &config.exclusion_table()));
    Ok(())
}

pub fn render_explanation(rule: &RuleDescriptor, table: &ExclusionTable) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} {}", rule.id.bold(), rule.title.bold());
    let _ = writeln!(out, "  Category: {}", rule.category);
    let _ = writeln!(out, "  Severity: {}", rule.severity);
    let _ = writeln!(out, "  {}", rule.description);
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "A method integrates when it calls methods declared in the analyzed code,"
    );
    let _ = writeln!(
        out,
        "and operates when it calls external APIs or evaluates binary expressions."
    );
    let _ = writeln!(out, "Doing both in one method is reported.");
    let _ = writeln!(out);
    let _ = writeln!(out, "Metric:");
    let _ = writeln!(out, "  integrations > operations  =>  operations + 2 * expressions");
    let _ = writeln!(out, "  otherwise                  =>  integrations");
    let _ = writeln!(out);
    let _ = writeln!(out, "{} ({})", "Excluded calls".bold(), table.rules().len());
    for rule in table.rules() {
        let _ = writeln!(out, "  [{}] {}", rule.category, describe(rule));
    }
    out
}

fn describe(rule: &ExclusionRule) -> String {
    let mut parts = Vec::new();
    if let Some(ns) = &rule.namespace {
        parts.push(format!("namespace {ns}"));
    }
    if let Some(ty) = &rule.containing_type {
        parts.push(format!("type {ty}"));
    }
    if let Some(name) = &rule.name {
        parts.push(format!("member {name}"));
    }
    parts.join(", ")
}
