//! IOSP analyzer
//!
//! Runs the classifier and verdict builder over every method of a source
//! file. Each method is analyzed independently; files and methods can be
//! processed in parallel without any shared mutable state.

use super::classifier::{ClassificationResult, Classifier};
use super::exclusions::ExclusionTable;
use super::verdict::Verdict;
use crate::config::IospConfig;
use crate::core::{
    AnalysisUnit, CancellationToken, Cancelled, MethodDeclaration, NodeKind, SourceFile,
    SourceLocation, SymbolResolver, SyntaxTree,
};
use crate::diagnostics::{Diagnostic, DiagnosticSink, IOSP_RULE};
use rayon::prelude::*;
use tracing::{debug, debug_span};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Owner of the block is not a method (e.g. a field initializer)
    NotAMethod,
    /// Expression-bodied or abstract member
    NoBody,
    EmptyBody,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisOutcome {
    Clean,
    Violation(Box<Diagnostic>),
    Skipped(SkipReason),
}

impl AnalysisOutcome {
    pub fn into_diagnostic(self) -> Option<Diagnostic> {
        match self {
            AnalysisOutcome::Violation(diagnostic) => Some(*diagnostic),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct IospAnalyzer {
    enabled: bool,
    exclusions: ExclusionTable,
    min_metric: usize,
    include_generated: bool,
    parallel: bool,
}

impl IospAnalyzer {
    pub fn new() -> Self {
        Self {
            enabled: true,
            exclusions: ExclusionTable::defaults(),
            min_metric: 0,
            include_generated: false,
            parallel: true,
        }
    }

    pub fn from_config(config: &IospConfig) -> Self {
        Self {
            enabled: config.rule.enabled,
            exclusions: config.exclusion_table(),
            min_metric: config.rule.min_metric,
            include_generated: config.analysis.include_generated,
            parallel: config.analysis.parallel,
        }
    }

    pub fn with_exclusions(mut self, exclusions: ExclusionTable) -> Self {
        self.exclusions = exclusions;
        self
    }

    pub fn with_min_metric(mut self, min_metric: usize) -> Self {
        self.min_metric = min_metric;
        self
    }

    pub fn with_generated_code(mut self, include: bool) -> Self {
        self.include_generated = include;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn exclusions(&self) -> &ExclusionTable {
        &self.exclusions
    }

    /// Analyze a single method body
    pub fn analyze_method<R>(
        &self,
        tree: &SyntaxTree,
        method: &MethodDeclaration,
        resolver: &R,
        cancel: &CancellationToken,
    ) -> AnalysisOutcome
    where
        R: SymbolResolver + ?Sized,
    {
        if !method.kind.is_method_like() {
            return AnalysisOutcome::Skipped(SkipReason::NotAMethod);
        }
        let Some(body) = method.body.and_then(|id| tree.node(id)) else {
            return AnalysisOutcome::Skipped(SkipReason::NoBody);
        };
        if !body.is(NodeKind::Block) {
            return AnalysisOutcome::Skipped(SkipReason::NoBody);
        }
        if body.children().next().is_none() {
            return AnalysisOutcome::Skipped(SkipReason::EmptyBody);
        }

        let classifier = Classifier::new(resolver, &self.exclusions);
        let result = match classifier
            .classify(tree, body.id(), &method.name, cancel)
            .and_then(|result| cancel.check().map(|_| result))
        {
            Ok(result) => result,
            Err(Cancelled) => return AnalysisOutcome::Skipped(SkipReason::Cancelled),
        };

        debug!(
            method = %method.name,
            integrations = result.integrations.len(),
            operations = result.operations.len(),
            expressions = result.expressions.len(),
            "Classified method"
        );

        let verdict = Verdict::from_classification(&result);
        if !verdict.is_violation {
            return AnalysisOutcome::Clean;
        }

        let location = method
            .location_in(tree.path())
            .cloned()
            .unwrap_or_else(|| SourceLocation::new(tree.path(), body.span()));
        AnalysisOutcome::Violation(Box::new(build_diagnostic(method, result, verdict, location)))
    }

    /// Analyze every method of `file`, returning diagnostics in declaration order
    pub fn analyze_file<R>(
        &self,
        file: &SourceFile,
        resolver: &R,
        cancel: &CancellationToken,
    ) -> Vec<Diagnostic>
    where
        R: SymbolResolver + Sync + ?Sized,
    {
        let _span = debug_span!("analyze_file", path = %file.path().display()).entered();

        if !self.enabled {
            return Vec::new();
        }
        if file.generated && !self.include_generated {
            debug!("Skipping generated file");
            return Vec::new();
        }

        let analyze = |method: &MethodDeclaration| {
            let outcome = self.analyze_method(&file.tree, method, resolver, cancel);
            if let AnalysisOutcome::Skipped(reason) = outcome {
                debug!(method = %method.name, ?reason, "Method skipped");
            }
            outcome
                .into_diagnostic()
                .filter(|d| d.metric >= self.min_metric)
        };

        let diagnostics: Vec<Diagnostic> = if self.parallel {
            file.methods.par_iter().filter_map(analyze).collect()
        } else {
            file.methods.iter().filter_map(analyze).collect()
        };

        debug!(violations = diagnostics.len(), "File analysis complete");
        diagnostics
    }

    /// Analyze several files and forward every diagnostic to `sink`, in
    /// file order
    pub fn analyze_units<R>(
        &self,
        units: &[AnalysisUnit<R>],
        cancel: &CancellationToken,
        sink: &mut dyn DiagnosticSink,
    ) where
        R: SymbolResolver + Sync + Send,
    {
        let run = |unit: &AnalysisUnit<R>| self.analyze_file(&unit.file, &unit.resolver, cancel);
        let per_file: Vec<Vec<Diagnostic>> = if self.parallel {
            units.par_iter().map(run).collect()
        } else {
            units.iter().map(run).collect()
        };

        for diagnostic in per_file.into_iter().flatten() {
            sink.report(diagnostic);
        }
    }
}

impl Default for IospAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

fn build_diagnostic(
    method: &MethodDeclaration,
    result: ClassificationResult,
    verdict: Verdict,
    location: SourceLocation,
) -> Diagnostic {
    Diagnostic {
        rule_id: IOSP_RULE.id,
        severity: IOSP_RULE.severity,
        method_name: method.name.clone(),
        owning_type: method.owning_type.clone(),
        metric: verdict.metric,
        integrations: result.integrations.into_vec(),
        operations: result.operations.into_vec(),
        expressions: result.expressions.into_vec(),
        integration_text: verdict.integration_lines,
        operation_text: verdict.operation_lines,
        location,
    }
}
