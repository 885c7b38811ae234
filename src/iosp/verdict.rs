use super::classifier::ClassificationResult;
use super::ordered::OrderedSet;
use std::fmt::Write;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub is_violation: bool,
    pub metric: usize,
    pub integration_lines: String,
    pub operation_lines: String,
}

impl Verdict {
    pub fn from_classification(result: &ClassificationResult) -> Self {
        Self {
            is_violation: is_violation(result),
            metric: severity_metric(
                result.integrations.len(),
                result.operations.len(),
                result.expressions.len(),
            ),
            integration_lines: render_integrations(&result.integrations),
            operation_lines: render_operations(&result.operations, &result.expressions),
        }
    }
}

/// A method violates IOSP when it delegates and also computes or calls APIs
pub fn is_violation(result: &ClassificationResult) -> bool {
    !result.integrations.is_empty()
        && (!result.operations.is_empty() || !result.expressions.is_empty())
}

/// Severity of a mixed method, lower is better.
///
/// Integration-dominated methods are scored by their stray operations, with
/// expressions weighing double. Operation-dominated methods are scored by
/// their stray integrations.
pub fn severity_metric(integrations: usize, operations: usize, expressions: usize) -> usize {
    match (integrations, operations, expressions) {
        (0, _, _) => 0,
        (_, 0, 0) => 0,
        (i, o, e) if i > o => o + 2 * e,
        (i, _, _) => i,
    }
}

pub fn render_integrations(integrations: &OrderedSet) -> String {
    integrations.iter().fold(String::new(), |mut out, name| {
        let _ = writeln!(out, "- Integration: call to '{name}'");
        out
    })
}

pub fn render_operations(operations: &OrderedSet, expressions: &OrderedSet) -> String {
    let mut out = String::new();
    for name in operations {
        let _ = writeln!(out, "- Operation: calling API '{name}'");
    }
    for text in expressions {
        let _ = writeln!(out, "- Operation: expression '{text}'");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn result(integrations: &[&str], operations: &[&str], expressions: &[&str]) -> ClassificationResult {
        ClassificationResult {
            integrations: integrations.iter().copied().collect(),
            operations: operations.iter().copied().collect(),
            expressions: expressions.iter().copied().collect(),
        }
    }

    #[test]
    fn test_metric_edge_cases() {
        assert_eq!(severity_metric(0, 3, 2), 0);
        assert_eq!(severity_metric(2, 0, 0), 0);
        // integration dominated
        assert_eq!(severity_metric(1, 0, 1), 2);
        assert_eq!(severity_metric(3, 1, 2), 5);
        // operation dominated, including the tie
        assert_eq!(severity_metric(1, 1, 0), 1);
        assert_eq!(severity_metric(2, 4, 7), 2);
    }

    #[test]
    fn test_violation_requires_both_roles() {
        assert!(!is_violation(&result(&["A"], &[], &[])));
        assert!(!is_violation(&result(&[], &["ToString"], &["x + 1"])));
        assert!(is_violation(&result(&["A"], &[], &["x + 1"])));
        assert!(is_violation(&result(&["A"], &["ToString"], &[])));
    }

    #[test]
    fn test_rendering_lists_operations_before_expressions() {
        let verdict = Verdict::from_classification(&result(
            &["Operation1", "Operation2"],
            &["WriteLine"],
            &["x == 42"],
        ));

        assert!(verdict.is_violation);
        assert_eq!(verdict.metric, 3);
        assert_eq!(
            verdict.integration_lines,
            "- Integration: call to 'Operation1'\n- Integration: call to 'Operation2'\n"
        );
        assert_eq!(
            verdict.operation_lines,
            "- Operation: calling API 'WriteLine'\n- Operation: expression 'x == 42'\n"
        );
    }

    #[test]
    fn test_clean_verdict_has_zero_metric() {
        let verdict = Verdict::from_classification(&result(&["Run"], &[], &[]));
        assert!(!verdict.is_violation);
        assert_eq!(verdict.metric, 0);
        assert_eq!(verdict.operation_lines, "");
    }
}
