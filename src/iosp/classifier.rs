//! Partition of a method body into integrations, API operations and
//! computed expressions.

use super::exclusions::{type_base_name, ExclusionCategory, ExclusionTable};
use super::finder::{find_nodes, TraversalMode};
use super::ordered::OrderedSet;
use crate::core::{
    CancellationToken, Cancelled, NodeId, NodeKind, NodeRef, SymbolResolver, SyntaxTree,
    TargetDescriptor,
};
use serde::Serialize;
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscardReason {
    /// Same-named virtual member, usually the overridden base implementation
    BaseImplementation,
    Excluded(ExclusionCategory),
}

/// Outcome of classifying a single resolved call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallClass {
    Integration(String),
    Operation(String),
    Discard(DiscardReason),
}

/// Classify one call made from inside `enclosing_method`
pub fn classify_call(
    enclosing_method: &str,
    target: &TargetDescriptor,
    exclusions: &ExclusionTable,
) -> CallClass {
    let base_call = target.is_virtual && target.name == enclosing_method;

    if target.has_user_declaration {
        if base_call {
            return CallClass::Discard(DiscardReason::BaseImplementation);
        }
        return CallClass::Integration(target.name.clone());
    }

    if target.is_delegate_invoke && is_simple_delegate(target) {
        return CallClass::Integration(target.name.clone());
    }
    if let Some(rule) = exclusions.find_match(target) {
        return CallClass::Discard(DiscardReason::Excluded(rule.category));
    }
    if base_call {
        return CallClass::Discard(DiscardReason::BaseImplementation);
    }
    CallClass::Operation(target.name.clone())
}

/// `Action`, `Action<T>`, `Func<TResult>` or `Func<T, TResult>` from `System`
fn is_simple_delegate(target: &TargetDescriptor) -> bool {
    if target.containing_namespace != "System" {
        return false;
    }
    let arity = generic_arity(&target.containing_type);
    match type_base_name(&target.containing_type) {
        "Action" => arity <= 1,
        "Func" => (1..=2).contains(&arity),
        _ => false,
    }
}

/// Number of type arguments in `Name<A, B>` or `Name`2` notation
fn generic_arity(ty: &str) -> usize {
    if let Some((_, count)) = ty.split_once('`') {
        return count.trim().parse().unwrap_or(0);
    }
    let (Some(open), Some(close)) = (ty.find('<'), ty.rfind('>')) else {
        return 0;
    };
    if close <= open + 1 {
        return 0;
    }

    let mut depth = 0usize;
    let mut count = 1;
    for ch in ty[open + 1..close].chars() {
        match ch {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => count += 1,
            _ => {}
        }
    }
    count
}

/// Binary expression that is not the control clause of a `for` loop
pub fn is_computed_expression(node: NodeRef<'_>) -> bool {
    node.is(NodeKind::BinaryExpression) && !node.parent().is_some_and(|p| p.is(NodeKind::For))
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClassificationResult {
    pub integrations: OrderedSet,
    pub operations: OrderedSet,
    pub expressions: OrderedSet,
}

impl ClassificationResult {
    pub fn record(&mut self, class: CallClass) {
        match class {
            CallClass::Integration(name) => {
                self.integrations.insert(name);
            }
            CallClass::Operation(name) => {
                self.operations.insert(name);
            }
            CallClass::Discard(_) => {}
        }
    }
}

/// Classifies method bodies against an injected resolver
pub struct Classifier<'a, R: ?Sized> {
    resolver: &'a R,
    exclusions: &'a ExclusionTable,
}

impl<'a, R> Classifier<'a, R>
where
    R: SymbolResolver + ?Sized,
{
    pub fn new(resolver: &'a R, exclusions: &'a ExclusionTable) -> Self {
        Self {
            resolver,
            exclusions,
        }
    }

    pub fn classify(
        &self,
        tree: &SyntaxTree,
        body: NodeId,
        method_name: &str,
        cancel: &CancellationToken,
    ) -> Result<ClassificationResult, Cancelled> {
        let mut result = ClassificationResult::default();

        let calls = find_nodes(tree, body, TraversalMode::Exhaustive, |n| {
            n.is(NodeKind::Invocation)
        });
        for call in calls {
            cancel.check()?;
            let Some(target) = self.resolver.resolve(call) else {
                trace!(node = %call.id(), "Unresolved call ignored");
                continue;
            };
            let class = classify_call(method_name, &target, self.exclusions);
            trace!(node = %call.id(), target = %target.name, ?class, "Classified call");
            result.record(class);
        }

        let expressions = find_nodes(
            tree,
            body,
            TraversalMode::LevelStopping,
            is_computed_expression,
        );
        for expression in expressions {
            result.expressions.insert(expression.text());
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(method: &str, target: TargetDescriptor) -> CallClass {
        classify_call(method, &target, &ExclusionTable::defaults())
    }

    #[test]
    fn test_user_code_is_integration() {
        assert_eq!(
            classify("Run", TargetDescriptor::user("Operation1")),
            CallClass::Integration("Operation1".into())
        );
    }

    #[test]
    fn test_external_code_is_operation() {
        assert_eq!(
            classify("Run", TargetDescriptor::external("System", "Int32", "ToString")),
            CallClass::Operation("ToString".into())
        );
    }

    #[test]
    fn test_same_named_virtual_is_discarded_for_user_and_external_targets() {
        let user_base = TargetDescriptor::user("DoSomething").virtual_member();
        let external_base = TargetDescriptor::external("System", "Object", "ToString").virtual_member();

        assert_eq!(
            classify("DoSomething", user_base.clone()),
            CallClass::Discard(DiscardReason::BaseImplementation)
        );
        assert_eq!(
            classify("ToString", external_base),
            CallClass::Discard(DiscardReason::BaseImplementation)
        );
        // different enclosing method: an ordinary integration
        assert_eq!(
            classify("Other", user_base),
            CallClass::Integration("DoSomething".into())
        );
    }

    #[test]
    fn test_non_virtual_same_name_is_kept() {
        assert_eq!(
            classify("Run", TargetDescriptor::external("Lib", "Runner", "Run")),
            CallClass::Operation("Run".into())
        );
    }

    #[test]
    fn test_simple_delegates_count_as_integration() {
        for ty in ["Action", "Action<string>", "Func<int>", "Func<string, int>", "Func`2"] {
            let target = TargetDescriptor::external("System", ty, "Invoke").delegate_invoke();
            assert_eq!(
                classify("Run", target),
                CallClass::Integration("Invoke".into()),
                "{ty}"
            );
        }
    }

    #[test]
    fn test_wider_delegates_fall_through_to_operations() {
        for ty in ["Action<int, int>", "Func<int, int, int>", "Predicate<int>"] {
            let target = TargetDescriptor::external("System", ty, "Invoke").delegate_invoke();
            assert_eq!(classify("Run", target), CallClass::Operation("Invoke".into()), "{ty}");
        }
    }

    #[test]
    fn test_exclusions_report_category() {
        let run = TargetDescriptor::external("System.Threading.Tasks", "Task", "Run");
        assert_eq!(
            classify("Start", run),
            CallClass::Discard(DiscardReason::Excluded(ExclusionCategory::TaskScheduling))
        );
    }

    #[test]
    fn test_generic_arity() {
        assert_eq!(generic_arity("Action"), 0);
        assert_eq!(generic_arity("Action<>"), 0);
        assert_eq!(generic_arity("Func<int>"), 1);
        assert_eq!(generic_arity("Func<Dictionary<string, int>, bool>"), 2);
        assert_eq!(generic_arity("Func`3"), 3);
    }
}
