//! Owned syntax sketches that lower into the program model.
//!
//! A sketch is a small tree written in Rust that stands in for parsed
//! source. Calls carry the target a front end would have resolved, so one
//! sketch yields both the syntax tree and the resolver table.
//!
//! ```
//! use iosplint::testkit::sketch::*;
//!
//! // void Integration() { Operation(); var y = x == 42; }
//! let file = FileSketch::new("A.cs").method(method(
//!     "Integration",
//!     [call("Operation()").user(), local("var y = x == 42;", expr("x == 42"))],
//! ));
//! let unit = file.unit();
//! assert_eq!(unit.file.methods.len(), 1);
//! ```

use crate::core::{
    AnalysisUnit, MemberKind, MethodDeclaration, NodeId, NodeKind, SourceLocation,
    TableResolver, TargetDescriptor, TextSpan,
};
use crate::model::{FileModel, NodeModel, ResolvedCall};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sketch {
    kind: NodeKind,
    text: String,
    target: Option<TargetDescriptor>,
    children: Vec<Sketch>,
}

impl Sketch {
    pub fn new(kind: NodeKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            target: None,
            children: Vec::new(),
        }
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn with(mut self, child: Sketch) -> Self {
        self.children.push(child);
        self
    }

    /// Resolve this call to a method declared in the analyzed code
    pub fn user(self) -> Self {
        let name = callee_name(&self.text).to_string();
        self.resolves_to(TargetDescriptor::user(name))
    }

    /// Resolve this call to an external member
    pub fn external(self, namespace: &str, containing_type: &str) -> Self {
        let name = callee_name(&self.text).to_string();
        self.resolves_to(TargetDescriptor::external(namespace, containing_type, name))
    }

    /// Resolve this call to the `Invoke` of a delegate type such as `Func<int>`
    pub fn delegate(self, namespace: &str, delegate_type: &str) -> Self {
        self.resolves_to(
            TargetDescriptor::external(namespace, delegate_type, "Invoke").delegate_invoke(),
        )
    }

    /// Mark the resolved target as virtual
    pub fn virtual_member(mut self) -> Self {
        if let Some(target) = self.target.take() {
            self.target = Some(target.virtual_member());
        }
        self
    }

    pub fn resolves_to(mut self, target: TargetDescriptor) -> Self {
        self.target = Some(target);
        self
    }

    /// Append an argument to this call
    pub fn arg(mut self, argument: Sketch) -> Self {
        let position = self
            .children
            .iter()
            .position(|c| c.kind == NodeKind::ArgumentList);
        let wrapped = Sketch::new(NodeKind::Argument, argument.text.clone()).with(argument);
        match position {
            Some(index) => self.children[index].children.push(wrapped),
            None => self
                .children
                .push(Sketch::new(NodeKind::ArgumentList, "").with(wrapped)),
        }
        self
    }

    fn lower(
        &self,
        line: &mut usize,
        nodes: &mut Vec<NodeModel>,
        calls: &mut Vec<ResolvedCall>,
    ) -> NodeId {
        let id = NodeId(nodes.len() as u32);
        *line += 1;
        let start = *line;
        nodes.push(NodeModel {
            kind: self.kind,
            text: self.text.clone(),
            span: TextSpan::default(),
            children: Vec::new(),
        });
        if let Some(target) = &self.target {
            calls.push(ResolvedCall {
                node: id,
                target: target.clone(),
            });
        }

        let children: Vec<NodeId> = self
            .children
            .iter()
            .map(|child| child.lower(line, nodes, calls))
            .collect();

        let node = &mut nodes[id.index()];
        node.children = children;
        node.span = TextSpan::new(start, 1, *line, 1);
        id
    }
}

/// `Run()` -> `Run`, `this.x.Save(a)` -> `Save`, `Foo<int>()` -> `Foo`,
/// `Load(a).ConfigureAwait(false)` -> `ConfigureAwait`
fn callee_name(text: &str) -> &str {
    let head = argument_list_start(text).map_or(text, |start| &text[..start]);
    let head = head.split('<').next().unwrap_or(head);
    head.rsplit('.').next().unwrap_or(head).trim()
}

/// Byte offset of the `(` that opens the trailing argument list
fn argument_list_start(text: &str) -> Option<usize> {
    let text = text.trim_end();
    if !text.ends_with(')') {
        return None;
    }
    let mut depth = 0usize;
    for (index, ch) in text.char_indices().rev() {
        match ch {
            ')' => depth += 1,
            '(' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(index);
                }
            }
            _ => {}
        }
    }
    None
}

fn is_statement(kind: NodeKind) -> bool {
    use NodeKind::*;
    matches!(
        kind,
        Block
            | ExpressionStatement
            | LocalDeclaration
            | Return
            | Throw
            | If
            | For
            | ForEach
            | While
            | Do
            | Switch
            | Try
            | Using
            | LocalFunction
    )
}

fn as_statement(sketch: Sketch) -> Sketch {
    if is_statement(sketch.kind) {
        sketch
    } else {
        Sketch::new(NodeKind::ExpressionStatement, format!("{};", sketch.text)).with(sketch)
    }
}

/// Block of statements; bare expressions become expression statements
pub fn block(statements: impl IntoIterator<Item = Sketch>) -> Sketch {
    statements
        .into_iter()
        .fold(Sketch::new(NodeKind::Block, ""), |b, s| b.with(as_statement(s)))
}

pub fn call(text: &str) -> Sketch {
    Sketch::new(NodeKind::Invocation, text)
}

/// Binary expression given by its source text
pub fn expr(text: &str) -> Sketch {
    Sketch::new(NodeKind::BinaryExpression, text)
}

/// Binary expression built from operands, text is `lhs op rhs`
pub fn binary(lhs: Sketch, op: &str, rhs: Sketch) -> Sketch {
    let text = format!("{} {} {}", lhs.text, op, rhs.text);
    Sketch::new(NodeKind::BinaryExpression, text)
        .with(lhs)
        .with(rhs)
}

pub fn ident(name: &str) -> Sketch {
    Sketch::new(NodeKind::Identifier, name)
}

pub fn literal(value: &str) -> Sketch {
    Sketch::new(NodeKind::Literal, value)
}

pub fn local(text: &str, initializer: Sketch) -> Sketch {
    Sketch::new(NodeKind::LocalDeclaration, text).with(initializer)
}

pub fn ret(value: Sketch) -> Sketch {
    Sketch::new(NodeKind::Return, format!("return {};", value.text)).with(value)
}

pub fn throw(value: Sketch) -> Sketch {
    Sketch::new(NodeKind::Throw, format!("throw {};", value.text)).with(value)
}

pub fn if_(condition: Sketch, then: impl IntoIterator<Item = Sketch>) -> Sketch {
    Sketch::new(NodeKind::If, format!("if ({})", condition.text))
        .with(condition)
        .with(block(then))
}

/// `for (init; condition; step) { body }`; the parts are direct children
pub fn for_(
    init: Sketch,
    condition: Sketch,
    step: Sketch,
    body: impl IntoIterator<Item = Sketch>,
) -> Sketch {
    Sketch::new(NodeKind::For, format!("for (; {};)", condition.text))
        .with(init)
        .with(condition)
        .with(step)
        .with(block(body))
}

pub fn foreach(collection: Sketch, body: impl IntoIterator<Item = Sketch>) -> Sketch {
    Sketch::new(NodeKind::ForEach, format!("foreach (var item in {})", collection.text))
        .with(collection)
        .with(block(body))
}

pub fn try_catch(
    body: impl IntoIterator<Item = Sketch>,
    handler: impl IntoIterator<Item = Sketch>,
) -> Sketch {
    Sketch::new(NodeKind::Try, "try")
        .with(block(body))
        .with(Sketch::new(NodeKind::Catch, "catch").with(block(handler)))
}

/// Lambda with a block body
pub fn lambda(body: impl IntoIterator<Item = Sketch>) -> Sketch {
    Sketch::new(NodeKind::Lambda, "() => { ... }").with(block(body))
}

#[derive(Debug, Clone)]
pub struct MethodSketch {
    declaration: MethodDeclaration,
    body: Option<Sketch>,
    location: Option<TextSpan>,
}

pub fn method(name: &str, statements: impl IntoIterator<Item = Sketch>) -> MethodSketch {
    MethodSketch {
        declaration: MethodDeclaration::new(name),
        body: Some(block(statements)),
        location: None,
    }
}

/// Member without a block body (abstract or expression-bodied)
pub fn bodiless(name: &str) -> MethodSketch {
    MethodSketch {
        declaration: MethodDeclaration::new(name),
        body: None,
        location: None,
    }
}

impl MethodSketch {
    pub fn virtual_member(mut self) -> Self {
        self.declaration.is_virtual = true;
        self
    }

    pub fn member_kind(mut self, kind: MemberKind) -> Self {
        self.declaration.kind = kind;
        self
    }

    pub fn in_type(mut self, owning_type: &str) -> Self {
        self.declaration.owning_type = owning_type.to_string();
        self
    }

    /// Declaration site of the method name
    pub fn at(mut self, line: usize, column: usize) -> Self {
        let end = column + self.declaration.name.len();
        self.location = Some(TextSpan::new(line, column, line, end));
        self
    }
}

#[derive(Debug, Clone)]
pub struct FileSketch {
    path: PathBuf,
    generated: bool,
    methods: Vec<MethodSketch>,
}

impl FileSketch {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            generated: false,
            methods: Vec::new(),
        }
    }

    pub fn method(mut self, method: MethodSketch) -> Self {
        self.methods.push(method);
        self
    }

    pub fn generated(mut self) -> Self {
        self.generated = true;
        self
    }

    /// Lower into the JSON program model, one tree for all methods
    pub fn to_model(&self) -> FileModel {
        let mut nodes = Vec::new();
        let mut calls = Vec::new();
        let mut line = 0;
        let mut methods = Vec::new();

        for sketch in &self.methods {
            let mut declaration = sketch.declaration.clone();
            declaration.body = sketch
                .body
                .as_ref()
                .map(|body| body.lower(&mut line, &mut nodes, &mut calls));
            if let Some(span) = sketch.location {
                declaration.locations = vec![SourceLocation::new(&self.path, span)];
            }
            methods.push(declaration);
        }

        FileModel {
            path: self.path.clone(),
            generated: self.generated,
            nodes,
            methods,
            calls,
        }
    }

    /// Analysis unit for the sketch.
    ///
    /// # Panics
    ///
    /// Sketches always lower to a valid model; a failure here is a bug in
    /// the lowering.
    pub fn unit(&self) -> AnalysisUnit<TableResolver> {
        match self.to_model().load() {
            Ok(unit) => unit,
            Err(e) => panic!("sketch lowered to an invalid model: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_callee_name() {
        assert_eq!(callee_name("Run()"), "Run");
        assert_eq!(callee_name("this.logger.LogInformation(\"x\")"), "LogInformation");
        assert_eq!(callee_name("Create<int>()"), "Create");
        assert_eq!(callee_name("42.ToString()"), "ToString");
        assert_eq!(callee_name("Load(list).ConfigureAwait(false)"), "ConfigureAwait");
        assert_eq!(callee_name("Assert.That(sut.Add(1, 2), Is.EqualTo(3))"), "That");
    }

    #[test]
    fn test_binary_text_is_derived_from_operands() {
        let sum = binary(binary(ident("x"), "+", literal("1")), "==", literal("42"));
        assert_eq!(sum.text(), "x + 1 == 42");
    }

    #[test]
    fn test_lowering_is_pre_order_with_resolved_calls() {
        let file = FileSketch::new("A.cs").method(method(
            "M",
            [call("Run()").user(), call("x.ToString()").external("System", "Int32")],
        ));
        let model = file.to_model();

        let kinds: Vec<NodeKind> = model.nodes.iter().map(|n| n.kind).collect();
        assert_eq!(
            kinds,
            vec![
                NodeKind::Block,
                NodeKind::ExpressionStatement,
                NodeKind::Invocation,
                NodeKind::ExpressionStatement,
                NodeKind::Invocation,
            ]
        );
        assert_eq!(model.calls.len(), 2);
        assert_eq!(model.calls[0].node, NodeId(2));
        assert!(model.calls[0].target.has_user_declaration);
        assert_eq!(model.calls[1].target.name, "ToString");
        assert_eq!(model.methods[0].body, Some(NodeId(0)));
    }

    #[test]
    fn test_arguments_share_one_list() {
        let sketch = call("Log(a, b)").arg(ident("a")).arg(ident("b"));
        assert_eq!(sketch.children.len(), 1);
        assert_eq!(sketch.children[0].children.len(), 2);
    }

    #[test]
    fn test_unit_loads() {
        let unit = FileSketch::new("A.cs")
            .method(method("M", [call("Run()").user()]).at(3, 17))
            .method(bodiless("N"))
            .unit();
        assert_eq!(unit.file.methods.len(), 2);
        assert_eq!(unit.resolver.len(), 1);
        assert!(unit.file.methods[1].body.is_none());
    }
}
