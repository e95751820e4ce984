use tracing::trace;
use tree_sitter::{Node as TsNode, Parser as TsParser};

use crate::error::FoldError;
use crate::scope::{ScopeId, ScopeKind, ScopeNode, ScopeTree, Statement};

/// Parse a buffer snapshot, one string per line, into a scope tree.
///
/// This is the entry point the fold-state bridge uses: hosts hand over their
/// buffer as a line sequence.
pub fn parse_lines(lines: &[String]) -> Result<ScopeTree, FoldError> {
    let source = lines.join("\n");
    build_tree(&source, lines.to_vec())
}

/// Parse full source text into a scope tree.
pub fn parse_source(source: &str) -> Result<ScopeTree, FoldError> {
    let lines = source.lines().map(str::to_owned).collect();
    build_tree(source, lines)
}

fn build_tree(source: &str, lines: Vec<String>) -> Result<ScopeTree, FoldError> {
    let mut parser = TsParser::new();
    parser
        .set_language(&tree_sitter_python::LANGUAGE.into())
        .expect("Failed to set Tree-Sitter language");

    let tree = parser
        .parse(source, None)
        .ok_or(FoldError::Parse { line: 1 })?;
    let root = tree.root_node();
    if root.has_error() {
        return Err(FoldError::Parse { line: first_error_line(root) });
    }

    trace!("parsed {} lines into scope tree", lines.len());
    let mut builder = Builder { source: source.as_bytes(), next_id: 0 };
    let module = ScopeNode {
        id: builder.fresh_id(),
        kind: ScopeKind::Module,
        name: None,
        line: 1,
        body: builder.block(root),
    };
    Ok(ScopeTree::new(module, lines))
}

/// 1-based line of the first error or missing node under `root`.
fn first_error_line(root: TsNode) -> usize {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.is_error() || node.is_missing() {
            return node.start_position().row + 1;
        }
        let mut cursor = node.walk();
        // Push in reverse so the leftmost subtree is inspected first.
        let children: Vec<_> = node.children(&mut cursor).filter(|c| c.has_error()).collect();
        stack.extend(children.into_iter().rev());
    }
    1
}

struct Builder<'s> {
    source: &'s [u8],
    next_id: ScopeId,
}

impl Builder<'_> {
    fn fresh_id(&mut self) -> ScopeId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Statements of a module root or a `block` node, comments excluded.
    fn block(&mut self, node: TsNode) -> Vec<Statement> {
        let mut cursor = node.walk();
        let children: Vec<_> = node
            .named_children(&mut cursor)
            .filter(|child| !child.is_extra())
            .collect();
        children.into_iter().map(|child| self.statement(child)).collect()
    }

    fn statement(&mut self, node: TsNode) -> Statement {
        match node.kind() {
            "function_definition" => Statement::Scope(self.scope(node, ScopeKind::Function)),
            "class_definition" => Statement::Scope(self.scope(node, ScopeKind::Class)),
            "decorated_definition" => match node.child_by_field_name("definition") {
                Some(definition) => self.statement(definition),
                None => self.other(node),
            },
            "expression_statement" if is_bare_string(node) => Statement::StringLiteral {
                line: node.start_position().row + 1,
                closing_line: node.end_position().row + 1,
            },
            _ => self.other(node),
        }
    }

    fn scope(&mut self, node: TsNode, kind: ScopeKind) -> ScopeNode {
        let id = self.fresh_id();
        let name = node
            .child_by_field_name("name")
            .and_then(|n| n.utf8_text(self.source).ok())
            .map(str::to_owned);
        let body = match node.child_by_field_name("body") {
            Some(block) => self.block(block),
            None => Vec::new(),
        };
        ScopeNode { id, kind, name, line: node.start_position().row + 1, body }
    }

    fn other(&mut self, node: TsNode) -> Statement {
        let mut nested = Vec::new();
        self.collect_nested(node, &mut nested);
        Statement::Other { line: node.start_position().row + 1, nested }
    }

    /// Definitions buried inside a compound statement (an `if` arm, a `try`
    /// handler, a loop body). Descent stops at each definition found; its own
    /// nested scopes live in its body.
    fn collect_nested(&mut self, node: TsNode, out: &mut Vec<ScopeNode>) {
        let mut cursor = node.walk();
        let children: Vec<_> = node.children(&mut cursor).collect();
        for child in children {
            match child.kind() {
                "function_definition" => out.push(self.scope(child, ScopeKind::Function)),
                "class_definition" => out.push(self.scope(child, ScopeKind::Class)),
                _ => self.collect_nested(child, out),
            }
        }
    }
}

/// A standalone string expression, as opposed to a string used as a value
/// inside an assignment, call, or larger expression.
fn is_bare_string(node: TsNode) -> bool {
    node.named_child_count() == 1
        && node.named_child(0).map(|child| child.kind()) == Some("string")
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use super::parse_source;
    use crate::error::FoldError;
    use crate::scope::{ScopeKind, Statement};

    #[test]
    fn module_scope_starts_at_line_one() {
        let tree = parse_source("\"\"\"Module doc.\"\"\"\n").unwrap();
        assert_eq!(tree.root().kind, ScopeKind::Module);
        assert_eq!(tree.root().line, 1);
        assert!(tree.root().name.is_none());
        assert!(tree.root().has_docstring());
    }

    #[test]
    fn assignment_of_string_is_not_a_docstring() {
        let tree = parse_source(indoc! {r#"
            def f():
                x = """not a docstring"""
        "#})
        .unwrap();
        let f = tree.scopes().find(|s| s.name.as_deref() == Some("f")).unwrap();
        assert!(!f.has_docstring());
    }

    #[test]
    fn decorated_definition_keeps_its_def_line() {
        let tree = parse_source(indoc! {r#"
            @decorator
            @another
            def f():
                """Doc."""
        "#})
        .unwrap();
        let f = tree.scopes().find(|s| s.name.as_deref() == Some("f")).unwrap();
        assert_eq!(f.line, 3);
        assert_eq!(f.kind, ScopeKind::Function);
        assert!(f.has_docstring());
    }

    #[test]
    fn multi_line_literal_records_opening_and_closing_lines() {
        let tree = parse_source(indoc! {r#"
            def f():
                """Opens here.

                Closes below.
                """
        "#})
        .unwrap();
        let f = tree.scopes().find(|s| s.name.as_deref() == Some("f")).unwrap();
        match f.body.first() {
            Some(Statement::StringLiteral { line, closing_line }) => {
                assert_eq!(*line, 2);
                assert_eq!(*closing_line, 5);
            }
            other => panic!("expected a string literal first statement, got {other:?}"),
        }
    }

    #[test]
    fn comment_before_docstring_does_not_hide_it() {
        let tree = parse_source(indoc! {r#"
            def f():
                # implementation note
                """Doc."""
        "#})
        .unwrap();
        let f = tree.scopes().find(|s| s.name.as_deref() == Some("f")).unwrap();
        assert!(f.has_docstring());
    }

    #[test]
    fn malformed_source_is_a_parse_error() {
        let err = parse_source("def broken(:\n    pass\n").unwrap_err();
        assert!(matches!(err, FoldError::Parse { .. }));
    }

    #[test]
    fn async_function_is_a_function_scope() {
        let tree = parse_source(indoc! {r#"
            async def fetch():
                """Fetch things."""
        "#})
        .unwrap();
        let fetch = tree.scopes().find(|s| s.name.as_deref() == Some("fetch")).unwrap();
        assert_eq!(fetch.kind, ScopeKind::Function);
        assert!(fetch.has_docstring());
    }
}
