use rustc_hash::FxHashMap;

/// Identifies a scope within one parsed tree. Assigned in build order; only
/// meaningful as a key into that tree's [`ParentIndex`].
pub type ScopeId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    Module,
    Class,
    Function,
}

/// A module, class, or function-like scope in the parsed tree.
///
/// The tree owns its nodes top-down; parent links are not stored here but
/// derived on demand into a [`ParentIndex`].
#[derive(Debug)]
pub struct ScopeNode {
    pub id: ScopeId,
    pub kind: ScopeKind,
    /// Absent only for the module scope.
    pub name: Option<String>,
    /// 1-based line of the `def`/`class` keyword; 1 for the module scope.
    /// Decorators above a definition are not part of the declaration line.
    pub line: usize,
    pub body: Vec<Statement>,
}

/// One statement in a scope's body, reduced to what fold computation needs.
#[derive(Debug)]
pub enum Statement {
    /// A class or function definition appearing directly in the body.
    Scope(ScopeNode),
    /// A bare string-literal expression statement. `line` is where the
    /// literal begins; `closing_line` is where its text ends, which is the
    /// line fold resolution anchors on.
    StringLiteral { line: usize, closing_line: usize },
    /// Any other statement. Definitions nested inside it (a method under an
    /// `if`, a function in a `try` arm) are collected into `nested` so the
    /// scope walk still discovers them.
    Other { line: usize, nested: Vec<ScopeNode> },
}

impl ScopeNode {
    /// Scopes directly enclosed by this one, wherever they sit in the body.
    pub fn child_scopes(&self) -> impl Iterator<Item = &ScopeNode> {
        self.body.iter().flat_map(|statement| {
            let scopes: &[ScopeNode] = match statement {
                Statement::Scope(scope) => std::slice::from_ref(scope),
                Statement::Other { nested, .. } => nested,
                Statement::StringLiteral { .. } => &[],
            };
            scopes.iter()
        })
    }

    /// Whether the first body statement is a bare string literal.
    pub fn has_docstring(&self) -> bool {
        matches!(self.body.first(), Some(Statement::StringLiteral { .. }))
    }

    /// The line this scope's docstring literal closes on, if it has one.
    pub fn docstring_closing_line(&self) -> Option<usize> {
        match self.body.first() {
            Some(Statement::StringLiteral { closing_line, .. }) => Some(*closing_line),
            _ => None,
        }
    }
}

/// A parsed buffer: the scope tree plus the line snapshot it was built from,
/// kept for textual delimiter inspection.
#[derive(Debug)]
pub struct ScopeTree {
    root: ScopeNode,
    lines: Vec<String>,
}

impl ScopeTree {
    pub(crate) fn new(root: ScopeNode, lines: Vec<String>) -> Self {
        ScopeTree { root, lines }
    }

    pub fn root(&self) -> &ScopeNode {
        &self.root
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Every scope in the tree, module included, in discovery order.
    pub fn scopes(&self) -> Scopes<'_> {
        Scopes { stack: vec![&self.root] }
    }

    /// Scopes whose first body statement is a bare string literal.
    pub fn docstring_scopes(&self) -> impl Iterator<Item = &ScopeNode> {
        self.scopes().filter(|scope| scope.has_docstring())
    }

    /// Build the child-to-parent lookup in a single pass over the tree.
    ///
    /// Derived lazily rather than stored in the nodes: callers that never
    /// compute identities never pay for it, and the tree keeps single-owner
    /// links only.
    pub fn parent_index(&self) -> ParentIndex<'_> {
        let mut parents = FxHashMap::default();
        let mut stack = vec![&self.root];
        while let Some(scope) = stack.pop() {
            for child in scope.child_scopes() {
                parents.insert(child.id, scope);
                stack.push(child);
            }
        }
        ParentIndex { parents }
    }
}

/// Depth-first scope iterator. Order is discovery order, not source order.
pub struct Scopes<'t> {
    stack: Vec<&'t ScopeNode>,
}

impl<'t> Iterator for Scopes<'t> {
    type Item = &'t ScopeNode;

    fn next(&mut self) -> Option<Self::Item> {
        let scope = self.stack.pop()?;
        self.stack.extend(scope.child_scopes());
        Some(scope)
    }
}

/// Non-owning child-to-parent lookup over one tree's scopes.
pub struct ParentIndex<'t> {
    parents: FxHashMap<ScopeId, &'t ScopeNode>,
}

impl<'t> ParentIndex<'t> {
    /// The scope immediately enclosing `id`; `None` for the module root.
    pub fn parent_of(&self, id: ScopeId) -> Option<&'t ScopeNode> {
        self.parents.get(&id).copied()
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use crate::parser::parse_source;

    #[test]
    fn walk_discovers_scopes_nested_in_compound_statements() {
        let tree = parse_source(indoc! {r#"
            import sys

            if sys.version_info >= (3, 8):
                def compat():
                    """New implementation."""
            else:
                def compat():
                    """Fallback."""
        "#})
        .unwrap();

        let names: Vec<_> = tree
            .scopes()
            .filter_map(|scope| scope.name.clone())
            .collect();
        assert_eq!(names.iter().filter(|n| *n == "compat").count(), 2);
    }

    #[test]
    fn parent_index_links_methods_to_their_class() {
        let tree = parse_source(indoc! {r#"
            class Widget:
                def draw(self):
                    """Render the widget."""
        "#})
        .unwrap();
        let parents = tree.parent_index();

        let draw = tree
            .scopes()
            .find(|scope| scope.name.as_deref() == Some("draw"))
            .unwrap();
        let parent = parents.parent_of(draw.id).unwrap();
        assert_eq!(parent.name.as_deref(), Some("Widget"));
        assert!(parents.parent_of(tree.root().id).is_none());
    }
}
