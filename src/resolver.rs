use tracing::debug;

use crate::scope::{ScopeNode, ScopeTree};

/// Style A and style B triple-quote markers, in preference order.
const DELIMITERS: [&str; 2] = ["\"\"\"", "'''"];

/// The inclusive 1-based line span of one scope's docstring literal.
///
/// Derived per parse and never persisted; persistence goes through
/// [`crate::identity::ScopeIdentity`] instead, which survives line drift.
#[derive(Debug, Clone, Copy)]
pub struct DocstringRange<'t> {
    pub scope: &'t ScopeNode,
    pub start: usize,
    pub end: usize,
}

/// Resolve the docstring line span of every qualifying scope in the tree.
///
/// Scopes whose docstring cannot be resolved (non-triple-quote style, or no
/// opening delimiter between the closing line and the declaration line) are
/// omitted, never errors.
pub fn resolve_ranges(tree: &ScopeTree) -> Vec<DocstringRange<'_>> {
    tree.docstring_scopes()
        .filter_map(|scope| resolve_range(scope, tree.lines()))
        .collect()
}

/// Resolve one scope's docstring span against the buffer lines.
///
/// `end` is the line the docstring literal closes on. The line's text decides
/// the delimiter style; if the delimiter also opens on that line the span is a
/// single line, otherwise the opener is searched backward, stopping at the
/// scope's own declaration line so unrelated delimiters earlier in the file
/// are never matched.
pub fn resolve_range<'t>(scope: &'t ScopeNode, lines: &[String]) -> Option<DocstringRange<'t>> {
    let end = scope.docstring_closing_line()?;
    let closing = lines.get(end - 1)?;

    let delimiter = *DELIMITERS.iter().find(|d| closing.contains(**d)).or_else(|| {
        debug!(
            "scope {:?} at line {}: docstring is not triple-quoted, skipping",
            scope.name, scope.line
        );
        None
    })?;

    let start = if opens_and_closes(closing, delimiter) {
        end
    } else {
        match (scope.line..end).rev().find(|&candidate| lines[candidate - 1].contains(delimiter)) {
            Some(opener) => opener,
            None => {
                debug!(
                    "scope {:?} at line {}: no {} opener above line {}, skipping",
                    scope.name, scope.line, delimiter, end
                );
                return None;
            }
        }
    };

    Some(DocstringRange { scope, start, end })
}

/// Whether the delimiter appears twice on the line, i.e. the docstring opens
/// and closes there.
fn opens_and_closes(line: &str, delimiter: &str) -> bool {
    match line.find(delimiter) {
        Some(at) => line[at + delimiter.len()..].contains(delimiter),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::opens_and_closes;

    #[test]
    fn double_delimiter_on_one_line() {
        assert!(opens_and_closes(r#"    """One line doc.""""#, "\"\"\""));
        assert!(!opens_and_closes(r#"    """Opens only"#, "\"\"\""));
        assert!(!opens_and_closes("    plain text", "\"\"\""));
    }

    #[test]
    fn adjacent_delimiters_count_as_open_and_close() {
        // An empty docstring is six quote characters in a row.
        assert!(opens_and_closes(r#"    """""""#, "\"\"\""));
    }
}
