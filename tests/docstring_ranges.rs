use indoc::indoc;

use docfold::parser::parse_source;
use docfold::resolver::resolve_ranges;

/// Helper: resolved (scope name, start, end) triples sorted by start line.
fn ranges(source: &str) -> Vec<(Option<String>, usize, usize)> {
    let tree = parse_source(source).unwrap();
    let mut out: Vec<_> = resolve_ranges(&tree)
        .into_iter()
        .map(|range| (range.scope.name.clone(), range.start, range.end))
        .collect();
    out.sort_by_key(|(_, start, _)| *start);
    out
}

#[test]
fn single_line_docstring_spans_one_line() {
    let resolved = ranges(indoc! {r#"
        def greet():
            """Say hello."""
            return "hello"
    "#});
    assert_eq!(resolved, vec![(Some("greet".to_string()), 2, 2)]);
}

#[test]
fn multi_line_docstring_spans_opener_to_closer() {
    let resolved = ranges(indoc! {r#"
        import os


        def report():
            """Collect figures.

            More detail.
            """
    "#});
    assert_eq!(resolved, vec![(Some("report".to_string()), 5, 8)]);
}

#[test]
fn scope_without_opener_above_closing_line_is_skipped() {
    // The closing line carries a """ (checked first) that never opened; the
    // actual literal is '''-quoted. The backward scan for """ hits the
    // declaration line without a match, so the scope is silently omitted.
    let source = indoc! {r#"
        def f():
            '''Opens quietly
        and closes with """ then '''
    "#};
    assert_eq!(ranges(source), vec![]);
}

#[test]
fn non_triple_quoted_docstring_is_skipped() {
    let resolved = ranges(indoc! {r#"
        def terse():
            'single quotes only'

        def documented():
            """Kept."""
    "#});
    assert_eq!(resolved, vec![(Some("documented".to_string()), 5, 5)]);
}

#[test]
fn module_docstring_opening_on_line_one_resolves() {
    let resolved = ranges(indoc! {r#"
        """Module summary.

        Details.
        """
    "#});
    assert_eq!(resolved, vec![(None, 1, 4)]);
}

#[test]
fn backward_scan_stops_at_scope_declaration() {
    // The module docstring's delimiters must not be mistaken for the opener
    // of a later, unresolvable docstring.
    let source = indoc! {r#"
        """Module doc."""


        def f():
            '''Opens here
        but closes on a line with """ and '''
    "#};
    let resolved = ranges(source);
    assert_eq!(resolved, vec![(None, 1, 1)]);
}

#[test]
fn class_method_and_module_all_resolve() {
    let resolved = ranges(indoc! {r#"
        """Top."""


        class Foo:
            """Class doc.

            Longer.
            """

            def bar(self):
                """Method doc."""
                return 1
    "#});
    assert_eq!(
        resolved,
        vec![
            (None, 1, 1),
            (Some("Foo".to_string()), 5, 8),
            (Some("bar".to_string()), 11, 11),
        ]
    );
}

#[test]
fn scope_without_docstring_yields_no_range() {
    let resolved = ranges(indoc! {r#"
        def quiet():
            return 1

        class Empty:
            pass
    "#});
    assert_eq!(resolved, vec![]);
}

#[test]
fn raw_string_docstring_resolves_textually() {
    let resolved = ranges(indoc! {r#"
        def pattern():
            r"""Matches \d+."""
    "#});
    assert_eq!(resolved, vec![(Some("pattern".to_string()), 2, 2)]);
}
