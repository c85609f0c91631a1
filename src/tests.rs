//! Whole-document `markdown -> html` tests, grouped by construct (core block
//! and inline constructs, then lists) so a failing case is easy to place.

use crate::{format_document, parse_document, Options};
use pretty_assertions::assert_eq;
use typed_arena::Arena;

mod core;
mod inlines;
mod lists;

/// Parses `md` with default options, renders it, and asserts the result
/// matches `expected`.
fn html(md: &str, expected: &str) {
    html_opts(md, expected, &Options::default());
}

/// As [`html`], but with caller-supplied [`Options`].
fn html_opts(md: &str, expected: &str, options: &Options) {
    let arena = Arena::new();
    let root = parse_document(&arena, md, options);
    let mut output = String::new();
    format_document(root, options, &mut output).unwrap();
    assert_eq!(output, expected);
}
