//! `flowdown` is a [CommonMark](https://spec.commonmark.org/)-conformant Markdown parser
//! and HTML renderer.
//!
//! Parsing happens in two phases. [`parse_document`] drives a line-oriented block parser
//! that builds a tree of container and leaf blocks (the [`nodes`] module), then runs an
//! inline parser over each leaf's accumulated text to recognise emphasis, links, code
//! spans, autolinks, raw HTML, entities and line breaks. The resulting tree is arena
//! allocated: every node lives in the [`typed_arena::Arena`] the caller supplies, and the
//! whole tree is freed at once when that arena is dropped.
//!
//! [`format_document`](html::format_document) walks the tree and serializes it as HTML
//! per the CommonMark spec's rendering rules.
//!
//! ```
//! use flowdown::{parse_document, Arena, Options};
//!
//! let arena = Arena::new();
//! let options = Options::default();
//! let root = parse_document(&arena, "Hello, *world*!\n", &options);
//!
//! let mut html = String::new();
//! flowdown::format_document(root, &options, &mut html).unwrap();
//! assert_eq!(html, "<p>Hello, <em>world</em>!</p>\n");
//! ```
//!
//! Markdown extensions beyond the core grammar (tables, strikethrough, footnotes, task
//! lists and the like) are out of scope; this crate implements exactly the CommonMark
//! spec, nothing more.

mod arena_tree;
mod autolink;
mod character_set;
mod ctype;
mod entity;
pub mod error;
pub mod html;
pub mod nodes;
pub mod parser;
mod scanners;
mod strings;

#[cfg(test)]
mod tests;

pub use error::ParseError;
pub use html::format_document;
pub use nodes::{AstNode, NodeValue};
pub use parser::{parse_bytes, parse_document, Options, Parse, Render};
pub use typed_arena::Arena;
