//! Error types returned by the public API.
//!
//! CommonMark's grammar is total: every `&str` (already guaranteed valid
//! UTF-8 by the type itself) produces *some* tree, and malformed
//! constructs degrade to literal text rather than failing. `parse_document`
//! is accordingly infallible. The only failure mode left to model is a
//! programmer error in the block parser's own bookkeeping, never
//! something a caller can trigger by feeding it unusual input.

/// Errors that can occur while building a document's AST.
///
/// Rendering has no error type of its own: [`crate::format_document`] writes
/// into a `std::fmt::Write` sink and returns `std::fmt::Result` directly.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// A line was added to a block that has already been closed and
    /// finalized. This indicates a bug in the parser's block-matching
    /// logic, not a malformed input document.
    #[error("attempted to add a line to a closed block (line {line})")]
    ClosedBlock {
        /// The 1-based input line number being processed when the error
        /// was detected.
        line: usize,
    },

    /// [`crate::parse_bytes`] was given a byte slice that isn't valid UTF-8.
    #[error("input is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
}
