use crate::html;
use crate::Options;

use std::cell::Cell;
use std::fmt::{self, Write};

/// Context struct given to the rendering walk in [`html::format_document`].
/// Output can be appended to through this struct's [`Write`] interface.
pub struct Context<'o> {
    output: &'o mut dyn Write,
    last_was_lf: Cell<bool>,

    /// [`Options`] in use in this render.
    pub options: &'o Options,
}

impl<'o> Context<'o> {
    pub(super) fn new(output: &'o mut dyn Write, options: &'o Options) -> Self {
        Context {
            output,
            last_was_lf: Cell::new(true),
            options,
        }
    }

    /// If the last byte written was **not** a U+000A LINE FEED, writes one.
    /// Otherwise, does nothing. (In other words, ensures the output is at a
    /// new line.)
    pub fn cr(&mut self) -> fmt::Result {
        if !self.last_was_lf.get() {
            self.write_str("\n")?;
        }
        Ok(())
    }

    /// Convenience wrapper for [`html::escape`].
    pub fn escape(&mut self, buffer: &str) -> fmt::Result {
        html::escape(self, buffer)
    }

    /// Convenience wrapper for [`html::escape_href`].
    pub fn escape_href(&mut self, buffer: &str) -> fmt::Result {
        html::escape_href(self, buffer)
    }
}

impl<'o> Write for Context<'o> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let l = s.len();
        if l > 0 {
            self.last_was_lf.set(s.as_bytes()[l - 1] == b'\n');
        }
        self.output.write_str(s)
    }
}

impl<'o> fmt::Debug for Context<'o> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        formatter.write_str("<Context>")
    }
}
