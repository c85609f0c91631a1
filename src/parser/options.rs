//! Configuration for the parser and HTML renderer.

/// Umbrella options struct, split into parse-time and render-time concerns.
#[derive(Default, Debug, Clone)]
pub struct Options {
    /// Configure parse-time behaviour.
    pub parse: Parse,

    /// Configure render-time behaviour.
    pub render: Render,
}

/// Parse-time options.
#[derive(Default, Debug, Clone)]
pub struct Parse {
    /// The default info string to use for fenced code blocks that don't
    /// specify one.
    ///
    /// ```rust
    /// # use flowdown::{parse_document, format_document, Options};
    /// # use typed_arena::Arena;
    /// let arena = Arena::new();
    /// let mut options = Options::default();
    /// options.parse.default_info_string = Some(String::from("rust"));
    /// let root = parse_document(&arena, "```\nfn main() {}\n```\n", &options);
    /// let mut html = String::new();
    /// format_document(root, &options, &mut html).unwrap();
    /// assert_eq!(
    ///     html,
    ///     "<pre><code class=\"language-rust\">fn main() {}\n</code></pre>\n"
    /// );
    /// ```
    pub default_info_string: Option<String>,
}

/// Render-time options.
#[derive(Default, Debug, Clone)]
pub struct Render {
    /// Render soft line breaks as hard line breaks (`<br />`).
    ///
    /// ```rust
    /// # use flowdown::{parse_document, format_document, Options};
    /// # use typed_arena::Arena;
    /// let arena = Arena::new();
    /// let mut options = Options::default();
    /// options.render.hardbreaks = true;
    /// let root = parse_document(&arena, "line one\nline two\n", &options);
    /// let mut html = String::new();
    /// format_document(root, &options, &mut html).unwrap();
    /// assert_eq!(
    ///     html,
    ///     "<p>line one<br />\nline two</p>\n"
    /// );
    /// ```
    pub hardbreaks: bool,
}
