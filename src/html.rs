//! Renders a parsed document as HTML.

mod context;

use std::fmt::{self, Write};

use crate::character_set::character_set;
use crate::nodes::{
    AstNode, ListType, NodeCodeBlock, NodeHtmlBlock, NodeLink, NodeList, NodeValue,
};
use crate::parser::options::Options;

pub use context::Context;

/// Formats an AST as HTML, using the given options, into `output`.
///
/// This walks the tree iteratively rather than recursively, so that a
/// pathologically nested document (thousands of blockquotes deep, say)
/// cannot blow the stack.
pub fn format_document<'a>(
    root: &'a AstNode<'a>,
    options: &Options,
    output: &mut dyn Write,
) -> fmt::Result {
    let mut context = Context::new(output, options);

    enum Phase {
        Pre,
        Post,
    }

    let mut stack = vec![(root, Phase::Pre)];

    while let Some((node, phase)) = stack.pop() {
        match phase {
            Phase::Pre => {
                stack.push((node, Phase::Post));
                // Image alt text is flattened to plain text up front (see
                // `render_image`), so its label subtree is never walked.
                if render_node(&mut context, node, true)? == RecurseMarker::Recurse {
                    for ch in node.reverse_children() {
                        stack.push((ch, Phase::Pre));
                    }
                }
            }
            Phase::Post => {
                render_node(&mut context, node, false)?;
            }
        }
    }

    Ok(())
}

fn render_node<'a>(
    context: &mut Context,
    node: &'a AstNode<'a>,
    entering: bool,
) -> Result<RecurseMarker, fmt::Error> {
    use RecurseMarker::*;

    match node.data.borrow().value {
        NodeValue::Document => Ok(Recurse),
        NodeValue::BlockQuote => {
            if entering {
                context.cr()?;
                context.write_str("<blockquote>\n")?;
            } else {
                context.cr()?;
                context.write_str("</blockquote>\n")?;
            }
            Ok(Recurse)
        }
        NodeValue::List(ref nl) => {
            render_list(context, entering, nl)?;
            Ok(Recurse)
        }
        NodeValue::Item(_) => {
            if entering {
                context.cr()?;
                context.write_str("<li>")?;
            } else {
                context.write_str("</li>\n")?;
            }
            Ok(Recurse)
        }
        NodeValue::CodeBlock(ref ncb) => {
            if entering {
                render_code_block(context, ncb)?;
            }
            Ok(Recurse)
        }
        NodeValue::HtmlBlock(ref nhb) => {
            if entering {
                render_html_block(context, nhb)?;
            }
            Ok(Recurse)
        }
        NodeValue::Paragraph => {
            let tight = node
                .parent()
                .and_then(|n| n.parent())
                .is_some_and(|n| match n.data.borrow().value {
                    NodeValue::List(nl) => nl.tight,
                    _ => false,
                });
            if !tight {
                if entering {
                    context.cr()?;
                    context.write_str("<p>")?;
                } else {
                    context.write_str("</p>\n")?;
                }
            }
            Ok(Recurse)
        }
        NodeValue::Heading(ref nh) => {
            if entering {
                context.cr()?;
                write!(context, "<h{}>", nh.level)?;
            } else {
                writeln!(context, "</h{}>", nh.level)?;
            }
            Ok(Recurse)
        }
        NodeValue::ThematicBreak => {
            if entering {
                context.cr()?;
                context.write_str("<hr />\n")?;
            }
            Ok(Recurse)
        }
        NodeValue::Text(ref literal) => {
            if entering {
                context.escape(literal)?;
            }
            Ok(Recurse)
        }
        NodeValue::SoftBreak => {
            if entering {
                if context.options.render.hardbreaks {
                    context.write_str("<br />\n")?;
                } else {
                    context.write_str("\n")?;
                }
            }
            Ok(Recurse)
        }
        NodeValue::LineBreak => {
            if entering {
                context.write_str("<br />\n")?;
            }
            Ok(Recurse)
        }
        NodeValue::Code(ref literal) => {
            if entering {
                context.write_str("<code>")?;
                context.escape(literal)?;
                context.write_str("</code>")?;
            }
            Ok(Recurse)
        }
        NodeValue::HtmlInline(ref literal) => {
            if entering {
                context.write_str(literal)?;
            }
            Ok(Recurse)
        }
        NodeValue::Emph => {
            context.write_str(if entering { "<em>" } else { "</em>" })?;
            Ok(Recurse)
        }
        NodeValue::Strong => {
            context.write_str(if entering { "<strong>" } else { "</strong>" })?;
            Ok(Recurse)
        }
        NodeValue::Link(ref nl) => {
            render_link(context, entering, nl)?;
            Ok(Recurse)
        }
        NodeValue::Image(ref nl) => {
            if entering {
                render_image(context, node, nl)?;
            }
            Ok(Skip)
        }
        #[allow(unreachable_patterns)]
        ref other => {
            log::warn!("no HTML rendering defined for node {other:?}; skipping");
            Ok(Recurse)
        }
    }
}

#[derive(Clone, Copy, PartialEq)]
enum RecurseMarker {
    Recurse,
    Skip,
}

fn render_list(context: &mut Context, entering: bool, nl: &NodeList) -> fmt::Result {
    if entering {
        context.cr()?;
        match nl.list_type {
            ListType::Bullet => context.write_str("<ul>\n")?,
            ListType::Ordered if nl.start == 1 => context.write_str("<ol>\n")?,
            ListType::Ordered => writeln!(context, "<ol start=\"{}\">", nl.start)?,
        }
    } else {
        match nl.list_type {
            ListType::Bullet => context.write_str("</ul>\n")?,
            ListType::Ordered => context.write_str("</ol>\n")?,
        }
    }
    Ok(())
}

fn render_code_block(context: &mut Context, ncb: &NodeCodeBlock) -> fmt::Result {
    context.cr()?;

    let info = &ncb.info;
    let first_tag = info.find(char::is_whitespace).unwrap_or(info.len());
    let lang = &info[..first_tag];

    context.write_str("<pre><code")?;
    if !lang.is_empty() {
        context.write_str(" class=\"language-")?;
        context.escape(lang)?;
        context.write_str("\"")?;
    }
    context.write_str(">")?;
    context.escape(&ncb.literal)?;
    context.write_str("</code></pre>\n")?;

    Ok(())
}

fn render_html_block(context: &mut Context, nhb: &NodeHtmlBlock) -> fmt::Result {
    context.cr()?;
    context.write_str(&nhb.literal)?;
    context.cr()?;
    Ok(())
}

fn render_link(context: &mut Context, entering: bool, nl: &NodeLink) -> fmt::Result {
    if entering {
        context.write_str("<a href=\"")?;
        context.escape_href(&nl.url)?;
        if !nl.title.is_empty() {
            context.write_str("\" title=\"")?;
            context.escape(&nl.title)?;
        }
        context.write_str("\">")?;
    } else {
        context.write_str("</a>")?;
    }
    Ok(())
}

fn render_image<'a>(context: &mut Context, node: &'a AstNode<'a>, nl: &NodeLink) -> fmt::Result {
    context.write_str("<img src=\"")?;
    context.escape_href(&nl.url)?;
    context.write_str("\" alt=\"")?;
    context.escape(&collect_text(node))?;
    context.write_str("\"")?;
    if !nl.title.is_empty() {
        context.write_str(" title=\"")?;
        context.escape(&nl.title)?;
        context.write_str("\"")?;
    }
    context.write_str(" />")?;
    Ok(())
}

/// Recurses through a node's children in document order, returning the
/// concatenated literal contents of any text and code spans. Line breaks
/// are represented as a single space. Used for an image's `alt` attribute,
/// which flattens its label to plain text.
fn collect_text<'a>(node: &'a AstNode<'a>) -> String {
    let mut text = String::new();
    collect_text_append(node, &mut text);
    text
}

fn collect_text_append<'a>(node: &'a AstNode<'a>, output: &mut String) {
    match node.data.borrow().value {
        NodeValue::Text(ref literal) | NodeValue::Code(ref literal) => output.push_str(literal),
        NodeValue::LineBreak | NodeValue::SoftBreak => output.push(' '),
        _ => {
            for ch in node.children() {
                collect_text_append(ch, output);
            }
        }
    }
}

/// Writes `buffer` to `output`, escaping anything that could be interpreted
/// as an HTML tag.
///
/// Namely:
///
/// * U+0022 QUOTATION MARK " is rendered as &quot;
/// * U+0026 AMPERSAND & is rendered as &amp;
/// * U+003C LESS-THAN SIGN < is rendered as &lt;
/// * U+003E GREATER-THAN SIGN > is rendered as &gt;
/// * Everything else is passed through unchanged.
///
/// This is appropriate and sufficient for free text, but not for URLs in
/// attributes; see [`escape_href`].
pub fn escape(output: &mut dyn Write, buffer: &str) -> fmt::Result {
    let bytes = buffer.as_bytes();
    let matcher = jetscii::bytes!(b'"', b'&', b'<', b'>');

    let mut offset = 0;
    while let Some(i) = matcher.find(&bytes[offset..]) {
        let esc: &str = match bytes[offset + i] {
            b'"' => "&quot;",
            b'&' => "&amp;",
            b'<' => "&lt;",
            b'>' => "&gt;",
            _ => unreachable!(),
        };
        output.write_str(&buffer[offset..offset + i])?;
        output.write_str(esc)?;
        offset += i + 1;
    }
    output.write_str(&buffer[offset..])?;
    Ok(())
}

/// Writes `buffer` to `output`, escaping in a manner appropriate for URLs in
/// HTML attributes.
///
/// Namely:
///
/// * U+0026 AMPERSAND & is rendered as &amp;
/// * U+0027 APOSTROPHE ' is rendered as &#x27;
/// * Alphanumerics and a range of non-URL-safe characters are passed through
///   unescaped.
/// * Everything else is percent-encoded.
///
/// The inclusion of characters like "%" among those which are not escaped is
/// explained somewhat here:
///
/// <https://github.com/github/cmark-gfm/blob/c32ef78bae851cb83b7ad52d0fbff880acdcd44a/src/houdini_href_e.c#L7-L31>
///
/// In other words, if a CommonMark user enters:
///
/// ```markdown
/// [hi](https://ddg.gg/?q=a%20b)
/// ```
///
/// We assume they actually want the query string "?q=a%20b", a search for
/// the string "a b", rather than "?q=a%2520b", a search for the literal
/// string "a%20b".
pub fn escape_href(output: &mut dyn Write, buffer: &str) -> fmt::Result {
    const HREF_SAFE: [bool; 256] = character_set!(
        b"-_.+!*(),%#@?=;:/,+$~",
        b"abcdefghijklmnopqrstuvwxyz",
        b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789"
    );

    let bytes = buffer.as_bytes();
    let size = buffer.len();
    let mut i = 0;

    while i < size {
        let org = i;
        while i < size && HREF_SAFE[bytes[i] as usize] {
            i += 1;
        }

        if i > org {
            output.write_str(&buffer[org..i])?;
        }

        if i >= size {
            break;
        }

        match bytes[i] {
            b'&' => output.write_str("&amp;")?,
            b'\'' => output.write_str("&#x27;")?,
            _ => write!(output, "%{:02X}", bytes[i])?,
        }

        i += 1;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_document;
    use typed_arena::Arena;

    fn render(md: &str) -> String {
        let arena = Arena::new();
        let options = Options::default();
        let root = parse_document(&arena, md, &options);
        let mut out = String::new();
        format_document(root, &options, &mut out).unwrap();
        out
    }

    #[test]
    fn renders_paragraph_and_emphasis() {
        assert_eq!(render("Hello *world*.\n"), "<p>Hello <em>world</em>.</p>\n");
    }

    #[test]
    fn renders_tight_list_without_wrapping_p_tags() {
        assert_eq!(
            render("- one\n- two\n"),
            "<ul>\n<li>one</li>\n<li>two</li>\n</ul>\n"
        );
    }

    #[test]
    fn renders_loose_list_with_p_tags() {
        assert_eq!(
            render("- one\n\n- two\n"),
            "<ul>\n<li>\n<p>one</p>\n</li>\n<li>\n<p>two</p>\n</li>\n</ul>\n"
        );
    }

    #[test]
    fn escapes_attribute_and_text_content() {
        assert_eq!(
            render("[a](<b&c> \"t\\\"le\")\n"),
            "<p><a href=\"b&amp;c\" title=\"t&quot;le\">a</a></p>\n"
        );
    }

    #[test]
    fn image_alt_text_is_flattened_plain_text() {
        assert_eq!(
            render("![a *b* c](/img.png)\n"),
            "<p><img src=\"/img.png\" alt=\"a b c\" /></p>\n"
        );
    }

    #[test]
    fn fenced_code_block_gets_language_class() {
        assert_eq!(
            render("```rust\nfn main() {}\n```\n"),
            "<pre><code class=\"language-rust\">fn main() {}\n</code></pre>\n"
        );
    }

    #[test]
    fn html_block_passes_through_unescaped() {
        assert_eq!(render("<div>\n  hi\n</div>\n"), "<div>\n  hi\n</div>\n");
    }
}
