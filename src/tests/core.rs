use super::*;

#[test]
fn basic_document() {
    html(
        concat!(
            "My **document**.\n",
            "\n",
            "It's mine.\n",
            "\n",
            "> Yes.\n",
            "\n",
            "## Hi!\n",
            "\n",
            "Okay.\n"
        ),
        concat!(
            "<p>My <strong>document</strong>.</p>\n",
            "<p>It's mine.</p>\n",
            "<blockquote>\n",
            "<p>Yes.</p>\n",
            "</blockquote>\n",
            "<h2>Hi!</h2>\n",
            "<p>Okay.</p>\n"
        ),
    );
}

#[test]
fn scenario_emph() {
    html("*foo*\n", "<p><em>foo</em></p>\n");
}

#[test]
fn scenario_strong() {
    html("**foo**\n", "<p><strong>foo</strong></p>\n");
}

#[test]
fn scenario_emph_of_strong() {
    html("***foo***\n", "<p><em><strong>foo</strong></em></p>\n");
}

#[test]
fn scenario_code_span() {
    html("`foo`\n", "<p><code>foo</code></p>\n");
}

#[test]
fn scenario_inline_link() {
    html(
        "[foo](bar \"baz\")\n",
        "<p><a href=\"bar\" title=\"baz\">foo</a></p>\n",
    );
}

#[test]
fn scenario_bullet_list() {
    html(
        "- a\n- b\n",
        "<ul>\n<li>a</li>\n<li>b</li>\n</ul>\n",
    );
}

#[test]
fn scenario_block_quote_continuation_and_lazy_paragraph() {
    html(
        "> quoted\n> still\n\npara\n",
        concat!(
            "<blockquote>\n",
            "<p>quoted\nstill</p>\n",
            "</blockquote>\n",
            "<p>para</p>\n",
        ),
    );
}

#[test]
fn scenario_fenced_code_with_info_string() {
    html(
        "```lang\ncode\n```\n",
        "<pre><code class=\"language-lang\">code\n</code></pre>\n",
    );
}

#[test]
fn scenario_reference_link_defined_before_use() {
    html(
        "[a]: /x \"t\"\n\n[a]\n",
        "<p><a href=\"/x\" title=\"t\">a</a></p>\n",
    );
}

#[test]
fn reference_link_defined_after_use() {
    html(
        "[a]\n\n[a]: /x \"t\"\n",
        "<p><a href=\"/x\" title=\"t\">a</a></p>\n",
    );
}

#[test]
fn unknown_reference_falls_back_to_literal_brackets() {
    html("[a]\n", "<p>[a]</p>\n");
}

#[test]
fn atx_heading_levels() {
    html("# one\n", "<h1>one</h1>\n");
    html("###### six\n", "<h6>six</h6>\n");
}

#[test]
fn atx_heading_interrupts_paragraph() {
    html(
        "para\n# heading\n",
        "<p>para</p>\n<h1>heading</h1>\n",
    );
}

#[test]
fn setext_heading_levels() {
    html(
        "Title\n=====\n\nSubtitle\n--------\n",
        "<h1>Title</h1>\n<h2>Subtitle</h2>\n",
    );
}

#[test]
fn thematic_break() {
    html("---\n", "<hr />\n");
    html("***\n", "<hr />\n");
}

#[test]
fn indented_code_block() {
    html("    four spaces\n", "<pre><code>four spaces\n</code></pre>\n");
}

#[test]
fn nested_block_quotes() {
    html(
        "> > nested\n",
        concat!(
            "<blockquote>\n",
            "<blockquote>\n",
            "<p>nested</p>\n",
            "</blockquote>\n",
            "</blockquote>\n",
        ),
    );
}

#[test]
fn html_block_passthrough_is_not_parsed_as_markdown() {
    html(
        "<div>\n*not emphasis*\n</div>\n",
        "<div>\n*not emphasis*\n</div>\n",
    );
}

#[test]
fn backslash_escape() {
    html("\\*not emphasis\\*\n", "<p>*not emphasis*</p>\n");
}

#[test]
fn entity_reference() {
    html("&amp; &copy;\n", "<p>&amp; \u{a9}</p>\n");
}

#[test]
fn autolink_uri() {
    html(
        "<https://example.com>\n",
        "<p><a href=\"https://example.com\">https://example.com</a></p>\n",
    );
}

#[test]
fn raw_html_inline_passthrough() {
    html("hi <span>there</span>\n", "<p>hi <span>there</span></p>\n");
}

#[test]
fn hardbreak_via_two_trailing_spaces() {
    html("line one  \nline two\n", "<p>line one<br />\nline two</p>\n");
}

#[test]
fn softbreak_renders_as_newline() {
    html("line one\nline two\n", "<p>line one\nline two</p>\n");
}

#[test]
fn hardbreaks_option_forces_every_soft_break() {
    use crate::parser::{Options, Render};

    let options = Options {
        render: Render { hardbreaks: true },
        ..Options::default()
    };
    html_opts(
        "line one\nline two\n",
        "<p>line one<br />\nline two</p>\n",
        &options,
    );
}

#[test]
fn default_info_string_applies_to_bare_fences() {
    use crate::parser::{Options, Parse};

    let options = Options {
        parse: Parse {
            default_info_string: Some("rust".to_string()),
        },
        ..Options::default()
    };
    html_opts(
        "```\nfn main() {}\n```\n",
        "<pre><code class=\"language-rust\">fn main() {}\n</code></pre>\n",
        &options,
    );
}
