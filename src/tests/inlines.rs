use super::*;

#[test]
fn nested_emphasis_and_strong() {
    html(
        "*a **b** c*\n",
        "<p><em>a <strong>b</strong> c</em></p>\n",
    );
}

#[test]
fn underscore_emphasis_respects_intraword_restriction() {
    html("foo_bar_baz\n", "<p>foo_bar_baz</p>\n");
    html("_foo_bar_\n", "<p><em>foo_bar</em></p>\n");
}

#[test]
fn underscore_next_to_punctuation_is_not_intraword() {
    html("foo-_(bar)_\n", "<p>foo-<em>(bar)</em></p>\n");
}

#[test]
fn code_span_strips_and_collapses_surrounding_space() {
    html("` ``code`` `\n", "<p><code>``code``</code></p>\n");
}

#[test]
fn code_span_with_backtick_inside_uses_longer_fence() {
    html("``foo ` bar``\n", "<p><code>foo ` bar</code></p>\n");
}

#[test]
fn unmatched_emphasis_delimiter_is_literal() {
    html("*foo\n", "<p>*foo</p>\n");
}

#[test]
fn image_with_title() {
    html(
        "![alt](/i.png \"t\")\n",
        "<p><img src=\"/i.png\" alt=\"alt\" title=\"t\" /></p>\n",
    );
}

#[test]
fn link_title_and_href_are_escaped() {
    html(
        "[a](<b&c> \"t\\\"le\")\n",
        "<p><a href=\"b&amp;c\" title=\"t&quot;le\">a</a></p>\n",
    );
}

#[test]
fn autolink_email_gets_mailto_scheme() {
    html(
        "<foo@bar.com>\n",
        "<p><a href=\"mailto:foo@bar.com\">foo@bar.com</a></p>\n",
    );
}

#[test]
fn literal_angle_brackets_without_valid_autolink_stay_as_raw_html() {
    html("<not a tag\n", "<p>&lt;not a tag</p>\n");
}

#[test]
fn numeric_character_reference() {
    html("&#65;\n", "<p>A</p>\n");
}

#[test]
fn backslash_newline_is_a_hardbreak() {
    html("line one\\\nline two\n", "<p>line one<br />\nline two</p>\n");
}

#[test]
fn escaped_punctuation_loses_its_special_meaning() {
    html("\\[not a link\\]\n", "<p>[not a link]</p>\n");
}

#[test]
fn link_containing_emphasis() {
    html(
        "[*a*](/x)\n",
        "<p><a href=\"/x\"><em>a</em></a></p>\n",
    );
}
