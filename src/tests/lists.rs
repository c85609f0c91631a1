use super::*;

#[test]
fn tight_bullet_list() {
    html(
        "- one\n- two\n",
        "<ul>\n<li>one</li>\n<li>two</li>\n</ul>\n",
    );
}

#[test]
fn loose_bullet_list_gets_wrapped_paragraphs() {
    html(
        "- one\n\n- two\n",
        concat!(
            "<ul>\n",
            "<li>\n<p>one</p>\n</li>\n",
            "<li>\n<p>two</p>\n</li>\n",
            "</ul>\n",
        ),
    );
}

#[test]
fn ordered_list_start_number() {
    html(
        "2. Hello.\n3. Hi.\n",
        concat!(
            "<ol start=\"2\">\n",
            "<li>Hello.</li>\n",
            "<li>Hi.</li>\n",
            "</ol>\n",
        ),
    );
}

#[test]
fn ordered_list_starting_at_one_omits_start_attribute() {
    html(
        "1. Hello.\n2. Hi.\n",
        "<ol>\n<li>Hello.</li>\n<li>Hi.</li>\n</ol>\n",
    );
}

#[test]
fn different_bullet_characters_start_separate_lists() {
    html(
        "- a\n* b\n",
        "<ul>\n<li>a</li>\n</ul>\n<ul>\n<li>b</li>\n</ul>\n",
    );
}

#[test]
fn nested_list_inside_item() {
    html(
        "- a\n  - b\n",
        concat!(
            "<ul>\n",
            "<li>a\n<ul>\n<li>b</li>\n</ul>\n</li>\n",
            "</ul>\n",
        ),
    );
}

#[test]
fn list_item_with_multiple_paragraphs_is_loose() {
    html(
        "- one\n\n  still one\n- two\n",
        concat!(
            "<ul>\n",
            "<li>\n<p>one</p>\n<p>still one</p>\n</li>\n",
            "<li>\n<p>two</p>\n</li>\n",
            "</ul>\n",
        ),
    );
}

#[test]
fn blank_line_between_list_and_following_paragraph() {
    html(
        "- a\n\npara\n",
        "<ul>\n<li>a</li>\n</ul>\n<p>para</p>\n",
    );
}
