//! Hand-written byte scanners for the constructs the block and inline
//! parsers need to recognize at a fixed position in a line: ATX/setext
//! heading markers, thematic breaks, fenced-code delimiters, HTML-block
//! openers/closers, inline HTML tags, and link titles.
//!
//! Each scanner takes the remainder of a line (or inline subject) starting
//! at the candidate position and returns the number of bytes it matched, or
//! `None`. They mirror the fixed grammar a reference CommonMark
//! implementation expresses as regexes, just matched by hand so the crate
//! carries no regex engine.

use crate::ctype::{isalnum, isalpha, isspace};

const BLOCK_TAG_NAMES: &[&str] = &[
    "address", "article", "aside", "base", "basefont", "blockquote", "body",
    "caption", "center", "col", "colgroup", "dd", "details", "dialog", "dir",
    "div", "dl", "dt", "fieldset", "figcaption", "figure", "footer", "form",
    "frame", "frameset", "h1", "h2", "h3", "h4", "h5", "h6", "head", "header",
    "hr", "html", "iframe", "legend", "li", "link", "main", "menu", "menuitem",
    "nav", "noframes", "ol", "optgroup", "option", "p", "param", "section",
    "summary", "table", "tbody", "td", "tfoot", "th", "thead", "title", "tr",
    "track", "ul",
];

fn match_tag_name(line: &str) -> Option<usize> {
    let bytes = line.as_bytes();
    let mut i = 0;
    if i >= bytes.len() || !isalpha(bytes[i]) {
        return None;
    }
    i += 1;
    while i < bytes.len() && isalnum(bytes[i]) {
        i += 1;
    }
    Some(i)
}

fn is_block_tag_name(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    BLOCK_TAG_NAMES.contains(&lower.as_str())
}

/// `#{1,6}` followed by space/tab/end-of-line, or a bare run of `#` that is
/// the entire line. Returns the length of the marker including one
/// following space, if present.
pub fn atx_heading_start(line: &str) -> Option<usize> {
    let bytes = line.as_bytes();
    if bytes.first() != Some(&b'#') {
        return None;
    }
    let mut i = 0;
    while i < bytes.len() && bytes[i] == b'#' {
        i += 1;
    }
    if i > 6 {
        return None;
    }
    if i == bytes.len() {
        return Some(i);
    }
    if isspace(bytes[i]) {
        return Some(i + 1);
    }
    None
}

pub enum SetextChar {
    Equals,
    Hyphen,
}

/// A line consisting of one or more `=` (or `-`) characters and nothing
/// else but trailing spaces/tabs.
pub fn setext_heading_line(line: &str) -> Option<SetextChar> {
    let bytes = line.as_bytes();
    let marker = *bytes.first()?;
    if marker != b'=' && marker != b'-' {
        return None;
    }

    let mut i = 0;
    while i < bytes.len() && bytes[i] == marker {
        i += 1;
    }
    while i < bytes.len() && isspace(bytes[i]) {
        i += 1;
    }
    if i != bytes.len() {
        return None;
    }

    Some(if marker == b'=' {
        SetextChar::Equals
    } else {
        SetextChar::Hyphen
    })
}

/// Three or more `*`, `-` or `_`, the same character throughout, with any
/// number of interior spaces/tabs and nothing else on the line.
pub fn thematic_break(line: &str) -> Option<usize> {
    let bytes = line.as_bytes();
    let marker = *bytes.first()?;
    if marker != b'*' && marker != b'-' && marker != b'_' {
        return None;
    }

    let mut count = 0;
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == marker {
            count += 1;
            i += 1;
        } else if isspace(bytes[i]) {
            i += 1;
        } else {
            return None;
        }
    }

    if count >= 3 {
        Some(i)
    } else {
        None
    }
}

/// An opening code fence: a run of 3+ backticks or 3+ tildes, optionally
/// followed by an info string (which may not itself contain a backtick for
/// backtick fences). Returns `(fence_length, fence_byte)`.
pub fn open_code_fence(line: &str) -> Option<(usize, u8)> {
    let bytes = line.as_bytes();
    let marker = *bytes.first()?;
    if marker != b'`' && marker != b'~' {
        return None;
    }

    let mut i = 0;
    while i < bytes.len() && bytes[i] == marker {
        i += 1;
    }
    if i < 3 {
        return None;
    }

    if marker == b'`' && line[i..].contains('`') {
        return None;
    }

    Some((i, marker))
}

/// A closing code fence: a run of at least `fence_length` of `fence_byte`,
/// with only trailing spaces/tabs after it.
pub fn close_code_fence(line: &str, fence_length: usize, fence_byte: u8) -> Option<usize> {
    let bytes = line.as_bytes();
    let mut i = 0;
    while i < bytes.len() && isspace(bytes[i]) {
        i += 1;
    }
    let start = i;
    while i < bytes.len() && bytes[i] == fence_byte {
        i += 1;
    }
    if i - start < fence_length {
        return None;
    }
    while i < bytes.len() && isspace(bytes[i]) {
        i += 1;
    }
    if i != bytes.len() {
        return None;
    }
    Some(i)
}

/// Number of leading space/tab characters.
pub fn spacechars(line: &str) -> usize {
    line.bytes().take_while(|&b| isspace(b)).count()
}

/// HTML-block start condition 1-7.
///
/// Conditions 1-6 are a line beginning `<script`, `<pre`, `<!--`, `<?`,
/// `<!`, `<![CDATA[`, or `<`/`</` followed by one of the 62 known HTML
/// block-level tag names and then whitespace, `>`, or EOL; they may
/// interrupt an open paragraph. Condition 7 is any other complete open
/// or closing tag, alone on its line but for trailing whitespace; it may
/// not interrupt a paragraph, hence `in_paragraph`.
pub fn html_block_start(line: &str, in_paragraph: bool) -> Option<u8> {
    let bytes = line.as_bytes();
    if bytes.first() != Some(&b'<') {
        return None;
    }

    let rest = &line[1..];
    let lower_rest: String = rest.chars().take(10).flat_map(|c| c.to_lowercase()).collect();

    if lower_rest.starts_with("script") || lower_rest.starts_with("pre") || lower_rest.starts_with("style")
    {
        let tag = ["script", "pre", "style"]
            .iter()
            .find(|t| lower_rest.starts_with(**t))
            .unwrap();
        let after = rest.as_bytes().get(tag.len());
        if after.is_none() || after == Some(&b' ') || after == Some(&b'\t') || after == Some(&b'>') {
            return Some(1);
        }
    }

    if rest.starts_with("!--") {
        return Some(2);
    }

    if rest.starts_with('?') {
        return Some(3);
    }

    if rest.starts_with('!') && rest.as_bytes().get(1).is_some_and(u8::is_ascii_uppercase) {
        return Some(4);
    }

    if rest.starts_with("![CDATA[") {
        return Some(5);
    }

    let (tag_start, closing) = if let Some(stripped) = rest.strip_prefix('/') {
        (stripped, true)
    } else {
        (rest, false)
    };
    if let Some(len) = match_tag_name(tag_start) {
        let name = &tag_start[..len];
        if is_block_tag_name(name) {
            let after = tag_start.as_bytes().get(len);
            let ok = after.is_none()
                || after == Some(&b' ')
                || after == Some(&b'\t')
                || after == Some(&b'\n')
                || after == Some(&b'>')
                || (!closing && after == Some(&b'/') && tag_start.as_bytes().get(len + 1) == Some(&b'>'));
            if ok {
                return Some(6);
            }
        }
    }

    if !in_paragraph {
        if let Some(len) = tag_open_or_close(line) {
            if line[len..].bytes().all(isspace) {
                return Some(7);
            }
        }
    }

    None
}

/// End condition for HTML-block type `start_type` (1-5 only; types 6/7
/// close on the next blank line, handled by the block parser directly).
pub fn html_block_end(line: &str, start_type: u8) -> bool {
    match start_type {
        1 => {
            let lower = line.to_ascii_lowercase();
            lower.contains("</script>") || lower.contains("</pre>") || lower.contains("</style>")
        }
        2 => line.contains("-->"),
        3 => line.contains("?>"),
        4 => line.contains('>'),
        5 => line.contains("]]>"),
        _ => false,
    }
}

/// A single complete HTML tag (open, close, comment, processing
/// instruction, declaration, or CDATA section), for inline raw-HTML
/// recognition. Returns the number of bytes matched.
pub fn html_tag(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    if bytes.first() != Some(&b'<') {
        return None;
    }

    if let Some(len) = match_comment(text) {
        return Some(len);
    }
    if text[1..].starts_with('?') {
        return text[1..].find("?>").map(|p| 1 + p + 2);
    }
    if text[1..].starts_with('!') {
        let rest = &text[2..];
        if rest.starts_with("[CDATA[") {
            return rest.find("]]>").map(|p| 2 + p + 3);
        }
        if rest.as_bytes().first().is_some_and(u8::is_ascii_alphabetic) {
            return rest.find('>').map(|p| 2 + p + 1);
        }
        return None;
    }

    tag_open_or_close(text)
}

/// An open tag (with optional attributes) or a closing tag, per the inline
/// raw-HTML tag grammar. Shared by [`html_tag`] and HTML-block start
/// condition 7. `text` must start with `<`.
fn tag_open_or_close(text: &str) -> Option<usize> {
    if let Some(stripped) = text[1..].strip_prefix('/') {
        let len = match_tag_name(stripped)?;
        let mut i = 1 + 1 + len;
        i += spacechars(&text[i..]);
        if text.as_bytes().get(i) == Some(&b'>') {
            return Some(i + 1);
        }
        return None;
    }

    let name_len = match_tag_name(&text[1..])?;
    let mut i = 1 + name_len;
    loop {
        match match_attribute(&text[i..]) {
            Some(len) if len > 0 => i += len,
            _ => break,
        }
    }
    i += spacechars(&text[i..]);
    if text[i..].starts_with("/>") {
        return Some(i + 2);
    }
    if text.as_bytes().get(i) == Some(&b'>') {
        return Some(i + 1);
    }
    None
}

fn match_comment(text: &str) -> Option<usize> {
    let rest = text.strip_prefix("<!--")?;
    if rest.starts_with('>') || rest.starts_with("->") {
        return None;
    }
    let end = rest.find("--")?;
    if !rest[end..].starts_with("-->") {
        return None;
    }
    Some(4 + end + 3)
}

fn match_attribute(text: &str) -> Option<usize> {
    let mut i = spacechars(text);
    if i == 0 {
        return None;
    }
    let bytes = text.as_bytes();
    let name_start = i;
    if i >= bytes.len() || !(isalpha(bytes[i]) || bytes[i] == b'_' || bytes[i] == b':') {
        return Some(0);
    }
    i += 1;
    while i < bytes.len() && (isalnum(bytes[i]) || matches!(bytes[i], b'_' | b':' | b'.' | b'-')) {
        i += 1;
    }
    if i == name_start {
        return Some(0);
    }

    let save = i;
    let mut j = i + spacechars(&text[i..]);
    if text.as_bytes().get(j) == Some(&b'=') {
        j += 1;
        j += spacechars(&text[j..]);
        match text.as_bytes().get(j) {
            Some(&b'\'') => {
                let close = text[j + 1..].find('\'')?;
                i = j + 1 + close + 1;
            }
            Some(&b'"') => {
                let close = text[j + 1..].find('"')?;
                i = j + 1 + close + 1;
            }
            Some(_) => {
                let rest = &text[j..];
                let len = rest
                    .bytes()
                    .take_while(|&b| {
                        !isspace(b) && !matches!(b, b'"' | b'\'' | b'=' | b'<' | b'>' | b'`')
                    })
                    .count();
                if len == 0 {
                    return Some(0);
                }
                i = j + len;
            }
            None => return Some(0),
        }
    } else {
        i = save;
    }

    Some(i)
}

/// A link title: a `"..."`, `'...'` or `(...)` span with backslash-escapes
/// and no unescaped matching quote inside.
pub fn link_title(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    let close = match bytes.first()? {
        b'"' => b'"',
        b'\'' => b'\'',
        b'(' => b')',
        _ => return None,
    };

    let mut i = 1;
    while i < bytes.len() {
        if bytes[i] == b'\\' && i + 1 < bytes.len() {
            i += 2;
            continue;
        }
        if bytes[i] == close {
            return Some(i + 1);
        }
        i += 1;
    }
    None
}

/// A link destination in `<...>` form: no unescaped `<`, `>`, newline, or
/// bare backslash inside.
pub fn link_destination_angle(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    if bytes.first() != Some(&b'<') {
        return None;
    }
    let mut i = 1;
    while i < bytes.len() {
        match bytes[i] {
            b'>' => return Some(i + 1),
            b'<' | b'\n' => return None,
            b'\\' if i + 1 < bytes.len() => i += 2,
            _ => i += 1,
        }
    }
    None
}

/// A bare (unbracketed) link destination: a run of non-whitespace,
/// non-control characters with balanced, unescaped parentheses. May match
/// zero bytes.
pub fn link_destination_bare(text: &str) -> usize {
    let bytes = text.as_bytes();
    let mut i = 0;
    let mut paren_depth = 0usize;

    while i < bytes.len() {
        match bytes[i] {
            b'\\' if i + 1 < bytes.len() => i += 2,
            b'(' => {
                paren_depth += 1;
                i += 1;
            }
            b')' => {
                if paren_depth == 0 {
                    break;
                }
                paren_depth -= 1;
                i += 1;
            }
            b if b.is_ascii_control() || b == b' ' => break,
            _ => i += 1,
        }
    }

    i
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atx_marker_requires_space_or_eol() {
        assert_eq!(atx_heading_start("# foo"), Some(2));
        assert_eq!(atx_heading_start("###"), Some(3));
        assert_eq!(atx_heading_start("#foo"), None);
        assert_eq!(atx_heading_start("#######"), None);
    }

    #[test]
    fn thematic_break_requires_three_same_markers() {
        assert_eq!(thematic_break("***"), Some(3));
        assert_eq!(thematic_break("- - -"), Some(5));
        assert_eq!(thematic_break("--"), None);
        assert_eq!(thematic_break("-*-"), None);
    }

    #[test]
    fn code_fence_roundtrip() {
        let (len, ch) = open_code_fence("```rust").unwrap();
        assert_eq!(len, 3);
        assert_eq!(ch, b'`');
        assert_eq!(close_code_fence("```", 3, b'`'), Some(3));
        assert_eq!(close_code_fence("``", 3, b'`'), None);
    }

    #[test]
    fn html_block_start_detects_block_tag() {
        assert_eq!(html_block_start("<div>", false), Some(6));
        assert_eq!(html_block_start("<DIV class=\"x\">", false), Some(6));
        assert_eq!(html_block_start("<script>", false), Some(1));
        assert_eq!(html_block_start("<!-- c -->", false), Some(2));
    }

    #[test]
    fn html_block_start_condition_7_is_a_lone_complete_tag() {
        assert_eq!(html_block_start("<span>", false), Some(7));
        assert_eq!(html_block_start("<span>", true), None);
        assert_eq!(html_block_start("</span>  ", false), Some(7));
        assert_eq!(html_block_start("<span>not blank after", false), None);
    }

    #[test]
    fn inline_html_tag_matches_open_and_close() {
        assert_eq!(html_tag("<a href=\"x\">"), Some("<a href=\"x\">".len()));
        assert_eq!(html_tag("</a>"), Some(4));
        assert_eq!(html_tag("<br/>"), Some(5));
        assert_eq!(html_tag("<not a tag"), None);
    }

    #[test]
    fn link_title_matches_quoted_forms() {
        assert_eq!(link_title("\"hi\" rest"), Some(4));
        assert_eq!(link_title("(hi) rest"), Some(4));
        assert_eq!(link_title("'a \\' b' rest"), Some(8));
    }

    #[test]
    fn link_destination_forms() {
        assert_eq!(link_destination_angle("<foo bar>) rest"), Some(9));
        assert_eq!(link_destination_angle("<no close"), None);
        assert_eq!(link_destination_bare("/url) rest"), 4);
        assert_eq!(link_destination_bare("/a(b)c) rest"), 6);
    }
}
