//! Inline parsing: turns the raw text content of a paragraph, heading or
//! table cell into a tree of inline elements (emphasis, links, code spans,
//! and so on).
//!
//! The parser is a single left-to-right scan over the subject with no
//! backtracking: each `parse_*` method attempts to match at the current
//! position and, on success, appends one (possibly nested) element and
//! advances. `*`/`_` runs are provisionally pushed as literal text and
//! recorded on a delimiter stack; once the scan completes, `process_emphasis`
//! walks that stack left to right, matching closers against openers of the
//! same character and collapsing the text between a matched pair into an
//! `Emph` or `Strong` node. This defers resolution to a second pass instead
//! of resolving each run as it's found, so nesting order comes out right for
//! runs like `***foo***` (strong-inside-emph vs. emph-inside-strong depends
//! on which side has delimiters left over, not on scan order).

use rustc_hash::FxHashMap;
use unicode_categories::UnicodeCategories;

use crate::autolink;
use crate::ctype::ispunct;
use crate::entity;
use crate::scanners;
use crate::strings;

/// A single link or image reference definition's resolved target.
#[derive(Debug, Clone, Default)]
pub struct Reference {
    pub url: String,
    pub title: String,
}

/// Maps normalized reference labels to their targets, accumulated by the
/// block parser as it finalizes paragraphs and consulted here when
/// resolving reference-style links and images.
pub type ReferenceMap = FxHashMap<String, Reference>;

/// An inline-level tree node, before it is materialized into the shared
/// arena-backed AST.
#[derive(Debug, Clone)]
pub enum Inline {
    Str(String),
    Code(String),
    Html(String),
    Softbreak,
    Hardbreak,
    Emph(Vec<Inline>),
    Strong(Vec<Inline>),
    Link {
        url: String,
        title: String,
        label: Vec<Inline>,
    },
    Image {
        url: String,
        title: String,
        label: Vec<Inline>,
    },
}

struct ScanDelims {
    numdelims: usize,
    can_open: bool,
    can_close: bool,
}

/// One entry on the emphasis delimiter stack: a `*`/`_` run that is still a
/// candidate to open or close emphasis, pointing at the placeholder `Str`
/// slot in the scan's flat inline list that holds its literal text.
///
/// `prev`/`next` link the stack as a doubly linked list over indices into
/// `InlineParser::delimiters`, mirroring the teacher's arena-pointer list
/// without needing a second lifetime for it.
struct Delimiter {
    inline_index: usize,
    delim_char: char,
    length: usize,
    can_open: bool,
    can_close: bool,
    prev: Option<usize>,
    next: Option<usize>,
}

/// Scans `text` (the parser's `subject`) one inline element at a time.
pub struct InlineParser<'r> {
    subject: String,
    pos: usize,
    label_nest_level: usize,
    refmap: &'r ReferenceMap,
    delimiters: Vec<Delimiter>,
    last_delimiter: Option<usize>,
}

impl<'r> InlineParser<'r> {
    fn new(subject: &str, refmap: &'r ReferenceMap) -> Self {
        InlineParser {
            subject: subject.to_string(),
            pos: 0,
            label_nest_level: 0,
            refmap,
            delimiters: Vec::new(),
            last_delimiter: None,
        }
    }

    fn rest(&self) -> &str {
        &self.subject[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn char_before(&self) -> char {
        if self.pos == 0 {
            '\n'
        } else {
            self.subject[..self.pos].chars().next_back().unwrap_or('\n')
        }
    }

    /// Consume zero or more spaces, including at most one newline.
    fn spnl(&mut self) {
        let bytes = self.rest().as_bytes();
        let mut i = 0;
        while i < bytes.len() && bytes[i] == b' ' {
            i += 1;
        }
        if i < bytes.len() && bytes[i] == b'\n' {
            i += 1;
            while i < bytes.len() && bytes[i] == b' ' {
                i += 1;
            }
        }
        self.pos += i;
    }

    fn parse_backticks(&mut self, inlines: &mut Vec<Inline>) -> usize {
        let startpos = self.pos;
        let ticks_len = self.rest().bytes().take_while(|&b| b == b'`').count();
        if ticks_len == 0 {
            return 0;
        }
        self.pos += ticks_len;
        let after_open_ticks = self.pos;

        loop {
            let run_start = self.pos;
            let run_len = self.rest().bytes().take_while(|&b| b == b'`').count();
            if run_len == 0 {
                if run_start >= self.subject.len() {
                    break;
                }
                self.pos += 1;
                continue;
            }
            self.pos += run_len;
            if run_len == ticks_len {
                let span = &self.subject[after_open_ticks..run_start];
                let code = strings::normalize_whitespace(span.trim_matches(' '));
                inlines.push(Inline::Code(code));
                return self.pos - startpos;
            }
        }

        inlines.push(Inline::Str("`".repeat(ticks_len)));
        self.pos = after_open_ticks;
        self.pos - startpos
    }

    fn parse_escaped(&mut self, inlines: &mut Vec<Inline>) -> usize {
        let bytes = self.rest().as_bytes();
        if bytes.first() != Some(&b'\\') {
            return 0;
        }
        match bytes.get(1) {
            Some(&b'\n') => {
                inlines.push(Inline::Hardbreak);
                self.pos += 2;
                2
            }
            Some(&c) if ispunct(c) => {
                inlines.push(Inline::Str((c as char).to_string()));
                self.pos += 2;
                2
            }
            _ => {
                self.pos += 1;
                inlines.push(Inline::Str("\\".to_string()));
                1
            }
        }
    }

    fn parse_autolink(&mut self, inlines: &mut Vec<Inline>) -> usize {
        if let Some((addr, used)) = autolink::scan_email(self.rest()) {
            inlines.push(Inline::Link {
                url: format!("mailto:{}", addr),
                title: String::new(),
                label: vec![Inline::Str(addr.to_string())],
            });
            self.pos += used;
            return used;
        }
        if let Some((dest, used)) = autolink::scan_uri(self.rest()) {
            inlines.push(Inline::Link {
                url: dest.to_string(),
                title: String::new(),
                label: vec![Inline::Str(dest.to_string())],
            });
            self.pos += used;
            return used;
        }
        0
    }

    fn parse_html_tag(&mut self, inlines: &mut Vec<Inline>) -> usize {
        match scanners::html_tag(self.rest()) {
            Some(len) => {
                inlines.push(Inline::Html(self.rest()[..len].to_string()));
                self.pos += len;
                len
            }
            None => 0,
        }
    }

    /// Counts a run of `c` starting at the current position and classifies
    /// it as a left- and/or right-flanking delimiter run per the Unicode
    /// whitespace/punctuation tests in the emphasis rules: a run is
    /// left-flanking unless the character it faces is punctuation cushioned
    /// by non-whitespace, non-punctuation on the other side (and
    /// symmetrically for right-flanking). `_` additionally requires the
    /// intraword restriction.
    fn scan_delims(&self, c: char) -> ScanDelims {
        let before = self.char_before();
        let numdelims = self.rest().chars().take_while(|&ch| ch == c).count();
        let after = self.subject[self.pos + numdelims..]
            .chars()
            .next()
            .unwrap_or('\n');

        let left_flanking = numdelims > 0
            && !after.is_whitespace()
            && !(after.is_punctuation() && !before.is_whitespace() && !before.is_punctuation());
        let right_flanking = numdelims > 0
            && !before.is_whitespace()
            && !(before.is_punctuation() && !after.is_whitespace() && !after.is_punctuation());

        let (can_open, can_close) = if c == '_' {
            (
                left_flanking && (!right_flanking || before.is_punctuation()),
                right_flanking && (!left_flanking || after.is_punctuation()),
            )
        } else {
            (left_flanking, right_flanking)
        };

        ScanDelims {
            numdelims,
            can_open,
            can_close,
        }
    }

    /// Consumes one run of `*`/`_` as a provisional literal text node and,
    /// if it's a flanking delimiter run, records it on the delimiter stack
    /// for `process_emphasis` to resolve once the whole subject has been
    /// scanned. A run that can neither open nor close emphasis is left as
    /// plain text with no stack entry, per the teacher's `handle_delim`.
    fn parse_emphasis(&mut self, inlines: &mut Vec<Inline>) -> usize {
        let c = match self.peek() {
            Some(c @ ('*' | '_')) => c,
            _ => return 0,
        };

        let res = self.scan_delims(c);
        self.pos += res.numdelims;
        inlines.push(Inline::Str(c.to_string().repeat(res.numdelims)));
        let inline_index = inlines.len() - 1;

        if res.can_open || res.can_close {
            self.push_delimiter(c, res.numdelims, res.can_open, res.can_close, inline_index);
        }

        res.numdelims
    }

    fn push_delimiter(
        &mut self,
        delim_char: char,
        length: usize,
        can_open: bool,
        can_close: bool,
        inline_index: usize,
    ) {
        let id = self.delimiters.len();
        self.delimiters.push(Delimiter {
            inline_index,
            delim_char,
            length,
            can_open,
            can_close,
            prev: self.last_delimiter,
            next: None,
        });
        if let Some(last) = self.last_delimiter {
            self.delimiters[last].next = Some(id);
        }
        self.last_delimiter = Some(id);
    }

    /// Unlinks a delimiter from the stack; its placeholder text, if any
    /// remains, stays in the inline list untouched.
    fn remove_delimiter(&mut self, id: usize) {
        let (prev, next) = (self.delimiters[id].prev, self.delimiters[id].next);
        match next {
            Some(n) => self.delimiters[n].prev = prev,
            None => self.last_delimiter = prev,
        }
        if let Some(p) = prev {
            self.delimiters[p].next = next;
        }
    }

    fn clear_delimiters(&mut self) {
        while let Some(last) = self.last_delimiter {
            self.remove_delimiter(last);
        }
    }

    /// Resolves the delimiter stack built up while scanning `inlines` into
    /// `Emph`/`Strong` nodes, in place. This is the canonical CommonMark
    /// algorithm: closers are visited left to right, and for each one we
    /// search back down the stack for the nearest matching opener, skipping
    /// pairs the "multiple of 3" rule forbids (CommonMark's rule for runs
    /// like `***hello*there**`). `openers_bottom` memoizes failed searches
    /// per delimiter class so a long run of unmatched closers can't cause
    /// quadratic rescanning.
    fn process_emphasis(&mut self, inlines: &mut [Option<Inline>]) {
        let mut openers_bottom = [0usize; 8];

        let mut candidate = self.last_delimiter;
        let mut closer = None;
        while let Some(c) = candidate {
            closer = Some(c);
            candidate = self.delimiters[c].prev;
        }

        while let Some(c) = closer {
            if !self.delimiters[c].can_close {
                closer = self.delimiters[c].next;
                continue;
            }

            let delim_char = self.delimiters[c].delim_char;
            let c_can_open = self.delimiters[c].can_open;
            let c_length = self.delimiters[c].length;
            let ix = if delim_char == '_' {
                0
            } else {
                1 + (c_can_open as usize) * 3 + (c_length % 3)
            };

            let mut opener = self.delimiters[c].prev;
            let mut opener_found = None;
            let mut mod_three_rule_invoked = false;

            loop {
                let o = match opener {
                    Some(o) if o >= openers_bottom[ix] => o,
                    _ => break,
                };
                if self.delimiters[o].can_open && self.delimiters[o].delim_char == delim_char {
                    let o_length = self.delimiters[o].length;
                    let o_can_close = self.delimiters[o].can_close;
                    // See CommonMark's "can open emphasis" points 9/10: a
                    // delimiter that can both open and close must be
                    // skipped as an opener when the combined run lengths
                    // are a multiple of three, unless both are.
                    let odd_match = (c_can_open || o_can_close)
                        && (o_length + c_length) % 3 == 0
                        && !(o_length % 3 == 0 && c_length % 3 == 0);
                    if !odd_match {
                        opener_found = Some(o);
                        break;
                    }
                    mod_three_rule_invoked = true;
                }
                opener = self.delimiters[o].prev;
            }

            if let Some(o) = opener_found {
                closer = self.insert_emph(inlines, o, c);
            } else {
                if !mod_three_rule_invoked {
                    openers_bottom[ix] = c;
                }
                if !self.delimiters[c].can_open {
                    self.remove_delimiter(c);
                }
                closer = self.delimiters[c].next;
            }
        }

        self.clear_delimiters();
    }

    /// Wraps the inline content strictly between `opener` and `closer` in a
    /// new `Emph` (one delimiter consumed) or `Strong` (two consumed) node,
    /// truncating or removing the opener/closer placeholders as they're
    /// used up. Returns the closer to keep matching against (itself, if it
    /// still has delimiters left, or whatever followed it on the stack).
    fn insert_emph(
        &mut self,
        inlines: &mut [Option<Inline>],
        opener: usize,
        closer: usize,
    ) -> Option<usize> {
        let opener_length = self.delimiters[opener].length;
        let closer_length = self.delimiters[closer].length;
        let use_delims = if opener_length >= 2 && closer_length >= 2 { 2 } else { 1 };
        let new_opener_len = opener_length - use_delims;
        let new_closer_len = closer_length - use_delims;
        self.delimiters[opener].length = new_opener_len;
        self.delimiters[closer].length = new_closer_len;

        // Delimiters between opener and closer are all unmatched by now;
        // drop them from the stack (their text stays, folded into the new
        // span's contents below).
        let mut prev = self.delimiters[closer].prev;
        while let Some(d) = prev {
            if d == opener {
                break;
            }
            let d_prev = self.delimiters[d].prev;
            self.remove_delimiter(d);
            prev = d_prev;
        }

        let opener_idx = self.delimiters[opener].inline_index;
        let closer_idx = self.delimiters[closer].inline_index;

        if let Some(Inline::Str(s)) = &mut inlines[opener_idx] {
            s.truncate(new_opener_len);
        }
        if let Some(Inline::Str(s)) = &mut inlines[closer_idx] {
            s.truncate(new_closer_len);
        }

        let mut contents = Vec::new();
        for slot in &mut inlines[opener_idx + 1..closer_idx] {
            if let Some(inline) = slot.take() {
                contents.push(inline);
            }
        }
        let wrapped = if use_delims == 2 {
            Inline::Strong(contents)
        } else {
            Inline::Emph(contents)
        };

        // Matching delimiters share a character, so a run of that character
        // can never immediately follow itself (adjacent same-char runs
        // scan as one run) -- opener_idx + 1 is always a drained slot
        // strictly before closer_idx.
        if new_opener_len == 0 {
            inlines[opener_idx] = Some(wrapped);
        } else {
            inlines[opener_idx + 1] = Some(wrapped);
        }

        let next_closer = self.delimiters[closer].next;
        if new_closer_len == 0 {
            inlines[closer_idx] = None;
            self.remove_delimiter(closer);
        }
        if new_opener_len == 0 {
            self.remove_delimiter(opener);
        }

        if new_closer_len == 0 {
            next_closer
        } else {
            Some(closer)
        }
    }

    fn parse_link_title(&mut self) -> Option<String> {
        let len = scanners::link_title(self.rest())?;
        let raw = &self.subject[self.pos..self.pos + len];
        let title = strings::clean_title(raw);
        self.pos += len;
        Some(title)
    }

    fn parse_link_destination(&mut self) -> Option<String> {
        if let Some(len) = scanners::link_destination_angle(self.rest()) {
            let raw = &self.subject[self.pos..self.pos + len];
            let url = strings::clean_url(raw);
            self.pos += len;
            return Some(url);
        }
        let len = scanners::link_destination_bare(self.rest());
        let raw = &self.subject[self.pos..self.pos + len];
        let url = strings::clean_url(raw);
        self.pos += len;
        Some(url)
    }

    /// Returns the number of bytes of a `[...]` label consumed, including
    /// both brackets, or 0 if none matches at the current position.
    fn parse_link_label(&mut self) -> usize {
        if self.peek() != Some('[') {
            return 0;
        }

        let startpos = self.pos;
        let mut nest_level = 0i32;
        if self.label_nest_level > 0 {
            self.label_nest_level -= 1;
            return 0;
        }

        self.pos += 1;
        loop {
            let c = match self.peek() {
                Some(c) => c,
                None => break,
            };
            if c == ']' && nest_level == 0 {
                break;
            }
            match c {
                '`' => {
                    self.parse_backticks(&mut Vec::new());
                }
                '<' => {
                    if self.parse_autolink(&mut Vec::new()) == 0
                        && self.parse_html_tag(&mut Vec::new()) == 0
                    {
                        self.pos += 1;
                    }
                }
                '[' => {
                    nest_level += 1;
                    self.pos += 1;
                }
                ']' => {
                    nest_level -= 1;
                    self.pos += 1;
                }
                '\\' => {
                    self.parse_escaped(&mut Vec::new());
                }
                _ => {
                    if self.parse_string(&mut Vec::new()) == 0 {
                        self.pos += c.len_utf8();
                    }
                }
            }
        }

        if self.peek() == Some(']') {
            self.label_nest_level = 0;
            self.pos += 1;
            self.pos - startpos
        } else {
            self.label_nest_level = nest_level.max(0) as usize;
            self.pos = startpos;
            0
        }
    }

    fn parse_link(&mut self, inlines: &mut Vec<Inline>) -> usize {
        let startpos = self.pos;
        let n = self.parse_link_label();
        if n == 0 {
            return 0;
        }
        let rawlabel = self.subject[startpos..startpos + n].to_string();

        if self.peek() == Some('(') {
            self.pos += 1;
            self.spnl();
            if let Some(dest) = self.parse_link_destination() {
                let before_spnl = self.pos;
                self.spnl();
                let title = if self.pos > before_spnl {
                    self.parse_link_title().unwrap_or_default()
                } else {
                    String::new()
                };
                self.spnl();
                if self.peek() == Some(')') {
                    self.pos += 1;
                    inlines.push(Inline::Link {
                        url: dest,
                        title,
                        label: parse_raw_label(&rawlabel),
                    });
                    return self.pos - startpos;
                }
            }
            self.pos = startpos;
            return 0;
        }

        let savepos = self.pos;
        self.spnl();
        let beforelabel = self.pos;
        let n2 = self.parse_link_label();
        let reflabel = if n2 == 2 {
            rawlabel.clone()
        } else if n2 > 0 {
            self.subject[beforelabel..beforelabel + n2].to_string()
        } else {
            self.pos = savepos;
            rawlabel.clone()
        };

        if let Some(link) = self
            .refmap
            .get(&strings::normalize_reference_label(&reflabel))
        {
            inlines.push(Inline::Link {
                url: link.url.clone(),
                title: link.title.clone(),
                label: parse_raw_label(&rawlabel),
            });
            return self.pos - startpos;
        }

        self.pos = startpos;
        0
    }

    fn parse_image(&mut self, inlines: &mut Vec<Inline>) -> usize {
        if self.peek() != Some('!') {
            return 0;
        }
        self.pos += 1;
        let mut link_inlines = Vec::new();
        let n = self.parse_link(&mut link_inlines);
        if n == 0 {
            self.pos -= 1;
            inlines.push(Inline::Str("!".to_string()));
            return 1;
        }
        match link_inlines.pop() {
            Some(Inline::Link { url, title, label }) => {
                inlines.push(Inline::Image { url, title, label });
                n + 1
            }
            Some(other) => {
                inlines.push(other);
                n + 1
            }
            None => 1,
        }
    }

    fn parse_entity(&mut self, inlines: &mut Vec<Inline>) -> usize {
        if self.peek() != Some('&') {
            return 0;
        }
        match entity::unescape(&self.subject[self.pos + 1..]) {
            Some((resolved, used)) => {
                inlines.push(Inline::Str(resolved));
                self.pos += 1 + used;
                1 + used
            }
            None => 0,
        }
    }

    fn parse_string(&mut self, inlines: &mut Vec<Inline>) -> usize {
        let rest = self.rest();
        let len = rest
            .find(|c: char| {
                matches!(
                    c,
                    '\n' | '`' | '[' | ']' | '\\' | '!' | '<' | '&' | '*' | '_'
                )
            })
            .unwrap_or(rest.len());

        // Every other dispatch in `parse_inline` already had first refusal
        // at this character and declined it (an unresolved link bracket, a
        // lone `<` with no valid autolink or tag, and so on); it falls back
        // to being ordinary text. Must still consume at least one character
        // here, or the caller's loop sees no progress and stops early.
        let len = if len == 0 {
            rest.chars().next().map_or(0, char::len_utf8)
        } else {
            len
        };
        if len == 0 {
            return 0;
        }

        inlines.push(Inline::Str(rest[..len].to_string()));
        self.pos += len;
        len
    }

    fn parse_newline(&mut self, inlines: &mut Vec<Inline>) -> usize {
        if self.peek() != Some('\n') {
            return 0;
        }
        self.pos += 1;
        match inlines.last_mut() {
            Some(Inline::Str(s)) if s.ends_with("  ") => {
                while s.ends_with(' ') {
                    s.pop();
                }
                inlines.push(Inline::Hardbreak);
            }
            Some(Inline::Str(s)) => {
                if s.ends_with(' ') {
                    s.pop();
                }
                inlines.push(Inline::Softbreak);
            }
            _ => inlines.push(Inline::Softbreak),
        }
        1
    }

    fn parse_inline(&mut self, inlines: &mut Vec<Inline>) -> usize {
        let c = match self.peek() {
            Some(c) => c,
            None => return 0,
        };

        let r = match c {
            '\n' => self.parse_newline(inlines),
            '\\' => self.parse_escaped(inlines),
            '`' => self.parse_backticks(inlines),
            '*' | '_' => self.parse_emphasis(inlines),
            '[' => self.parse_link(inlines),
            '!' => self.parse_image(inlines),
            '<' => {
                let n = self.parse_autolink(inlines);
                if n > 0 {
                    n
                } else {
                    self.parse_html_tag(inlines)
                }
            }
            '&' => self.parse_entity(inlines),
            _ => 0,
        };

        if r > 0 {
            r
        } else {
            self.parse_string(inlines)
        }
    }

    fn parse_all(&mut self) -> Vec<Inline> {
        let mut inlines = Vec::new();
        while self.parse_inline(&mut inlines) > 0 {}

        let mut slots: Vec<Option<Inline>> = inlines.into_iter().map(Some).collect();
        self.process_emphasis(&mut slots);
        slots.into_iter().flatten().collect()
    }
}

/// Parse `subject` as a run of inline content, resolving reference-style
/// links and images against `refmap`.
pub fn parse(subject: &str, refmap: &ReferenceMap) -> Vec<Inline> {
    InlineParser::new(subject, refmap).parse_all()
}

/// Parse a raw (bracket-included) link label's inner text as inline
/// content, without resolving nested reference links against any map --
/// matching the reference grammar's rule that a link label's own contents
/// are never themselves link targets.
fn parse_raw_label(raw: &str) -> Vec<Inline> {
    let empty = ReferenceMap::default();
    let inner = &raw[1..raw.len() - 1];
    InlineParser::new(inner, &empty).parse_all()
}

/// Attempt to parse one link reference definition from the start of `s`,
/// inserting it into `refmap` (first definition for a given label wins).
/// Returns the number of bytes consumed on success.
pub fn parse_reference(s: &str, refmap: &mut ReferenceMap) -> Option<usize> {
    let empty = ReferenceMap::default();
    let mut p = InlineParser::new(s, &empty);

    let n = p.parse_link_label();
    if n == 0 {
        return None;
    }
    let rawlabel = p.subject[..n].to_string();

    if p.peek() == Some(':') {
        p.pos += 1;
    } else {
        return None;
    }

    p.spnl();
    let dest = p.parse_link_destination()?;
    if dest.is_empty() {
        return None;
    }

    let before_title = p.pos;
    p.spnl();
    let title = p.parse_link_title().unwrap_or_else(|| {
        p.pos = before_title;
        String::new()
    });

    let normalized = strings::normalize_reference_label(&rawlabel);
    refmap
        .entry(normalized)
        .or_insert(Reference { url: dest, title });

    Some(p.pos)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_str(s: &str) -> Vec<Inline> {
        parse(s, &ReferenceMap::default())
    }

    #[test]
    fn parses_plain_text() {
        let r = parse_str("hello world");
        assert!(matches!(&r[..], [Inline::Str(s)] if s == "hello world"));
    }

    #[test]
    fn parses_emphasis_and_strong() {
        let r = parse_str("*a* and **b**");
        assert!(matches!(&r[0], Inline::Emph(inner)
            if matches!(&inner[..], [Inline::Str(s)] if s == "a")));
        assert!(r.iter().any(|i| matches!(i, Inline::Strong(_))));
    }

    #[test]
    fn triple_delimiter_nests_strong_inside_emph() {
        // Not Strong(Emph(foo)): the outer layer is the one with a single
        // leftover delimiter on each side, and that's the emphasis, not the
        // strong emphasis.
        let r = parse_str("***foo***");
        assert!(matches!(&r[..], [Inline::Emph(outer)] if matches!(&outer[..],
            [Inline::Strong(inner)] if matches!(&inner[..], [Inline::Str(s)] if s == "foo"))));
    }

    #[test]
    fn mod_three_rule_splits_mismatched_run() {
        let r = parse_str("***hello*there**");
        assert!(matches!(&r[..], [Inline::Strong(outer)] if matches!(&outer[..],
            [Inline::Emph(_), Inline::Str(s)] if s == "there")));
    }

    #[test]
    fn parses_code_span_and_collapses_whitespace() {
        let r = parse_str("`a  b`");
        assert!(matches!(&r[..], [Inline::Code(s)] if s == "a b"));
    }

    #[test]
    fn resolves_reference_links() {
        let mut refmap = ReferenceMap::default();
        parse_reference("[foo]: /url \"title\"", &mut refmap).unwrap();
        let r = InlineParser::new("[foo]", &refmap).parse_all();
        assert!(matches!(&r[..], [Inline::Link { url, title, .. }]
            if url == "/url" && title == "title"));
    }

    #[test]
    fn parses_inline_link() {
        let r = parse_str("[text](/url \"t\")");
        assert!(matches!(&r[..], [Inline::Link { url, title, .. }]
            if url == "/url" && title == "t"));
    }

    #[test]
    fn image_wraps_link_result() {
        let r = parse_str("![alt](/img.png)");
        assert!(matches!(&r[..], [Inline::Image { url, .. }] if url == "/img.png"));
    }

    #[test]
    fn autolink_gets_mailto_scheme() {
        let r = parse_str("<foo@bar.com>");
        assert!(matches!(&r[..], [Inline::Link { url, .. }] if url == "mailto:foo@bar.com"));
    }

    #[test]
    fn hardbreak_requires_two_trailing_spaces() {
        let r = parse_str("a  \nb");
        assert!(r.iter().any(|i| matches!(i, Inline::Hardbreak)));
    }
}
