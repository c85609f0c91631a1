//! The block parser: turns a document's raw text into a tree of block-level
//! [`NodeValue`]s, then runs the inline parser over every block that
//! contains inline content.
//!
//! Block parsing works one line at a time, following the three-phase shape
//! every CommonMark implementation settles on: first, walk down the chain
//! of currently-open containers checking each still applies to this line
//! (`scanners`-driven prefix matching); second, see whether a new container
//! or leaf block starts where the first phase left off; third, either add
//! the line's remaining text to whatever block we ended up in, or -- for
//! the "lazy continuation" case -- fall through to an open paragraph even
//! though an ancestor's prefix didn't match.

pub mod inlines;
pub mod options;

use std::cell::RefCell;

use typed_arena::Arena;

use crate::error::ParseError;
use crate::nodes::{
    self, make_block, AstNode, ListDelimType, ListType, NodeCodeBlock, NodeHeading,
    NodeHtmlBlock, NodeLink, NodeList, NodeValue,
};
use crate::parser::inlines::{Inline, ReferenceMap};
use crate::scanners;
use crate::strings;

pub use options::{Options, Parse, Render};

/// Parse a complete document into an arena-allocated tree rooted at a
/// [`NodeValue::Document`] node.
///
/// Every valid `&str` has a defined parse per the CommonMark grammar, so this
/// never fails; the block parser's own container-closing invariant is
/// checked internally and would only fail on a bug in this crate, not on
/// anything a caller's input can trigger.
pub fn parse_document<'a>(
    arena: &'a Arena<AstNode<'a>>,
    buffer: &str,
    options: &Options,
) -> &'a AstNode<'a> {
    let root: &'a AstNode<'a> =
        arena.alloc(AstNode::new(RefCell::new(make_block(NodeValue::Document, 0))));
    let mut parser = Parser::new(arena, root, options);
    let result = parser.feed(buffer).and_then(|()| parser.finish());
    match result {
        Ok(root) => root,
        Err(e) => panic!("{e}"),
    }
}

/// Like [`parse_document`], but accepts raw bytes and validates UTF-8 at the
/// boundary instead of requiring the caller to do it.
pub fn parse_bytes<'a>(
    arena: &'a Arena<AstNode<'a>>,
    buffer: &[u8],
    options: &Options,
) -> Result<&'a AstNode<'a>, ParseError> {
    let text = std::str::from_utf8(buffer)?;
    Ok(parse_document(arena, text, options))
}

enum Continuation {
    Matched,
    NotMatched,
    /// The line satisfies a leaf block's own end condition: the block
    /// closes after this line is handled.
    Closed,
}

struct Parser<'a, 'o> {
    arena: &'a Arena<AstNode<'a>>,
    root: &'a AstNode<'a>,
    current: &'a AstNode<'a>,
    line_number: u32,
    options: &'o Options,
    refmap: ReferenceMap,
}

impl<'a, 'o> Parser<'a, 'o> {
    fn new(arena: &'a Arena<AstNode<'a>>, root: &'a AstNode<'a>, options: &'o Options) -> Self {
        Parser {
            arena,
            root,
            current: root,
            line_number: 0,
            options,
            refmap: ReferenceMap::default(),
        }
    }

    fn feed(&mut self, buffer: &str) -> Result<(), ParseError> {
        for line in split_lines(buffer) {
            self.incorporate_line(line)?;
        }
        Ok(())
    }

    fn finish(mut self) -> Result<&'a AstNode<'a>, ParseError> {
        self.close_until(self.root)?;
        self.finalize(self.root);
        self.process_inlines(self.root);
        Ok(self.root)
    }

    /// Returns `node`'s parent, or `ParseError::ClosedBlock` if `node` has
    /// none. Every node this is called on is a descendant of the document
    /// root, which always has a parent slot to climb to, so a `None` here
    /// means a line was folded into a block after it was already finalized.
    fn require_parent(&self, node: &'a AstNode<'a>) -> Result<&'a AstNode<'a>, ParseError> {
        node.parent().ok_or(ParseError::ClosedBlock { line: self.line_number as usize })
    }

    fn add_child(&mut self, value: NodeValue) -> Result<&'a AstNode<'a>, ParseError> {
        while !nodes::can_contain_type(self.current, &value) {
            let parent = self.require_parent(self.current)?;
            self.finalize(self.current);
            self.current = parent;
        }
        let node = self
            .arena
            .alloc(AstNode::new(RefCell::new(make_block(value, self.line_number))));
        self.current.append(node);
        self.current = node;
        Ok(node)
    }

    fn add_line(&mut self, node: &'a AstNode<'a>, text: &str) {
        let mut ast = node.data.borrow_mut();
        ast.content.push_str(text);
        ast.content.push('\n');
    }

    fn close_until(&mut self, target: &'a AstNode<'a>) -> Result<(), ParseError> {
        while !std::ptr::eq(self.current, target) {
            let parent = self.require_parent(self.current)?;
            self.finalize(self.current);
            self.current = parent;
        }
        Ok(())
    }

    fn finalize(&mut self, node: &'a AstNode<'a>) {
        let value = node.data.borrow().value.clone();
        log::debug!("finalizing {:?} opened at line {}", value, node.data.borrow().start_line);

        match value {
            NodeValue::Paragraph => {
                let mut content = node.data.borrow().content.trim_start().to_string();
                while let Some(used) = inlines::parse_reference(&content, &mut self.refmap) {
                    if used == 0 {
                        break;
                    }
                    content = content[used..].trim_start().to_string();
                }
                if strings::is_blank(&content) {
                    node.detach();
                } else {
                    node.data.borrow_mut().content = content;
                }
            }
            NodeValue::CodeBlock(mut code) => {
                code.literal = node.data.borrow().content.clone();
                node.data.borrow_mut().value = NodeValue::CodeBlock(code);
            }
            NodeValue::HtmlBlock(mut html) => {
                html.literal = node.data.borrow().content.clone();
                node.data.borrow_mut().value = NodeValue::HtmlBlock(html);
            }
            NodeValue::List(mut list) => {
                list.tight = list_is_tight(node);
                node.data.borrow_mut().value = NodeValue::List(list);
            }
            _ => {}
        }

        node.data.borrow_mut().open = false;
    }

    fn incorporate_line(&mut self, raw_line: &str) -> Result<(), ParseError> {
        let line = strings::expand_tabs(raw_line);
        self.line_number += 1;
        log::trace!("line {}: {:?}", self.line_number, line);

        let old_tip = self.current;
        let mut offset = 0usize;
        let mut all_matched = true;
        let mut container: &'a AstNode<'a> = self.root;

        loop {
            let next = match container.last_child() {
                Some(c) if c.data.borrow().open => c,
                _ => break,
            };
            let value = next.data.borrow().value.clone();
            match continue_container(&value, &line, &mut offset) {
                Continuation::Matched => container = next,
                Continuation::NotMatched => {
                    all_matched = false;
                    break;
                }
                Continuation::Closed => {
                    if matches!(value, NodeValue::HtmlBlock(_)) {
                        self.add_line(next, &line[offset..]);
                    }
                    self.current = next;
                    self.finalize(next);
                    return Ok(());
                }
            }
        }

        self.current = container;

        let (nonspace, _) = leading_indent(&line, offset);
        let rest_blank = strings::is_blank(&line[nonspace..]);

        let leaf = matches!(
            container.data.borrow().value,
            NodeValue::CodeBlock(_) | NodeValue::HtmlBlock(_)
        );

        if !leaf && !all_matched {
            let old_tip_is_paragraph = matches!(old_tip.data.borrow().value, NodeValue::Paragraph);
            if old_tip_is_paragraph && !rest_blank {
                self.current = old_tip;
                self.add_line(old_tip, &line[offset..]);
                return Ok(());
            }
        }

        if !leaf {
            loop {
                let (nonspace, indent) = leading_indent(&line, offset);
                let is_paragraph = matches!(container.data.borrow().value, NodeValue::Paragraph);
                let rest = &line[nonspace..];

                if is_paragraph {
                    if let Some(c) = scanners::setext_heading_line(rest) {
                        let level = match c {
                            scanners::SetextChar::Equals => 1,
                            scanners::SetextChar::Hyphen => 2,
                        };
                        container.data.borrow_mut().value =
                            NodeValue::Heading(NodeHeading { level, setext: true });
                        self.current = container;
                        self.finalize(container);
                        return Ok(());
                    }
                }

                if indent >= 4 && !is_paragraph {
                    let node = self.add_child(NodeValue::CodeBlock(NodeCodeBlock::default()))?;
                    container = node;
                    offset += 4;
                    break;
                }

                if indent < 4 {
                    if scanners::thematic_break(rest).is_some() {
                        let node = self.add_child(NodeValue::ThematicBreak)?;
                        self.finalize(node);
                        return Ok(());
                    }

                    if let Some(consumed) = scanners::atx_heading_start(rest) {
                        let hashes = rest.bytes().take_while(|&b| b == b'#').count();
                        let mut text = rest[consumed..].trim().to_string();
                        strip_atx_closing_sequence(&mut text);
                        let node = self.add_child(NodeValue::Heading(NodeHeading {
                            level: hashes as u8,
                            setext: false,
                        }))?;
                        node.data.borrow_mut().content = text;
                        self.finalize(node);
                        return Ok(());
                    }

                    if let Some((fence_len, fence_char)) = scanners::open_code_fence(rest) {
                        let info_raw = rest[fence_len..].trim();
                        let mut info = info_raw.to_string();
                        strings::unescape(&mut info);
                        let info = crate::entity::unescape_html(&info);
                        let info = if info.is_empty() {
                            self.options
                                .parse
                                .default_info_string
                                .clone()
                                .unwrap_or_default()
                        } else {
                            info
                        };
                        self.add_child(NodeValue::CodeBlock(NodeCodeBlock {
                            fenced: true,
                            fence_char,
                            fence_length: fence_len,
                            fence_offset: indent,
                            info,
                            literal: String::new(),
                        }))?;
                        return Ok(());
                    }

                    if let Some(start_type) = scanners::html_block_start(rest, is_paragraph) {
                        let node = self.add_child(NodeValue::HtmlBlock(NodeHtmlBlock {
                            block_type: start_type,
                            literal: String::new(),
                        }))?;
                        if start_type <= 5 && scanners::html_block_end(rest, start_type) {
                            self.add_line(node, rest);
                            self.finalize(node);
                            return Ok(());
                        }
                        container = node;
                        break;
                    }

                    if rest.as_bytes().first() == Some(&b'>') {
                        let mut consumed = nonspace + 1;
                        if line.as_bytes().get(consumed) == Some(&b' ') {
                            consumed += 1;
                        }
                        container = self.add_child(NodeValue::BlockQuote)?;
                        offset = consumed;
                        continue;
                    }

                    if let Some((list_data, marker_width)) =
                        parse_list_marker(&line, nonspace, indent)
                    {
                        let allowed_to_interrupt = !is_paragraph
                            || !(list_data.list_type == ListType::Ordered && list_data.start != 1);
                        if allowed_to_interrupt {
                            let needs_new_list = match container.data.borrow().value {
                                NodeValue::List(ref existing) => !lists_match(existing, &list_data),
                                _ => true,
                            };
                            if needs_new_list {
                                self.current = container;
                                container = self.add_child(NodeValue::List(list_data))?;
                            }
                            container = self.add_child(NodeValue::Item(list_data))?;
                            offset = nonspace + marker_width;
                            continue;
                        }
                    }
                }

                break;
            }
        }

        self.current = container;
        let container_value = self.current.data.borrow().value.clone();
        let accepts_lines = container_value.accepts_lines();
        let (nonspace, _) = leading_indent(&line, offset);
        let blank = strings::is_blank(&line[nonspace..]);

        if accepts_lines {
            let text: &str = match container_value {
                NodeValue::CodeBlock(_) => &line[offset.min(line.len())..],
                _ => &line[nonspace..],
            };
            let node = self.current;
            self.add_line(node, text);
        } else if !blank {
            let node = self.add_child(NodeValue::Paragraph)?;
            self.add_line(node, &line[nonspace..]);
        }
        Ok(())
    }

    fn process_inlines(&mut self, root: &'a AstNode<'a>) {
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            let contains_inlines = node.data.borrow().value.contains_inlines();
            if contains_inlines {
                let content = node.data.borrow().content.clone();
                let parsed = inlines::parse(&content, &self.refmap);
                self.attach_inlines(node, parsed);
            } else {
                for child in node.reverse_children() {
                    stack.push(child);
                }
            }
        }
    }

    fn attach_inlines(&mut self, parent: &'a AstNode<'a>, inlines: Vec<Inline>) {
        for inline in inlines {
            self.attach_inline(parent, inline);
        }
    }

    fn attach_inline(&mut self, parent: &'a AstNode<'a>, inline: Inline) {
        match inline {
            Inline::Str(s) => {
                parent.append(self.alloc(NodeValue::Text(s)));
            }
            Inline::Code(s) => {
                parent.append(self.alloc(NodeValue::Code(s)));
            }
            Inline::Html(s) => {
                parent.append(self.alloc(NodeValue::HtmlInline(s)));
            }
            Inline::Softbreak => {
                let value = if self.options.render.hardbreaks {
                    NodeValue::LineBreak
                } else {
                    NodeValue::SoftBreak
                };
                parent.append(self.alloc(value));
            }
            Inline::Hardbreak => {
                parent.append(self.alloc(NodeValue::LineBreak));
            }
            Inline::Emph(children) => {
                let node = self.alloc(NodeValue::Emph);
                parent.append(node);
                self.attach_inlines(node, children);
            }
            Inline::Strong(children) => {
                let node = self.alloc(NodeValue::Strong);
                parent.append(node);
                self.attach_inlines(node, children);
            }
            Inline::Link { url, title, label } => {
                let node = self.alloc(NodeValue::Link(NodeLink { url, title }));
                parent.append(node);
                self.attach_inlines(node, label);
            }
            Inline::Image { url, title, label } => {
                let node = self.alloc(NodeValue::Image(NodeLink { url, title }));
                parent.append(node);
                self.attach_inlines(node, label);
            }
        }
    }

    fn alloc(&self, value: NodeValue) -> &'a AstNode<'a> {
        self.arena
            .alloc(AstNode::new(RefCell::new(make_block(value, 0))))
    }
}

fn continue_container(value: &NodeValue, line: &str, offset: &mut usize) -> Continuation {
    let (nonspace, indent) = leading_indent(line, *offset);
    let blank = strings::is_blank(&line[nonspace..]);

    match *value {
        NodeValue::Document | NodeValue::List(_) => Continuation::Matched,
        NodeValue::BlockQuote => {
            if indent <= 3 && line.as_bytes().get(nonspace) == Some(&b'>') {
                let mut consumed = nonspace + 1;
                if line.as_bytes().get(consumed) == Some(&b' ') {
                    consumed += 1;
                }
                *offset = consumed;
                Continuation::Matched
            } else {
                Continuation::NotMatched
            }
        }
        NodeValue::Item(list) => {
            if blank {
                *offset = line.len();
                Continuation::Matched
            } else if indent >= list.marker_offset + list.padding {
                *offset += list.marker_offset + list.padding;
                Continuation::Matched
            } else {
                Continuation::NotMatched
            }
        }
        NodeValue::CodeBlock(ref code) if code.fenced => {
            if scanners::close_code_fence(&line[nonspace..], code.fence_length, code.fence_char)
                .is_some()
            {
                *offset = line.len();
                Continuation::Closed
            } else {
                *offset += code.fence_offset.min(indent);
                Continuation::Matched
            }
        }
        NodeValue::CodeBlock(_) => {
            if indent >= 4 {
                *offset += 4;
                Continuation::Matched
            } else if blank {
                *offset = line.len();
                Continuation::Matched
            } else {
                Continuation::NotMatched
            }
        }
        NodeValue::HtmlBlock(ref html) => {
            if html.block_type <= 5 {
                if scanners::html_block_end(line, html.block_type) {
                    Continuation::Closed
                } else {
                    Continuation::Matched
                }
            } else if blank {
                Continuation::NotMatched
            } else {
                Continuation::Matched
            }
        }
        NodeValue::Paragraph => {
            if blank {
                Continuation::NotMatched
            } else {
                Continuation::Matched
            }
        }
        _ => Continuation::NotMatched,
    }
}

/// Returns `(byte offset of first non-space, columns of leading whitespace
/// from `offset`)`. Lines are tab-expanded before this is called, so byte
/// offset and column number coincide for the ASCII whitespace prefix.
fn leading_indent(line: &str, offset: usize) -> (usize, usize) {
    let bytes = line.as_bytes();
    let mut i = offset.min(bytes.len());
    while i < bytes.len() && bytes[i] == b' ' {
        i += 1;
    }
    (i, i - offset.min(bytes.len()))
}

fn strip_atx_closing_sequence(text: &mut String) {
    let trimmed = text.trim_end();
    let hashes = trimmed.bytes().rev().take_while(|&b| b == b'#').count();
    if hashes == trimmed.len() {
        *text = String::new();
        return;
    }
    if hashes > 0 {
        let prefix_end = trimmed.len() - hashes;
        if trimmed.as_bytes()[prefix_end - 1] == b' ' {
            *text = trimmed[..prefix_end].trim_end().to_string();
            return;
        }
    }
    *text = trimmed.to_string();
}

fn parse_list_marker(line: &str, nonspace: usize, indent: usize) -> Option<(NodeList, usize)> {
    let bytes = line.as_bytes();
    let c = *bytes.get(nonspace)?;

    let (list_type, bullet_char, delimiter, start, marker_len) = if matches!(c, b'-' | b'+' | b'*')
    {
        (ListType::Bullet, c, ListDelimType::Period, 1usize, 1usize)
    } else if c.is_ascii_digit() {
        let mut i = nonspace;
        while i < bytes.len() && bytes[i].is_ascii_digit() && i - nonspace < 9 {
            i += 1;
        }
        let digits = i - nonspace;
        let delim = match bytes.get(i) {
            Some(b'.') => ListDelimType::Period,
            Some(b')') => ListDelimType::Paren,
            _ => return None,
        };
        let start: usize = line[nonspace..i].parse().unwrap_or(0);
        (ListType::Ordered, b'.', delim, start, digits + 1)
    } else {
        return None;
    };

    let after = nonspace + marker_len;
    let at_eol = after >= bytes.len();
    let following_spaces = line[after.min(bytes.len())..]
        .bytes()
        .take_while(|&b| b == b' ')
        .count();

    if !at_eol && following_spaces == 0 {
        return None;
    }

    let padding = if at_eol || following_spaces >= 5 {
        marker_len + 1
    } else {
        marker_len + following_spaces
    };

    Some((
        NodeList {
            list_type,
            marker_offset: indent,
            padding,
            start,
            delimiter,
            bullet_char,
            tight: false,
        },
        marker_len,
    ))
}

fn lists_match(a: &NodeList, b: &NodeList) -> bool {
    a.list_type == b.list_type && a.delimiter == b.delimiter && a.bullet_char == b.bullet_char
}

fn list_is_tight<'a>(list: &'a AstNode<'a>) -> bool {
    let mut item = list.first_child();
    while let Some(it) = item {
        if nodes::ends_with_blank_line(it) && it.next_sibling().is_some() {
            return false;
        }
        let mut subitem = it.first_child();
        while let Some(sub) = subitem {
            if nodes::ends_with_blank_line(sub)
                && (it.next_sibling().is_some() || sub.next_sibling().is_some())
            {
                return false;
            }
            subitem = sub.next_sibling();
        }
        item = it.next_sibling();
    }
    true
}

/// Split `buffer` into lines on `\r\n`, `\n` or `\r`, dropping a trailing
/// empty line produced by a final line terminator.
fn split_lines(buffer: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let bytes = buffer.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                lines.push(&buffer[start..i]);
                i += 1;
                start = i;
            }
            b'\r' => {
                lines.push(&buffer[start..i]);
                i += 1;
                if bytes.get(i) == Some(&b'\n') {
                    i += 1;
                }
                start = i;
            }
            _ => i += 1,
        }
    }
    if start < bytes.len() {
        lines.push(&buffer[start..]);
    }
    lines
}
