//! The CommonMark AST.

use crate::arena_tree::Node;
use std::cell::RefCell;

/// The core AST node enum.
#[derive(Debug, Clone)]
pub enum NodeValue {
    /// The root of every CommonMark document. Contains **blocks**.
    Document,

    /// **Block**. A [block quote](https://spec.commonmark.org/0.30/#block-quotes).
    /// Contains other **blocks**.
    ///
    /// ``` md
    /// > A block quote.
    /// ```
    BlockQuote,

    /// **Block**. A [list](https://spec.commonmark.org/0.30/#lists). Contains
    /// [list items](https://spec.commonmark.org/0.30/#list-items).
    ///
    /// ``` md
    /// * An unordered list
    /// * Another item
    ///
    /// 1. An ordered list
    /// 2. Another item
    /// ```
    List(NodeList),

    /// **Block**. A [list item](https://spec.commonmark.org/0.30/#list-items). Contains
    /// other **blocks**.
    Item(NodeList),

    /// **Block**. A code block; may be
    /// [fenced](https://spec.commonmark.org/0.30/#fenced-code-blocks) or
    /// [indented](https://spec.commonmark.org/0.30/#indented-code-blocks). Contains raw
    /// text which is not parsed as Markdown, although is HTML escaped.
    CodeBlock(NodeCodeBlock),

    /// **Block**. An [HTML block](https://spec.commonmark.org/0.30/#html-blocks). Contains
    /// raw text which is neither parsed as Markdown nor HTML escaped.
    HtmlBlock(NodeHtmlBlock),

    /// **Block**. A [paragraph](https://spec.commonmark.org/0.30/#paragraphs). Contains
    /// **inlines**.
    Paragraph,

    /// **Block**. A heading; may be an
    /// [ATX heading](https://spec.commonmark.org/0.30/#atx-headings) or a
    /// [setext heading](https://spec.commonmark.org/0.30/#setext-headings). Contains
    /// **inlines**.
    Heading(NodeHeading),

    /// **Block**. A [thematic break](https://spec.commonmark.org/0.30/#thematic-breaks).
    /// Has no children.
    ThematicBreak,

    /// **Inline**. [Textual content](https://spec.commonmark.org/0.30/#textual-content). All
    /// text in a document will be contained in a `Text` node.
    Text(String),

    /// **Inline**. A [soft line break](https://spec.commonmark.org/0.30/#soft-line-breaks).
    /// Rendered as a `LineBreak` instead when the `render.hardbreaks` option is set.
    SoftBreak,

    /// **Inline**. A [hard line break](https://spec.commonmark.org/0.30/#hard-line-breaks).
    LineBreak,

    /// **Inline**. A [code span](https://spec.commonmark.org/0.30/#code-spans).
    Code(String),

    /// **Inline**. [Raw HTML](https://spec.commonmark.org/0.30/#raw-html) contained inline.
    HtmlInline(String),

    /// **Inline**.
    /// [Emphasized](https://spec.commonmark.org/0.30/#emphasis-and-strong-emphasis) text.
    Emph,

    /// **Inline**. [Strong](https://spec.commonmark.org/0.30/#emphasis-and-strong-emphasis)
    /// text.
    Strong,

    /// **Inline**. A [link](https://spec.commonmark.org/0.30/#links) to some destination,
    /// with an optional title.
    Link(NodeLink),

    /// **Inline**. An [image](https://spec.commonmark.org/0.30/#images).
    Image(NodeLink),
}

/// The details of a link's destination, or an image's source.
#[derive(Debug, Clone)]
pub struct NodeLink {
    /// The URL for the link destination or image source.
    pub url: String,

    /// The title for the link or image.
    ///
    /// This field is used for the `title` attribute by the HTML renderer even for images;
    /// `alt` text is supplied by the image's inline content instead.
    pub title: String,
}

/// The metadata of a list; the kind of list, the delimiter used and so on.
#[derive(Debug, Default, Clone, Copy)]
pub struct NodeList {
    /// The kind of list (bullet (unordered) or ordered).
    pub list_type: ListType,

    #[doc(hidden)]
    pub marker_offset: usize,

    #[doc(hidden)]
    pub padding: usize,

    /// For ordered lists, the ordinal the list starts at.
    pub start: usize,

    /// For ordered lists, the delimiter after each number.
    pub delimiter: ListDelimType,

    /// For bullet lists, the character used for each bullet.
    pub bullet_char: u8,

    /// Whether the list is [tight](https://spec.commonmark.org/0.30/#tight), i.e. whether
    /// its paragraphs are unwrapped from `<p>` tags when rendered as HTML.
    pub tight: bool,
}

/// The type of list.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ListType {
    /// A bullet list, i.e. an unordered list.
    #[default]
    Bullet,

    /// An ordered list.
    Ordered,
}

/// The delimiter for ordered lists, i.e. the character which appears after each number.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ListDelimType {
    /// A period character `.`.
    #[default]
    Period,

    /// A paren character `)`.
    Paren,
}

/// The metadata and data of a code block (fenced or indented).
#[derive(Default, Debug, Clone)]
pub struct NodeCodeBlock {
    /// Whether the code block is fenced.
    pub fenced: bool,

    /// For fenced code blocks, the fence character itself (`` ` `` or `~`).
    pub fence_char: u8,

    /// For fenced code blocks, the length of the opening fence.
    pub fence_length: usize,

    #[doc(hidden)]
    pub fence_offset: usize,

    /// For fenced code blocks, the
    /// [info string](https://spec.commonmark.org/0.30/#info-string) after the opening
    /// fence, if any.
    pub info: String,

    /// The literal contents of the code block. As the contents are not interpreted as
    /// Markdown at all, they are stored here directly rather than in a child inline.
    pub literal: String,
}

/// The metadata of a heading.
#[derive(Default, Debug, Clone, Copy)]
pub struct NodeHeading {
    /// The level of the heading; 1 to 6 for ATX headings, 1 or 2 for setext headings.
    pub level: u8,

    /// Whether the heading is setext (if not, ATX).
    pub setext: bool,
}

/// The metadata of an included HTML block.
#[derive(Debug, Clone)]
pub struct NodeHtmlBlock {
    #[doc(hidden)]
    pub block_type: u8,

    /// The literal contents of the HTML block. As with `NodeCodeBlock`, the content is
    /// stored here rather than in any inline.
    pub literal: String,
}

impl NodeValue {
    /// Indicates whether this node is a block node or inline node.
    pub fn block(&self) -> bool {
        matches!(
            *self,
            NodeValue::Document
                | NodeValue::BlockQuote
                | NodeValue::List(..)
                | NodeValue::Item(..)
                | NodeValue::CodeBlock(..)
                | NodeValue::HtmlBlock(..)
                | NodeValue::Paragraph
                | NodeValue::Heading(..)
                | NodeValue::ThematicBreak
        )
    }

    #[doc(hidden)]
    pub fn accepts_lines(&self) -> bool {
        matches!(
            *self,
            NodeValue::Paragraph
                | NodeValue::Heading(..)
                | NodeValue::CodeBlock(..)
                | NodeValue::HtmlBlock(..)
        )
    }

    /// Indicates whether this node may contain inlines.
    pub fn contains_inlines(&self) -> bool {
        matches!(*self, NodeValue::Paragraph | NodeValue::Heading(..))
    }

    /// Return a reference to the text of a `Text` inline, if this node is one.
    pub fn text(&self) -> Option<&str> {
        match *self {
            NodeValue::Text(ref t) => Some(t),
            _ => None,
        }
    }

    /// Return a mutable reference to the text of a `Text` inline, if this node is one.
    pub fn text_mut(&mut self) -> Option<&mut String> {
        match *self {
            NodeValue::Text(ref mut t) => Some(t),
            _ => None,
        }
    }
}

/// A single node in the CommonMark AST.
///
/// The struct contains metadata about the node's position in the original document, and
/// the core enum, `NodeValue`.
#[derive(Debug, Clone)]
pub struct Ast {
    /// The node value itself.
    pub value: NodeValue,

    /// The line in the input document the node starts at.
    pub start_line: u32,

    #[doc(hidden)]
    pub content: String,
    #[doc(hidden)]
    pub open: bool,
    #[doc(hidden)]
    pub last_line_blank: bool,
}

#[doc(hidden)]
pub fn make_block(value: NodeValue, start_line: u32) -> Ast {
    Ast {
        value,
        content: String::new(),
        start_line,
        open: true,
        last_line_blank: false,
    }
}

/// The type of a node within the document.
///
/// It is bound by the lifetime `'a`, which corresponds to the `Arena` nodes are allocated
/// in. `AstNode`s are almost always handled as a reference itself bound by `'a`. Child
/// `Ast`s are wrapped in `RefCell` for interior mutability.
pub type AstNode<'a> = Node<'a, RefCell<Ast>>;

#[doc(hidden)]
pub fn last_child_is_open<'a>(node: &'a AstNode<'a>) -> bool {
    node.last_child().is_some_and(|n| n.data.borrow().open)
}

#[doc(hidden)]
pub fn can_contain_type<'a>(node: &'a AstNode<'a>, child: &NodeValue) -> bool {
    if let NodeValue::Document = *child {
        return false;
    }

    match node.data.borrow().value {
        NodeValue::Document | NodeValue::BlockQuote | NodeValue::Item(..) => {
            child.block() && !matches!(*child, NodeValue::Item(..))
        }

        NodeValue::List(..) => matches!(*child, NodeValue::Item(..)),

        NodeValue::Paragraph
        | NodeValue::Heading(..)
        | NodeValue::Emph
        | NodeValue::Strong
        | NodeValue::Link(..)
        | NodeValue::Image(..) => !child.block(),

        _ => false,
    }
}

#[doc(hidden)]
pub fn ends_with_blank_line<'a>(node: &'a AstNode<'a>) -> bool {
    let mut it = Some(node);
    while let Some(cur) = it {
        if cur.data.borrow().last_line_blank {
            return true;
        }
        match cur.data.borrow().value {
            NodeValue::List(..) | NodeValue::Item(..) => it = cur.last_child(),
            _ => it = None,
        };
    }
    false
}

#[doc(hidden)]
pub fn containing_block<'a>(node: &'a AstNode<'a>) -> Option<&'a AstNode<'a>> {
    let mut ch = Some(node);
    while let Some(n) = ch {
        if n.data.borrow().value.block() {
            return Some(n);
        }
        ch = n.parent();
    }
    None
}
