//! Markup trees for static page content.
//!
//! A [`Node`] owns its children outright. Trees are built bottom-up with the
//! constructor functions at the end of this module, so a node is never
//! observable before its children exist.

use std::borrow::Cow;

/// Literal text carried by a node. Page content is almost always `'static`.
pub type Text = Cow<'static, str>;

/// Heading level (`h1` through `h6`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
}

impl HeadingLevel {
    /// Numeric level, 1-6.
    pub fn as_u8(self) -> u8 {
        match self {
            Self::H1 => 1,
            Self::H2 => 2,
            Self::H3 => 3,
            Self::H4 => 4,
            Self::H5 => 5,
            Self::H6 => 6,
        }
    }

    fn tag(self) -> &'static str {
        match self {
            Self::H1 => "h1",
            Self::H2 => "h2",
            Self::H3 => "h3",
            Self::H4 => "h4",
            Self::H5 => "h5",
            Self::H6 => "h6",
        }
    }
}

/// One node of a markup tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Generic container (`div`) with an optional class list.
    Element(Element),

    /// Literal text.
    Text(Text),

    /// Paragraph.
    Paragraph(Vec<Node>),

    /// Section heading.
    Heading {
        /// Heading level
        level: HeadingLevel,
        /// Inline content
        children: Vec<Node>,
    },

    /// Unordered list. Only list items can appear directly inside it.
    List(Vec<ListItem>),

    /// Hyperlink.
    Link(Link),

    /// Strong emphasis.
    Strong(Vec<Node>),
}

/// A generic container element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Tag name
    pub tag: &'static str,
    /// Space-separated class list, interpreted by the stylesheet
    pub class: Option<Text>,
    /// Child nodes in document order
    pub children: Vec<Node>,
}

/// An item of an unordered list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    pub children: Vec<Node>,
}

/// A hyperlink. The destination is never derived from the label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    /// Destination URI
    pub href: Text,
    /// Visible label
    pub label: Text,
}

impl Node {
    /// Serialize this tree as an HTML fragment.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Node::Element(element) => {
                out.push('<');
                out.push_str(element.tag);
                if let Some(class) = &element.class {
                    out.push_str(" class=\"");
                    escape_into(class, out);
                    out.push('"');
                }
                out.push('>');
                write_children(&element.children, out);
                close(element.tag, out);
            }
            Node::Text(text) => escape_into(text, out),
            Node::Paragraph(children) => {
                out.push_str("<p>");
                write_children(children, out);
                close("p", out);
            }
            Node::Heading { level, children } => {
                out.push('<');
                out.push_str(level.tag());
                out.push('>');
                write_children(children, out);
                close(level.tag(), out);
            }
            Node::List(items) => {
                out.push_str("<ul>");
                for item in items {
                    out.push_str("<li>");
                    write_children(&item.children, out);
                    close("li", out);
                }
                close("ul", out);
            }
            Node::Link(link) => {
                out.push_str("<a href=\"");
                escape_into(&link.href, out);
                out.push_str("\">");
                escape_into(&link.label, out);
                close("a", out);
            }
            Node::Strong(children) => {
                out.push_str("<strong>");
                write_children(children, out);
                close("strong", out);
            }
        }
    }

    /// Flatten this tree to plain text.
    ///
    /// Block-level nodes (containers, paragraphs, headings, list items) start
    /// on their own line; inline nodes run together. Link labels are kept.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.write_text(&mut out);
        out.trim().to_string()
    }

    fn write_text(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(text),
            Node::Link(link) => out.push_str(&link.label),
            Node::Strong(children) => children.iter().for_each(|c| c.write_text(out)),
            Node::Element(Element { children, .. })
            | Node::Paragraph(children)
            | Node::Heading { children, .. } => block_text(children, out),
            Node::List(items) => {
                for item in items {
                    block_text(&item.children, out);
                }
            }
        }
    }

    /// Visit every node of the tree in document order, parents first.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Node)) {
        visit(self);
        match self {
            Node::Element(Element { children, .. })
            | Node::Paragraph(children)
            | Node::Heading { children, .. }
            | Node::Strong(children) => children.iter().for_each(|c| c.walk(visit)),
            Node::List(items) => items
                .iter()
                .flat_map(|item| item.children.iter())
                .for_each(|c| c.walk(visit)),
            Node::Text(_) | Node::Link(_) => {}
        }
    }

    /// All links in document order.
    pub fn links(&self) -> Vec<&Link> {
        let mut links = Vec::new();
        self.walk(&mut |node| {
            if let Node::Link(link) = node {
                links.push(link);
            }
        });
        links
    }

    /// All headings in document order, with their text.
    pub fn headings(&self) -> Vec<(HeadingLevel, String)> {
        let mut headings = Vec::new();
        self.walk(&mut |node| {
            if let Node::Heading { level, .. } = node {
                headings.push((*level, node.text_content()));
            }
        });
        headings
    }

    /// Children of a node that has them; empty for text and links.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Element(Element { children, .. })
            | Node::Paragraph(children)
            | Node::Heading { children, .. }
            | Node::Strong(children) => children,
            Node::List(_) | Node::Text(_) | Node::Link(_) => &[],
        }
    }
}

fn write_children(children: &[Node], out: &mut String) {
    for child in children {
        child.write_html(out);
    }
}

fn close(tag: &str, out: &mut String) {
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

fn block_text(children: &[Node], out: &mut String) {
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
    children.iter().for_each(|c| c.write_text(out));
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
}

/// Escape text for use in HTML content and double-quoted attributes.
fn escape_into(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
}

/// `div` container with a class list.
pub fn div(class: impl Into<Text>, children: Vec<Node>) -> Node {
    Node::Element(Element {
        tag: "div",
        class: Some(class.into()),
        children,
    })
}

pub fn text(text: impl Into<Text>) -> Node {
    Node::Text(text.into())
}

pub fn p(children: Vec<Node>) -> Node {
    Node::Paragraph(children)
}

pub fn strong(children: Vec<Node>) -> Node {
    Node::Strong(children)
}

pub fn heading(level: HeadingLevel, children: Vec<Node>) -> Node {
    Node::Heading { level, children }
}

pub fn ul(items: Vec<ListItem>) -> Node {
    Node::List(items)
}

pub fn li(children: Vec<Node>) -> ListItem {
    ListItem { children }
}

pub fn a(href: impl Into<Text>, label: impl Into<Text>) -> Node {
    Node::Link(Link {
        href: href.into(),
        label: label.into(),
    })
}
