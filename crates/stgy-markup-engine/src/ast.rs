//! The document tree shared by the parser, rewrite passes, and renderers.
//!
//! A tree is built fresh per parse and never mutated afterwards: rewrite
//! passes return new trees, so any pass sequence is free of aliasing hazards.

/// Closed set of element tags the parser can emit.
///
/// Renderers match on this exhaustively, so adding a block kind is a
/// compile-time-checked change across both renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    H1,
    H2,
    H3,
    P,
    Blockquote,
    Ul,
    Li,
    Table,
    Tr,
    Td,
    Pre,
    Code,
    A,
    Img,
    Figure,
    Strong,
    Em,
    U,
    Br,
}

impl Tag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tag::H1 => "h1",
            Tag::H2 => "h2",
            Tag::H3 => "h3",
            Tag::P => "p",
            Tag::Blockquote => "blockquote",
            Tag::Ul => "ul",
            Tag::Li => "li",
            Tag::Table => "table",
            Tag::Tr => "tr",
            Tag::Td => "td",
            Tag::Pre => "pre",
            Tag::Code => "code",
            Tag::A => "a",
            Tag::Img => "img",
            Tag::Figure => "figure",
            Tag::Strong => "strong",
            Tag::Em => "em",
            Tag::U => "u",
            Tag::Br => "br",
        }
    }

    /// Inverse of [`Tag::as_str`]. `None` for anything outside the closed set.
    pub fn from_str(s: &str) -> Option<Tag> {
        Some(match s {
            "h1" => Tag::H1,
            "h2" => Tag::H2,
            "h3" => Tag::H3,
            "p" => Tag::P,
            "blockquote" => Tag::Blockquote,
            "ul" => Tag::Ul,
            "li" => Tag::Li,
            "table" => Tag::Table,
            "tr" => Tag::Tr,
            "td" => Tag::Td,
            "pre" => Tag::Pre,
            "code" => Tag::Code,
            "a" => Tag::A,
            "img" => Tag::Img,
            "figure" => Tag::Figure,
            "strong" => Tag::Strong,
            "em" => Tag::Em,
            "u" => Tag::U,
            "br" => Tag::Br,
            _ => return None,
        })
    }
}

/// Source position of a top-level block, tracked by the block parser.
///
/// `char_offset` is the cumulative character (not byte) offset of the block's
/// first line in the original input; `line` is 1-based. The HTML renderer
/// emits these as `data-char-position` / `data-line-position` when asked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourcePos {
    pub char_offset: usize,
    pub line: usize,
}

/// A node in the document tree: a raw text leaf or a tagged element.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Leaf text. Raw and unescaped; escaping happens at render time only.
    Text(String),
    Element(Element),
}

/// An element with an ordered, unique-key attribute list and child nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: Tag,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
    /// Set by the parser on top-level blocks; never persisted in snippets.
    pub pos: Option<SourcePos>,
}

/// `class` value marking a normalized image block (`figure` > `img`).
pub const CLASS_MEDIA: &str = "media";

/// `class` value marking a grid container produced by image-grid grouping.
pub const CLASS_IMAGE_GRID: &str = "image-grid";

/// `class` value of the omission marker appended by cutoff.
pub const CLASS_OMITTED: &str = "omitted";

impl Element {
    pub fn new(tag: Tag) -> Self {
        Self {
            tag,
            attrs: vec![],
            children: vec![],
            pos: None,
        }
    }

    pub fn with_children(tag: Tag, children: Vec<Node>) -> Self {
        Self {
            tag,
            attrs: vec![],
            children,
            pos: None,
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Upserts an attribute, keeping insertion order and key uniqueness.
    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attrs.iter_mut().find(|(k, _)| k == name) {
            Some((_, v)) => *v = value,
            None => self.attrs.push((name.to_string(), value)),
        }
    }

    /// Whether this element is a normalized image block.
    pub fn is_media(&self) -> bool {
        self.tag == Tag::Figure && self.attr("class") == Some(CLASS_MEDIA)
    }

    /// Whether this element is a grid container of image blocks.
    pub fn is_image_grid(&self) -> bool {
        self.tag == Tag::Figure && self.attr("class") == Some(CLASS_IMAGE_GRID)
    }

    /// The `img` child of a media figure, if present.
    pub fn img(&self) -> Option<&Element> {
        self.children.iter().find_map(|c| match c {
            Node::Element(el) if el.tag == Tag::Img => Some(el),
            _ => None,
        })
    }
}

impl Node {
    pub fn text(s: impl Into<String>) -> Node {
        Node::Text(s.into())
    }

    pub fn br() -> Node {
        Node::Element(Element::new(Tag::Br))
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        }
    }

    /// Builds the canonical image block: `figure class="media"` wrapping an
    /// `img` with `src`, `alt`, and any annotation attributes.
    pub fn media(url: &str, alt: &str, annotations: Vec<(String, String)>) -> Node {
        let mut img = Element::new(Tag::Img);
        img.set_attr("src", url);
        img.set_attr("alt", alt);
        for (k, v) in annotations {
            img.set_attr(&k, v);
        }
        let mut figure = Element::with_children(Tag::Figure, vec![Node::Element(img)]);
        figure.set_attr("class", CLASS_MEDIA);
        Node::Element(figure)
    }

    pub fn link(url: &str, label: &str) -> Node {
        let mut a = Element::with_children(Tag::A, vec![Node::text(label)]);
        a.set_attr("href", url);
        Node::Element(a)
    }
}
