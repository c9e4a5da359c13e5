use crate::ast::{Element, Node, SourcePos, Tag};
use crate::parsing::inline::parse_inline;

use super::classify::LineClass;

/// The leaf block currently being collected, if any.
#[derive(Debug)]
enum LeafState {
    None,
    Paragraph {
        lines: Vec<String>,
        pos: SourcePos,
    },
    Fence {
        lines: Vec<String>,
        pos: SourcePos,
    },
    Quote {
        lines: Vec<String>,
        pos: SourcePos,
    },
    Table {
        rows: Vec<Vec<String>>,
        /// Raw source lines, kept so a lone candidate row can degrade to a
        /// paragraph instead of a one-row table.
        raw_lines: Vec<String>,
        cols: usize,
        pos: SourcePos,
    },
}

/// One open `ul` at a given nesting level.
#[derive(Debug, Default)]
struct ListFrame {
    items: Vec<Node>,
}

/// Line-at-a-time block assembler.
///
/// Holds the open-fence state, the open-list stack, and the pending
/// paragraph/quote/table buffers. Total: any malformed input degrades to
/// paragraphs, and end-of-input flushes every open buffer.
pub struct BlockBuilder {
    leaf: LeafState,
    lists: Vec<ListFrame>,
    list_pos: Option<SourcePos>,
    out: Vec<Node>,
}

impl BlockBuilder {
    pub fn new() -> Self {
        Self {
            leaf: LeafState::None,
            lists: vec![],
            list_pos: None,
            out: vec![],
        }
    }

    pub fn push(&mut self, c: &LineClass<'_>) {
        if matches!(self.leaf, LeafState::Fence { .. }) {
            if c.is_fence {
                self.flush_leaf();
            } else if let LeafState::Fence { lines, .. } = &mut self.leaf {
                lines.push(c.text.to_string());
            }
            return;
        }

        if c.is_fence {
            self.flush_leaf();
            self.close_lists();
            self.leaf = LeafState::Fence {
                lines: vec![],
                pos: c.pos,
            };
            return;
        }

        if c.is_blank {
            self.flush_leaf();
            self.close_lists();
            return;
        }

        if let Some((tag, rest)) = c.heading {
            self.flush_leaf();
            self.close_lists();
            let mut el = Element::with_children(tag, parse_inline(rest));
            el.pos = Some(c.pos);
            self.out.push(Node::Element(el));
            return;
        }

        if let Some((level, content)) = c.list_item {
            self.flush_leaf();
            self.push_list_item(level, content, c.pos);
            return;
        }

        if let Some(content) = c.quote {
            self.close_lists();
            match &mut self.leaf {
                LeafState::Quote { lines, .. } => lines.push(content.to_string()),
                _ => {
                    self.flush_leaf();
                    self.leaf = LeafState::Quote {
                        lines: vec![content.to_string()],
                        pos: c.pos,
                    };
                }
            }
            return;
        }

        if let Some(cells) = &c.table_cells {
            self.close_lists();
            match &mut self.leaf {
                LeafState::Table {
                    rows,
                    raw_lines,
                    cols,
                    ..
                } if *cols == cells.len() => {
                    rows.push(cells.iter().map(|s| s.to_string()).collect());
                    raw_lines.push(c.text.to_string());
                }
                _ => {
                    self.flush_leaf();
                    self.leaf = LeafState::Table {
                        rows: vec![cells.iter().map(|s| s.to_string()).collect()],
                        raw_lines: vec![c.text.to_string()],
                        cols: cells.len(),
                        pos: c.pos,
                    };
                }
            }
            return;
        }

        // Plain paragraph text
        self.close_lists();
        match &mut self.leaf {
            LeafState::Paragraph { lines, .. } => lines.push(c.text.to_string()),
            _ => {
                self.flush_leaf();
                self.leaf = LeafState::Paragraph {
                    lines: vec![c.text.to_string()],
                    pos: c.pos,
                };
            }
        }
    }

    pub fn finish(mut self) -> Vec<Node> {
        // EOF flush: unterminated fences and open lists are closed, not errors
        self.flush_leaf();
        self.close_lists();
        self.out
    }

    fn flush_leaf(&mut self) {
        match std::mem::replace(&mut self.leaf, LeafState::None) {
            LeafState::None => {}
            LeafState::Paragraph { lines, pos } => self.flush_paragraph(lines, pos),
            LeafState::Fence { lines, pos } => {
                let code = Element::with_children(Tag::Code, vec![Node::text(lines.join("\n"))]);
                let mut pre = Element::with_children(Tag::Pre, vec![Node::Element(code)]);
                pre.pos = Some(pos);
                self.out.push(Node::Element(pre));
            }
            LeafState::Quote { lines, pos } => {
                let p = Element::with_children(Tag::P, parse_inline(&lines.join("\n")));
                let mut quote = Element::with_children(Tag::Blockquote, vec![Node::Element(p)]);
                quote.pos = Some(pos);
                self.out.push(Node::Element(quote));
            }
            LeafState::Table {
                rows,
                raw_lines,
                pos,
                ..
            } => {
                if rows.len() >= 2 {
                    let trs = rows
                        .into_iter()
                        .map(|cells| {
                            let tds = cells
                                .into_iter()
                                .map(|cell| {
                                    Node::Element(Element::with_children(
                                        Tag::Td,
                                        parse_inline(&cell),
                                    ))
                                })
                                .collect();
                            Node::Element(Element::with_children(Tag::Tr, tds))
                        })
                        .collect();
                    let mut table = Element::with_children(Tag::Table, trs);
                    table.pos = Some(pos);
                    self.out.push(Node::Element(table));
                } else {
                    // A lone candidate row is not a table
                    self.flush_paragraph(raw_lines, pos);
                }
            }
        }
    }

    fn flush_paragraph(&mut self, lines: Vec<String>, pos: SourcePos) {
        let nodes = parse_inline(&lines.join("\n"));

        // A paragraph that is nothing but images becomes image blocks, so the
        // grid and preview passes see them at the top level.
        if is_pure_image(&nodes) {
            for node in nodes {
                if let Node::Element(mut el) = node
                    && el.is_media()
                {
                    el.pos = Some(pos);
                    self.out.push(Node::Element(el));
                }
            }
            return;
        }

        let mut p = Element::with_children(Tag::P, nodes);
        p.pos = Some(pos);
        self.out.push(Node::Element(p));
    }

    fn push_list_item(&mut self, level: usize, content: &str, pos: SourcePos) {
        if self.lists.is_empty() {
            self.list_pos = Some(pos);
        }
        while self.lists.len() < level + 1 {
            self.lists.push(ListFrame::default());
        }
        while self.lists.len() > level + 1 {
            self.pop_list_frame();
        }
        let li = Element::with_children(Tag::Li, parse_inline(content));
        self.lists[level].items.push(Node::Element(li));
    }

    /// Closes the deepest open list, attaching its `ul` to the parent item
    /// (or to the output when it is the outermost list).
    fn pop_list_frame(&mut self) {
        let Some(frame) = self.lists.pop() else { return };
        let ul = Element::with_children(Tag::Ul, frame.items);

        if let Some(parent) = self.lists.last_mut() {
            match parent.items.last_mut() {
                Some(Node::Element(li)) => li.children.push(Node::Element(ul)),
                // Deep item with no parent item yet: hold it in an empty li
                _ => parent
                    .items
                    .push(Node::Element(Element::with_children(
                        Tag::Li,
                        vec![Node::Element(ul)],
                    ))),
            }
        } else {
            let mut ul = ul;
            ul.pos = self.list_pos.take();
            self.out.push(Node::Element(ul));
        }
    }

    fn close_lists(&mut self) {
        while !self.lists.is_empty() {
            self.pop_list_frame();
        }
        self.list_pos = None;
    }
}

impl Default for BlockBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether inline nodes are only media figures (plus whitespace and breaks).
fn is_pure_image(nodes: &[Node]) -> bool {
    let mut saw_media = false;
    for node in nodes {
        match node {
            Node::Text(t) if t.trim().is_empty() => {}
            Node::Element(el) if el.tag == Tag::Br => {}
            Node::Element(el) if el.is_media() => saw_media = true,
            _ => return false,
        }
    }
    saw_media
}
