use crate::ast::{CLASS_OMITTED, Element, Node, Tag};

/// Budgets for length-bounded truncation.
///
/// `max_len` is a character budget, `max_height` a row budget over top-level
/// blocks. An image or grid is priced as `img_len` characters and
/// `img_height` rows regardless of its real size, so a caption-only excerpt
/// and an image-heavy excerpt read as comparable lengths. An absent bound
/// means unlimited; a negative `max_len` or zero `max_height` cuts
/// everything.
#[derive(Debug, Clone)]
pub struct CutoffBudget {
    pub max_len: Option<i64>,
    pub max_height: Option<i64>,
    pub img_len: i64,
    pub img_height: i64,
}

impl Default for CutoffBudget {
    fn default() -> Self {
        // Read-path defaults: an image is priced like a short paragraph
        Self {
            max_len: None,
            max_height: None,
            img_len: 100,
            img_height: 3,
        }
    }
}

/// Remaining budget, threaded through the walk and returned by each call.
#[derive(Debug, Clone, Copy)]
struct Remaining {
    len: Option<i64>,
    height: Option<i64>,
}

impl Remaining {
    fn lacks_len(&self, cost: i64) -> bool {
        self.len.is_some_and(|l| l < cost)
    }

    fn lacks_height(&self, cost: i64) -> bool {
        self.height.is_some_and(|h| h < cost)
    }

    fn charge(mut self, len: i64, height: i64) -> Self {
        if let Some(l) = &mut self.len {
            *l -= len;
        }
        if let Some(h) = &mut self.height {
            *h -= height;
        }
        self
    }
}

/// Length-bounded truncation pass.
///
/// Depth-first walk with an explicit budget accumulator. Text is cut exactly
/// at the remaining-character boundary (never splitting a character); `br`
/// costs nothing; media and grids are atomic. The omission marker is
/// appended only when content was discarded, and is itself budget-free, so
/// output that fits re-truncates to itself.
pub fn cutoff(nodes: &[Node], budget: &CutoffBudget) -> Vec<Node> {
    let remaining = Remaining {
        len: budget.max_len,
        height: budget.max_height,
    };
    let (mut out, _, truncated) = take_blocks(nodes, remaining, budget);
    if truncated {
        out.push(omission_marker());
    }
    out
}

/// The terminal marker appended when content was discarded.
pub fn omission_marker() -> Node {
    let mut p = Element::with_children(Tag::P, vec![Node::text("…")]);
    p.set_attr("class", CLASS_OMITTED);
    Node::Element(p)
}

fn is_atomic(node: &Node) -> bool {
    node.as_element()
        .is_some_and(|el| el.is_media() || el.is_image_grid())
}

fn take_blocks(
    nodes: &[Node],
    remaining: Remaining,
    budget: &CutoffBudget,
) -> (Vec<Node>, Remaining, bool) {
    let mut out = Vec::with_capacity(nodes.len());
    let mut remaining = remaining;

    for node in nodes {
        if is_atomic(node) {
            if remaining.lacks_len(budget.img_len) || remaining.lacks_height(budget.img_height) {
                return (out, remaining, true);
            }
            remaining = remaining.charge(budget.img_len, budget.img_height);
            out.push(node.clone());
            continue;
        }

        // Every other top-level block costs one row, regardless of nesting
        if remaining.lacks_height(1) || remaining.lacks_len(1) {
            return (out, remaining, true);
        }
        remaining = remaining.charge(0, 1);

        let (taken, rem, truncated) = take_node(node, remaining, budget);
        remaining = rem;
        if let Some(n) = taken {
            out.push(n);
        }
        if truncated {
            return (out, remaining, true);
        }
    }
    (out, remaining, false)
}

fn take_node(
    node: &Node,
    remaining: Remaining,
    budget: &CutoffBudget,
) -> (Option<Node>, Remaining, bool) {
    match node {
        Node::Text(t) => {
            let Some(rem) = remaining.len else {
                return (Some(node.clone()), remaining, false);
            };
            let count = t.chars().count() as i64;
            if count <= rem {
                return (Some(node.clone()), remaining.charge(count, 0), false);
            }
            // Cut exactly at the remaining-budget boundary
            let cut: String = t.chars().take(rem.max(0) as usize).collect();
            let taken = (!cut.is_empty()).then(|| Node::Text(cut));
            (taken, remaining.charge(rem, 0), true)
        }
        Node::Element(el) if el.tag == Tag::Br => (Some(node.clone()), remaining, false),
        Node::Element(el) if el.is_media() || el.is_image_grid() => {
            // Inline media: priced by img_len; rows are a block-level cost
            if remaining.lacks_len(budget.img_len) {
                return (None, remaining, true);
            }
            (Some(node.clone()), remaining.charge(budget.img_len, 0), false)
        }
        Node::Element(el) => {
            let (children, rem, truncated) = take_children(&el.children, remaining, budget);
            let mut rebuilt = el.clone();
            rebuilt.children = children;
            (Some(Node::Element(rebuilt)), rem, truncated)
        }
    }
}

fn take_children(
    nodes: &[Node],
    remaining: Remaining,
    budget: &CutoffBudget,
) -> (Vec<Node>, Remaining, bool) {
    let mut out = Vec::with_capacity(nodes.len());
    let mut remaining = remaining;
    for node in nodes {
        let (taken, rem, truncated) = take_node(node, remaining, budget);
        remaining = rem;
        if let Some(n) = taken {
            out.push(n);
        }
        if truncated {
            return (out, remaining, true);
        }
    }
    (out, remaining, false)
}
