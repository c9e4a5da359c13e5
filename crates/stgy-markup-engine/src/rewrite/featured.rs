use crate::ast::{Element, Node};

/// Thumbnail/featured filtering.
///
/// Reduces a tree to the one media node relevant for a compact preview: the
/// first marked `featured`, or else the first media node at all. Documents
/// without media pass through unchanged.
pub fn extract_featured(nodes: &[Node]) -> Vec<Node> {
    let media = collect_media(nodes);
    let chosen = media
        .iter()
        .find(|el| el.img().is_some_and(|img| img.attr("featured").is_some()))
        .or_else(|| media.first());

    match chosen {
        Some(el) => vec![Node::Element((*el).clone())],
        None => nodes.to_vec(),
    }
}

fn collect_media<'a>(nodes: &'a [Node]) -> Vec<&'a Element> {
    let mut out = vec![];
    for node in nodes {
        if let Node::Element(el) = node {
            if el.is_media() {
                out.push(el);
            } else {
                out.extend(collect_media(&el.children));
            }
        }
    }
    out
}
