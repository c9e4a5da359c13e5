use crate::ast::{CLASS_IMAGE_GRID, Element, Node, Tag};

/// Default cap on images per grid container.
pub const DEFAULT_GRID_MAX: usize = 5;

/// Image-grid grouping pass.
///
/// Runs of 2+ consecutive pure-image blocks are wrapped in grid containers
/// of at most `max_elements`; longer runs are chunked into successive
/// containers and a trailing chunk of 1 stays standalone. Must run after URL
/// rewriting and before cutoff (cutoff treats a grid as one atomic unit).
pub fn group_image_grids(nodes: Vec<Node>, max_elements: usize) -> Vec<Node> {
    let max_elements = max_elements.max(2);
    let mut out = Vec::with_capacity(nodes.len());
    let mut run: Vec<Node> = vec![];

    for node in nodes {
        let is_image = node.as_element().is_some_and(|el| el.is_media());
        if is_image {
            run.push(node);
        } else {
            flush_run(&mut out, &mut run, max_elements);
            out.push(node);
        }
    }
    flush_run(&mut out, &mut run, max_elements);
    out
}

fn flush_run(out: &mut Vec<Node>, run: &mut Vec<Node>, max_elements: usize) {
    if run.is_empty() {
        return;
    }
    let run = std::mem::take(run);
    if run.len() < 2 {
        out.extend(run);
        return;
    }

    let mut rest = run.as_slice();
    while !rest.is_empty() {
        let take = rest.len().min(max_elements);
        let (chunk, tail) = rest.split_at(take);
        rest = tail;
        if chunk.len() < 2 {
            out.extend(chunk.iter().cloned());
            continue;
        }
        let mut grid = Element::with_children(Tag::Figure, chunk.to_vec());
        grid.set_attr("class", CLASS_IMAGE_GRID);
        grid.pos = chunk
            .first()
            .and_then(|n| n.as_element())
            .and_then(|el| el.pos);
        out.push(Node::Element(grid));
    }
}
