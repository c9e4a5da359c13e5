use crate::ast::Node;

use super::cutoff::{CutoffBudget, cutoff};
use super::featured::extract_featured;
use super::grid::{DEFAULT_GRID_MAX, group_image_grids};
use super::media::{UrlRewriteOptions, rewrite_urls};

/// Options for one read-path rendering of a document.
#[derive(Debug, Clone)]
pub struct ExcerptOptions {
    pub media: UrlRewriteOptions,
    pub grid_max_elements: usize,
    /// Reduce to the featured/first media node (preview and reply paths).
    pub featured_only: bool,
    pub cutoff: Option<CutoffBudget>,
}

impl ExcerptOptions {
    pub fn new(media: UrlRewriteOptions) -> Self {
        Self {
            media,
            grid_max_elements: DEFAULT_GRID_MAX,
            featured_only: false,
            cutoff: None,
        }
    }
}

/// Applies the read-path pass sequence in its one valid order:
/// URL rewriting → grid grouping → featured filter → cutoff.
///
/// Call sites (article page, public site, previews, search excerpts) differ
/// only in options, so none of them can misorder the passes.
pub fn excerpt(nodes: &[Node], opts: &ExcerptOptions) -> Vec<Node> {
    let rewritten = rewrite_urls(nodes, &opts.media);
    let mut nodes = group_image_grids(rewritten, opts.grid_max_elements);
    if opts.featured_only {
        nodes = extract_featured(&nodes);
    }
    match &opts.cutoff {
        Some(budget) => cutoff(&nodes, budget),
        None => nodes,
    }
}
