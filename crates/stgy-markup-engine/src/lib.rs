//! Content-markup engine for stgy.
//!
//! Raw text → block/inline parser → document tree → rewrite passes →
//! HTML or plain-text renderer; or tree → snippet codec → storage and back.
//! Every function is pure and total: no I/O, no shared state, and malformed
//! markup degrades instead of erroring.

pub mod ast;
pub mod parsing;
pub mod render;
pub mod rewrite;
pub mod snippet;

// Re-export key types for easier usage
pub use ast::{Element, Node, SourcePos, Tag};
pub use parsing::parse;
pub use render::{inline_text, render_html, render_text};
pub use rewrite::{
    CutoffBudget, DEFAULT_GRID_MAX, ExcerptOptions, RewriteRule, UrlRewriteOptions, cutoff,
    excerpt, extract_featured, group_image_grids, rewrite_urls, split_title,
};
pub use snippet::{SnippetError, deserialize, serialize, try_deserialize};
