//! Tree-rewriting passes applied between parsing and rendering.
//!
//! Every pass is pure: it takes nodes and options, returns new nodes, and
//! shares no state across calls. The one order-sensitive sequence (URL
//! rewriting → grid grouping → cutoff) is packaged by [`excerpt`].

pub mod cutoff;
pub mod excerpt;
pub mod featured;
pub mod grid;
pub mod media;
pub mod title;

pub use cutoff::{CutoffBudget, cutoff};
pub use excerpt::{ExcerptOptions, excerpt};
pub use featured::extract_featured;
pub use grid::{DEFAULT_GRID_MAX, group_image_grids};
pub use media::{RewriteRule, UrlRewriteOptions, rewrite_urls};
pub use title::split_title;
