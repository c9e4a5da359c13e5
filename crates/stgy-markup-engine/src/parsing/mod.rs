pub mod blocks;
pub mod inline;
pub mod lines;

use crate::ast::Node;
use blocks::{BlockBuilder, classify};
use lines::scan_lines;

/// Parses raw markup text into a sequence of top-level block nodes.
///
/// Total: malformed input degrades to plain paragraphs, unterminated
/// constructs are closed at end-of-input, and no input ever fails.
pub fn parse(text: &str) -> Vec<Node> {
    let mut builder = BlockBuilder::new();
    for line in scan_lines(text) {
        builder.push(&classify(&line));
    }
    builder.finish()
}
