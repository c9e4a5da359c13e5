use crate::ast::{Node, Tag};
use crate::render::inline_text;

/// Title/body separation.
///
/// When the document opens with a heading, its inline text becomes the title
/// and the remaining blocks the body; otherwise the whole document is the
/// body. Used to synthesize page titles and descriptions from content.
pub fn split_title(nodes: &[Node]) -> (Option<String>, Vec<Node>) {
    match nodes.first().and_then(|n| n.as_element()) {
        Some(el) if matches!(el.tag, Tag::H1 | Tag::H2 | Tag::H3) => {
            let title = inline_text(&el.children);
            (Some(title), nodes[1..].to_vec())
        }
        _ => (None, nodes.to_vec()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::parse;
    use pretty_assertions::assert_eq;

    #[test]
    fn leading_heading_becomes_title() {
        let doc = parse("# Title\n\nBody text.");
        let (title, body) = split_title(&doc);
        assert_eq!(title.as_deref(), Some("Title"));
        assert_eq!(body.len(), 1);
        assert_eq!(body[0].as_element().unwrap().tag, Tag::P);
    }

    #[test]
    fn no_heading_means_no_title() {
        let doc = parse("Just a paragraph.");
        let (title, body) = split_title(&doc);
        assert_eq!(title, None);
        assert_eq!(body.len(), 1);
    }

    #[test]
    fn formatted_heading_flattens_to_text() {
        let doc = parse("## A **bold** title");
        let (title, _) = split_title(&doc);
        assert_eq!(title.as_deref(), Some("A bold title"));
    }

    #[test]
    fn mid_document_heading_is_not_a_title() {
        let doc = parse("intro\n\n# Late heading");
        let (title, body) = split_title(&doc);
        assert_eq!(title, None);
        assert_eq!(body.len(), 2);
    }
}
