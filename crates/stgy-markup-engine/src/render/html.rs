use std::fmt::Write as _;

use crate::ast::{Element, Node, Tag};

/// Renders nodes to an HTML string.
///
/// All text content and attribute values are escaped here and nowhere else;
/// the output is injected into pages as-is, so this is the XSS boundary.
/// With `use_position_attributes` set, top-level blocks carry
/// `data-char-position`/`data-line-position` from the offsets the parser
/// tracked (used for scroll-to-anchor; never recomputed from output).
pub fn render_html(nodes: &[Node], use_position_attributes: bool) -> String {
    let mut out = String::new();
    for (i, node) in nodes.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        write_node(&mut out, node, use_position_attributes, true);
    }
    out
}

fn write_node(out: &mut String, node: &Node, positions: bool, top: bool) {
    match node {
        Node::Text(t) => out.push_str(&html_escape::encode_safe(t)),
        Node::Element(el) => write_element(out, el, positions, top),
    }
}

/// Void elements close with `>` and never take children.
fn is_void(tag: Tag) -> bool {
    matches!(tag, Tag::Br | Tag::Img)
}

/// Attribute names reach output verbatim, so only a closed character set is
/// allowed through; everything else is dropped. Values are escaped instead.
fn is_safe_attr_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

fn write_element(out: &mut String, el: &Element, positions: bool, top: bool) {
    out.push('<');
    out.push_str(el.tag.as_str());
    for (k, v) in &el.attrs {
        if !is_safe_attr_name(k) {
            continue;
        }
        let _ = write!(out, " {}=\"{}\"", k, html_escape::encode_quoted_attribute(v));
    }
    if positions
        && top
        && let Some(pos) = el.pos
    {
        let _ = write!(
            out,
            " data-char-position=\"{}\" data-line-position=\"{}\"",
            pos.char_offset, pos.line
        );
    }
    out.push('>');

    if is_void(el.tag) {
        return;
    }
    for child in &el.children {
        write_node(out, child, positions, false);
    }
    let _ = write!(out, "</{}>", el.tag.as_str());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::parse;
    use pretty_assertions::assert_eq;

    #[test]
    fn heading_and_paragraph() {
        let html = render_html(&parse("# Title\n\nBody text."), false);
        assert_eq!(html, "<h1>Title</h1>\n<p>Body text.</p>");
    }

    #[test]
    fn text_content_is_escaped() {
        let html = render_html(&parse("<script>alert('x') & \"y\""), false);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("&amp;"));
        assert!(!html.contains('"'));
    }

    #[test]
    fn attribute_values_are_escaped() {
        let html = render_html(&parse(r#"[x](/p?a="><script>)"#), false);
        assert!(!html.contains(r#""><script>"#));
    }

    #[test]
    fn unsafe_attribute_names_are_dropped() {
        let html = render_html(&parse("![a](/i.jpg){on error=alert}"), false);
        assert!(!html.contains("alert"));
    }

    #[test]
    fn br_is_void() {
        let html = render_html(&parse("a\nb"), false);
        assert_eq!(html, "<p>a<br>b</p>");
    }

    #[test]
    fn img_is_void_inside_figure() {
        let html = render_html(&parse("![cat](/a.jpg)"), false);
        assert_eq!(
            html,
            "<figure class=\"media\"><img src=\"/a.jpg\" alt=\"cat\"></figure>"
        );
    }

    #[test]
    fn position_attributes_on_top_level_blocks() {
        let html = render_html(&parse("# T\n\nbody"), true);
        assert!(html.contains("<h1 data-char-position=\"0\" data-line-position=\"1\">"));
        assert!(html.contains("<p data-char-position=\"5\" data-line-position=\"3\">"));
    }

    #[test]
    fn position_attributes_off_by_default_path() {
        let html = render_html(&parse("# T"), false);
        assert_eq!(html, "<h1>T</h1>");
    }

    #[test]
    fn nested_children_never_get_position_attributes() {
        let html = render_html(&parse("- a\n- b"), true);
        assert!(html.contains("<ul data-char-position="));
        assert!(!html.contains("<li data-char-position="));
    }

    #[test]
    fn emphasis_nesting_renders() {
        let html = render_html(&parse("**a *b* c**"), false);
        assert_eq!(html, "<p><strong>a <em>b</em> c</strong></p>");
    }

    #[test]
    fn code_block_preserves_raw_text_escaped() {
        let html = render_html(&parse("```\n<b>&\n```"), false);
        assert_eq!(html, "<pre><code>&lt;b&gt;&amp;</code></pre>");
    }
}
