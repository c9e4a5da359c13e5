use crate::ast::{Element, Node, Tag};

/// Renders nodes to plain text: paragraph breaks as blank lines, `br` as a
/// newline, list items as `- ` lines, table cells joined with ` | `.
///
/// No markup, no escaping — the output is text, not HTML.
pub fn render_text(nodes: &[Node]) -> String {
    let blocks: Vec<String> = nodes.iter().filter_map(render_block).collect();
    blocks.join("\n\n")
}

/// Concatenated text content of inline nodes (`br` becomes a newline,
/// images contribute their alt text). Also used for title extraction.
pub fn inline_text(nodes: &[Node]) -> String {
    let mut out = String::new();
    collect_text(&mut out, nodes);
    out
}

fn render_block(node: &Node) -> Option<String> {
    let el = match node {
        Node::Text(t) => return non_empty(t.clone()),
        Node::Element(el) => el,
    };
    match el.tag {
        Tag::Ul => non_empty(list_lines(el, 0).join("\n")),
        Tag::Table => non_empty(table_lines(el).join("\n")),
        Tag::Br => None,
        _ if el.is_image_grid() => {
            non_empty(el.children.iter().filter_map(render_block).collect::<Vec<_>>().join("\n"))
        }
        _ => non_empty(inline_text(&el.children).trim_end().to_string()),
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() { None } else { Some(s) }
}

fn collect_text(out: &mut String, nodes: &[Node]) {
    for node in nodes {
        match node {
            Node::Text(t) => out.push_str(t),
            Node::Element(el) => match el.tag {
                Tag::Br => out.push('\n'),
                Tag::Img => out.push_str(el.attr("alt").unwrap_or_default()),
                _ => collect_text(out, &el.children),
            },
        }
    }
}

fn list_lines(ul: &Element, depth: usize) -> Vec<String> {
    let mut lines = vec![];
    for item in &ul.children {
        let Some(li) = item.as_element() else { continue };
        let (inline, nested): (Vec<&Node>, Vec<&Node>) = li
            .children
            .iter()
            .partition(|n| !n.as_element().is_some_and(|el| el.tag == Tag::Ul));

        let own: Vec<Node> = inline.into_iter().cloned().collect();
        lines.push(format!("{}- {}", "  ".repeat(depth), inline_text(&own)));

        for sub in nested {
            if let Some(sub_ul) = sub.as_element() {
                lines.extend(list_lines(sub_ul, depth + 1));
            }
        }
    }
    lines
}

fn table_lines(table: &Element) -> Vec<String> {
    table
        .children
        .iter()
        .filter_map(|row| row.as_element())
        .map(|tr| {
            tr.children
                .iter()
                .filter_map(|cell| cell.as_element())
                .map(|td| inline_text(&td.children))
                .collect::<Vec<_>>()
                .join(" | ")
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::parse;
    use pretty_assertions::assert_eq;

    #[test]
    fn paragraphs_join_with_blank_lines() {
        assert_eq!(render_text(&parse("one\n\ntwo")), "one\n\ntwo");
    }

    #[test]
    fn br_is_a_single_newline() {
        assert_eq!(render_text(&parse("a\nb")), "a\nb");
    }

    #[test]
    fn markup_is_omitted() {
        assert_eq!(render_text(&parse("**b** and [x](/u)")), "b and x");
    }

    #[test]
    fn list_items_get_dash_prefixes() {
        assert_eq!(render_text(&parse("- a\n  - b\n- c")), "- a\n  - b\n- c");
    }

    #[test]
    fn table_cells_join_with_pipes() {
        assert_eq!(render_text(&parse("|a|b|\n|c|d|")), "a | b\nc | d");
    }

    #[test]
    fn code_block_text_is_kept() {
        assert_eq!(render_text(&parse("```\nlet x;\n```")), "let x;");
    }

    #[test]
    fn image_contributes_alt_text() {
        assert_eq!(render_text(&parse("![a cat](/c.jpg)")), "a cat");
    }

    #[test]
    fn title_body_scenario_renders_body_only() {
        let (title, body) = crate::rewrite::split_title(&parse("# Title\n\nBody text."));
        assert_eq!(title.as_deref(), Some("Title"));
        assert_eq!(render_text(&body), "Body text.");
    }
}
