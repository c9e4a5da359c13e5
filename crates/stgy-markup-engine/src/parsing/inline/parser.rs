use crate::ast::{Element, Node, Tag};

use super::{
    cursor::Cursor,
    kinds::{Autolink, CodeSpan, Emphasis, Link, Media},
};

/// Parses one block's raw text into a sequence of inline nodes.
///
/// # Precedence
/// Constructs are tried in a fixed order to avoid ambiguous overlaps:
/// code spans (raw zone, contents never re-scanned), images, links,
/// autolinks, bold, underline, italic, then literal text. Embedded single
/// newlines become `br` nodes. Unterminated markers fall back to literal
/// text rather than failing.
///
/// No escaping happens here; the same tree feeds either renderer.
pub fn parse_inline(s: &str) -> Vec<Node> {
    let mut cur = Cursor::new(s);
    let mut out: Vec<Node> = vec![];
    let mut text = String::new();

    while let Some(c) = cur.peek() {
        let node = match c {
            '`' => try_parse_code_span(&mut cur),
            '!' => try_parse_image(&mut cur),
            '[' => try_parse_link(&mut cur),
            '*' | '_' => try_parse_emphasis(&mut cur),
            // Autolinks only start at a word boundary, so `xhttp://` stays text
            'h' if at_boundary(&text) => try_parse_autolink(&mut cur),
            _ => None,
        };

        if let Some(node) = node {
            flush_text(&mut out, &mut text);
            out.push(node);
            continue;
        }

        if c == '\n' {
            flush_text(&mut out, &mut text);
            out.push(Node::br());
        } else {
            text.push(c);
        }
        cur.bump();
    }

    flush_text(&mut out, &mut text);
    out
}

fn flush_text(out: &mut Vec<Node>, text: &mut String) {
    if !text.is_empty() {
        out.push(Node::Text(std::mem::take(text)));
    }
}

fn at_boundary(pending: &str) -> bool {
    pending.chars().next_back().is_none_or(|c| !c.is_alphanumeric())
}

fn try_parse_code_span(cur: &mut Cursor<'_>) -> Option<Node> {
    let saved = cur.clone();
    cur.bump_n(CodeSpan::TICK.len());

    let Some(inner) = cur.take_until(CodeSpan::TICK) else {
        // Not closed, restore cursor
        *cur = saved;
        return None;
    };
    cur.bump_n(CodeSpan::TICK.len());

    Some(Node::Element(Element::with_children(
        Tag::Code,
        vec![Node::text(inner)],
    )))
}

fn try_parse_image(cur: &mut Cursor<'_>) -> Option<Node> {
    if !cur.starts_with(Media::OPEN) {
        return None;
    }
    let saved = cur.clone();
    cur.bump_n(Media::OPEN.len());

    let result = (|| {
        let alt = cur.take_until(Media::ALT_CLOSE)?;
        cur.bump_n(Media::ALT_CLOSE.len());
        if !cur.starts_with(Media::URL_OPEN) {
            return None;
        }
        cur.bump_n(Media::URL_OPEN.len());
        let url = cur.take_until(Media::URL_CLOSE)?;
        cur.bump_n(Media::URL_CLOSE.len());
        let annotations = parse_annotations(cur);
        Some(Node::media(url.trim(), alt, annotations))
    })();

    if result.is_none() {
        *cur = saved;
    }
    result
}

/// Parses the trailing `{key=value,...}` annotation suffix of an image.
///
/// The suffix never reaches the rendered alt text; a malformed or
/// unterminated suffix is left in place as literal text.
fn parse_annotations(cur: &mut Cursor<'_>) -> Vec<(String, String)> {
    if !cur.starts_with(Media::ATTRS_OPEN) {
        return vec![];
    }
    let saved = cur.clone();
    cur.bump_n(Media::ATTRS_OPEN.len());

    let Some(body) = cur.take_until(Media::ATTRS_CLOSE) else {
        *cur = saved;
        return vec![];
    };
    cur.bump_n(Media::ATTRS_CLOSE.len());

    body.split(Media::ATTR_SEP)
        .filter_map(|pair| {
            let (k, v) = pair.split_once(Media::ATTR_EQ)?;
            Some((k.trim().to_string(), v.trim().to_string()))
        })
        .collect()
}

fn try_parse_link(cur: &mut Cursor<'_>) -> Option<Node> {
    if !cur.starts_with(Link::OPEN) {
        return None;
    }
    let saved = cur.clone();
    cur.bump_n(Link::OPEN.len());

    let result = (|| {
        let label = cur.take_until(Link::LABEL_CLOSE)?;
        cur.bump_n(Link::LABEL_CLOSE.len());
        if !cur.starts_with(Link::URL_OPEN) {
            return None;
        }
        cur.bump_n(Link::URL_OPEN.len());
        let url = cur.take_until(Link::URL_CLOSE)?;
        cur.bump_n(Link::URL_CLOSE.len());
        Some(Node::link(url.trim(), label))
    })();

    if result.is_none() {
        *cur = saved;
    }
    result
}

fn try_parse_autolink(cur: &mut Cursor<'_>) -> Option<Node> {
    if !Autolink::SCHEMES.iter().any(|s| cur.starts_with(s)) {
        return None;
    }
    let url = cur.take_while(|c| !Autolink::ends_url(c));
    Some(Node::link(url, url))
}

fn try_parse_emphasis(cur: &mut Cursor<'_>) -> Option<Node> {
    for (delim, tag) in Emphasis::DELIMITERS {
        if !cur.starts_with(delim) {
            continue;
        }
        let saved = cur.clone();
        cur.bump_n(delim.len());

        match cur.take_until(delim) {
            Some(inner) if !inner.is_empty() => {
                cur.bump_n(delim.len());
                // Emphasis interiors are re-scanned; code spans are not
                return Some(Node::Element(Element::with_children(
                    tag,
                    parse_inline(inner),
                )));
            }
            _ => {
                *cur = saved;
                return None;
            }
        }
    }
    None
}
