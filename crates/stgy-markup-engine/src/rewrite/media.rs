use regex::Regex;

use crate::ast::{Element, Node, Tag};

/// One ordered URL rewrite rule: pattern → replacement template.
///
/// Templates use `$1`-style capture references. When `use_thumbnail` is set
/// and a rule carries a `thumbnail` template, that template wins, mapping the
/// master path to its thumbnail-shaped storage path.
#[derive(Debug, Clone)]
pub struct RewriteRule {
    pub pattern: Regex,
    pub replacement: String,
    pub thumbnail: Option<String>,
}

impl RewriteRule {
    pub fn new(pattern: &str, replacement: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            replacement: brace_captures(replacement),
            thumbnail: None,
        })
    }

    pub fn with_thumbnail(mut self, thumbnail: &str) -> Self {
        self.thumbnail = Some(brace_captures(thumbnail));
        self
    }
}

/// Rewrites `$1`-style capture references to `${1}` so a template like
/// `$2$3_image.webp` expands group 3 rather than a group named `3_image`.
fn brace_captures(template: &str) -> String {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '$' {
            out.push(c);
            continue;
        }
        let mut digits = String::new();
        while chars.peek().is_some_and(|d| d.is_ascii_digit()) {
            digits.push(chars.next().unwrap_or_default());
        }
        if digits.is_empty() {
            out.push('$');
        } else {
            out.push_str("${");
            out.push_str(&digits);
            out.push('}');
        }
    }
    out
}

/// Configuration for the media/link URL rewriting pass.
///
/// All caller-supplied per invocation; the engine holds no global state.
#[derive(Debug, Clone)]
pub struct UrlRewriteOptions {
    /// Ordered path-prefix allow-list; a URL failing every prefix is
    /// replaced by `fallback_url` (the node itself is kept).
    pub allowed_prefixes: Vec<String>,
    /// Ordered rewrite rules; first match wins per node.
    pub rules: Vec<RewriteRule>,
    pub fallback_url: String,
    pub use_thumbnail: bool,
    /// Cap on the number of media nodes rewritten; the rest are demoted to
    /// plain links so attacker-controlled input cannot fan out unboundedly.
    pub max_objects: Option<usize>,
}

impl UrlRewriteOptions {
    fn allowed(&self, url: &str) -> bool {
        self.allowed_prefixes.iter().any(|p| url.starts_with(p))
    }

    /// Allow-list check plus first-match-wins rule application.
    fn resolve(&self, url: &str) -> String {
        if !self.allowed(url) {
            return self.fallback_url.clone();
        }
        for rule in &self.rules {
            if !rule.pattern.is_match(url) {
                continue;
            }
            let template = match (&rule.thumbnail, self.use_thumbnail) {
                (Some(thumb), true) => thumb,
                _ => &rule.replacement,
            };
            return rule.pattern.replace(url, template.as_str()).into_owned();
        }
        url.to_string()
    }
}

/// Media/link URL rewriting pass.
///
/// Every `figure`/`img`/`a` URL is checked against the allow-list and mapped
/// through the rewrite rules; document structure is never changed by an
/// unresolvable URL. Must run before grid grouping, which inspects the
/// resolved shape.
pub fn rewrite_urls(nodes: &[Node], opts: &UrlRewriteOptions) -> Vec<Node> {
    let (out, _) = rewrite_list(nodes, opts, 0);
    out
}

fn rewrite_list(nodes: &[Node], opts: &UrlRewriteOptions, seen: usize) -> (Vec<Node>, usize) {
    let mut out = Vec::with_capacity(nodes.len());
    let mut seen = seen;
    for node in nodes {
        let (node, next) = rewrite_node(node, opts, seen);
        seen = next;
        out.push(node);
    }
    (out, seen)
}

fn rewrite_node(node: &Node, opts: &UrlRewriteOptions, seen: usize) -> (Node, usize) {
    let el = match node {
        Node::Text(_) => return (node.clone(), seen),
        Node::Element(el) => el,
    };

    if el.is_media() {
        if opts.max_objects.is_some_and(|cap| seen >= cap) {
            return (demote_media(el, opts), seen);
        }
        let mut media = el.clone();
        for child in &mut media.children {
            if let Node::Element(img) = child
                && img.tag == Tag::Img
                && let Some(src) = img.attr("src")
            {
                let resolved = opts.resolve(src);
                img.set_attr("src", resolved);
            }
        }
        return (Node::Element(media), seen + 1);
    }

    if el.tag == Tag::A {
        let mut a = el.clone();
        if let Some(href) = a.attr("href") {
            let resolved = opts.resolve(href);
            a.set_attr("href", resolved);
        }
        return (Node::Element(a), seen);
    }

    let mut rebuilt = el.clone();
    let (children, seen) = rewrite_list(&el.children, opts, seen);
    rebuilt.children = children;
    (Node::Element(rebuilt), seen)
}

/// Past the media cap, an image block collapses to a plain link on the
/// resolved URL, keeping the document shape stable.
fn demote_media(el: &Element, opts: &UrlRewriteOptions) -> Node {
    let (src, alt) = match el.img() {
        Some(img) => (
            img.attr("src").unwrap_or_default().to_string(),
            img.attr("alt").unwrap_or_default().to_string(),
        ),
        None => (String::new(), String::new()),
    };
    let href = opts.resolve(&src);
    let label = if alt.is_empty() { href.clone() } else { alt };
    let mut link = Node::link(&href, &label);
    if let Node::Element(a) = &mut link {
        a.pos = el.pos;
    }
    link
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::parse;
    use crate::render::render_html;
    use pretty_assertions::assert_eq;

    fn thumb_opts(use_thumbnail: bool, max_objects: Option<usize>) -> UrlRewriteOptions {
        let rule = RewriteRule::new(
            r"/images/(.*)/masters/(.*)/([^/]+)(\.[^/]+)?",
            "/images/$1/masters/$2/$3$4",
        )
        .unwrap()
        .with_thumbnail("/images/$1/thumbs/$2$3_image.webp");
        UrlRewriteOptions {
            allowed_prefixes: vec!["/images/".to_string()],
            rules: vec![rule],
            fallback_url: "/static/missing.png".to_string(),
            use_thumbnail,
            max_objects,
        }
    }

    fn first_src(nodes: &[Node]) -> String {
        nodes[0]
            .as_element()
            .unwrap()
            .img()
            .unwrap()
            .attr("src")
            .unwrap()
            .to_string()
    }

    #[test]
    fn thumbnail_template_reshapes_master_path() {
        let doc = parse("![alt](/images/u1/masters/x/cat.jpg){width=400}");
        let out = rewrite_urls(&doc, &thumb_opts(true, None));
        // Greedy [^/]+ keeps the extension in group 3; the optional group
        // matches empty. The host's rule relies only on the suffix shape.
        assert!(first_src(&out).ends_with("_image.webp"), "{}", first_src(&out));
        assert_eq!(first_src(&out), "/images/u1/thumbs/x/cat.jpg_image.webp");
    }

    #[test]
    fn master_template_used_without_thumbnail_flag() {
        let doc = parse("![alt](/images/u1/masters/x/cat.jpg)");
        let out = rewrite_urls(&doc, &thumb_opts(false, None));
        assert_eq!(first_src(&out), "/images/u1/masters/x/cat.jpg");
    }

    #[test]
    fn url_outside_allow_list_gets_fallback() {
        let doc = parse("![alt](https://evil.example/x.jpg)");
        let out = rewrite_urls(&doc, &thumb_opts(false, None));
        assert_eq!(first_src(&out), "/static/missing.png");
        // Node is kept, not dropped
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn link_urls_are_checked_too() {
        let doc = parse("[see](/elsewhere/page)");
        let out = rewrite_urls(&doc, &thumb_opts(false, None));
        let html = render_html(&out, false);
        assert!(html.contains("href=\"/static/missing.png\""));
    }

    #[test]
    fn media_cap_demotes_excess_images_to_links() {
        let doc = parse(
            "![a](/images/u1/masters/x/a.jpg)\n\n![b](/images/u1/masters/x/b.jpg)\n\n![c](/images/u1/masters/x/c.jpg)",
        );
        let out = rewrite_urls(&doc, &thumb_opts(false, Some(2)));
        let media: Vec<_> = out
            .iter()
            .filter(|n| n.as_element().is_some_and(|el| el.is_media()))
            .collect();
        let links: Vec<_> = out
            .iter()
            .filter(|n| n.as_element().is_some_and(|el| el.tag == Tag::A))
            .collect();
        assert_eq!(media.len(), 2);
        assert_eq!(links.len(), 1);
    }

    #[test]
    fn cap_of_zero_demotes_everything() {
        let doc = parse("![a](/images/u1/masters/x/a.jpg)");
        let out = rewrite_urls(&doc, &thumb_opts(false, Some(0)));
        assert_eq!(out[0].as_element().unwrap().tag, Tag::A);
    }

    #[test]
    fn unmatched_but_allowed_url_is_kept() {
        let doc = parse("![a](/images/raw.png)");
        let out = rewrite_urls(&doc, &thumb_opts(false, None));
        assert_eq!(first_src(&out), "/images/raw.png");
    }

    #[test]
    fn brace_captures_handles_adjacent_groups() {
        assert_eq!(brace_captures("/t/$2$3_image.webp"), "/t/${2}${3}_image.webp");
        assert_eq!(brace_captures("no captures"), "no captures");
        assert_eq!(brace_captures("$name stays"), "$name stays");
    }
}
