//! The snippet codec: a lossless JSON round-trip for the document tree.
//!
//! Snippets are the only persisted form of a parsed document (the host's
//! cached "snippet" column). They come back from storage, so deserialization
//! is a trust boundary: anything malformed fails closed to an empty-safe
//! tree instead of reaching a renderer.

use serde::{Deserialize, Serialize};

use crate::ast::{Element, Node, Tag};

#[derive(Debug, thiserror::Error)]
pub enum SnippetError {
    #[error("malformed snippet JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown tag in snippet: {0}")]
    UnknownTag(String),
}

/// Wire shape mirroring the Node union. Attributes are an array of pairs so
/// order survives the round-trip; source positions are never persisted.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum Wire {
    Text {
        text: String,
    },
    Element {
        tag: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        attrs: Vec<(String, String)>,
        #[serde(default)]
        children: Vec<Wire>,
    },
}

/// Encodes nodes as the snippet interchange string.
pub fn serialize(nodes: &[Node]) -> String {
    let wire: Vec<Wire> = nodes.iter().map(to_wire).collect();
    // Wire holds only strings and sequences, which cannot fail to encode
    serde_json::to_string(&wire).expect("snippet wire types encode infallibly")
}

/// Decodes a snippet, failing closed: a corrupted snippet yields a single
/// empty paragraph rather than a malformed tree.
pub fn deserialize(snippet: &str) -> Vec<Node> {
    try_deserialize(snippet).unwrap_or_else(|_| fallback_tree())
}

/// Decoding variant that surfaces the failure cause.
pub fn try_deserialize(snippet: &str) -> Result<Vec<Node>, SnippetError> {
    let wire: Vec<Wire> = serde_json::from_str(snippet)?;
    wire.iter().map(from_wire).collect()
}

/// The empty-safe tree substituted for corrupted snippets.
pub fn fallback_tree() -> Vec<Node> {
    vec![Node::Element(Element::new(Tag::P))]
}

fn to_wire(node: &Node) -> Wire {
    match node {
        Node::Text(text) => Wire::Text { text: text.clone() },
        Node::Element(el) => Wire::Element {
            tag: el.tag.as_str().to_string(),
            attrs: el.attrs.clone(),
            children: el.children.iter().map(to_wire).collect(),
        },
    }
}

fn from_wire(wire: &Wire) -> Result<Node, SnippetError> {
    match wire {
        Wire::Text { text } => Ok(Node::Text(text.clone())),
        Wire::Element {
            tag,
            attrs,
            children,
        } => {
            let tag =
                Tag::from_str(tag).ok_or_else(|| SnippetError::UnknownTag(tag.clone()))?;
            let children = children.iter().map(from_wire).collect::<Result<_, _>>()?;
            Ok(Node::Element(Element {
                tag,
                attrs: attrs.clone(),
                children,
                pos: None,
            }))
        }
    }
}
