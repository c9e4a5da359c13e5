use crate::ast::{SourcePos, Tag};

use super::kinds::{BlockQuote, CodeFence, Heading, ListItem, TableRow};
use crate::parsing::lines::SourceLine;

/// Classification of a single line containing only local facts.
///
/// Phase 1 of block parsing: each line is classified independently, without
/// reference to surrounding context. The [`BlockBuilder`](super::builder)
/// decides what the facts mean given its open state (a fence line inside an
/// open fence is a closer; a lone table row degrades to a paragraph).
#[derive(Debug, Clone)]
pub struct LineClass<'a> {
    /// Raw line text without the trailing newline.
    pub text: &'a str,
    /// Position of the line start in the original input.
    pub pos: SourcePos,
    pub is_blank: bool,
    /// Line is a code-fence delimiter.
    pub is_fence: bool,
    /// Heading tag and remainder text, for `#`×1–3 + space lines.
    pub heading: Option<(Tag, &'a str)>,
    /// Nesting level and content, for `- ` list-item lines.
    pub list_item: Option<(usize, &'a str)>,
    /// Content after the `>` prefix, for blockquote lines.
    pub quote: Option<&'a str>,
    /// Trimmed cells, for `|cell|cell|` lines.
    pub table_cells: Option<Vec<&'a str>>,
}

/// Classifies a line into a [`LineClass`] of local facts.
pub fn classify<'a>(line: &SourceLine<'a>) -> LineClass<'a> {
    let text = line.text;
    LineClass {
        text,
        pos: line.pos,
        is_blank: text.trim().is_empty(),
        is_fence: CodeFence::is_fence(text),
        heading: Heading::parse(text),
        list_item: ListItem::parse(text),
        quote: BlockQuote::strip(text),
        table_cells: TableRow::parse(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class(text: &str) -> LineClass<'_> {
        let line = SourceLine {
            text,
            pos: SourcePos {
                char_offset: 0,
                line: 1,
            },
        };
        // SourceLine is Copy; classify borrows from the original text
        classify(&line)
    }

    #[test]
    fn blank_line() {
        assert!(class("   ").is_blank);
        assert!(!class("x").is_blank);
    }

    #[test]
    fn facts_are_independent() {
        let c = class("## heading");
        assert!(c.heading.is_some());
        assert!(c.list_item.is_none());
        assert!(c.quote.is_none());
    }

    #[test]
    fn quote_and_table_facts() {
        assert_eq!(class("> q").quote, Some("q"));
        assert_eq!(class("|a|b|").table_cells, Some(vec!["a", "b"]));
    }
}
