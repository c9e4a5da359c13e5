use crate::ast::SourcePos;

/// A single source line with its position in the original input.
#[derive(Debug, Clone, Copy)]
pub struct SourceLine<'a> {
    /// Line content without the trailing newline.
    pub text: &'a str,
    /// Position of the line start (cumulative chars, 1-based line number).
    pub pos: SourcePos,
}

/// Splits input into lines, tracking per-line character offsets.
///
/// Offsets count characters rather than bytes so they can be handed to the
/// host as-is for scroll anchoring; the newline itself counts one character.
pub fn scan_lines(input: &str) -> Vec<SourceLine<'_>> {
    let mut out = vec![];
    let mut char_offset = 0;
    for (number, text) in input.split('\n').enumerate() {
        let text = text.strip_suffix('\r').unwrap_or(text);
        out.push(SourceLine {
            text,
            pos: SourcePos {
                char_offset,
                line: number + 1,
            },
        });
        // +1 for the newline consumed by the split
        char_offset += text.chars().count() + 1;
    }
    out
}
