pub struct BlockQuote;

impl BlockQuote {
    pub const MARKER: char = '>';

    /// Strips the `>` prefix (and one following space) from a quote line.
    pub fn strip(line: &str) -> Option<&str> {
        let rest = line.strip_prefix(Self::MARKER)?;
        Some(rest.strip_prefix(' ').unwrap_or(rest))
    }
}
