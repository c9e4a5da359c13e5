pub struct ListItem;

impl ListItem {
    pub const MARKER: &'static str = "- ";
    /// Columns of leading space per nesting level.
    pub const INDENT_WIDTH: usize = 2;

    /// Matches leading spaces + `- `; nesting level is `spaces / 2`.
    pub fn parse(line: &str) -> Option<(usize, &str)> {
        let spaces = line.chars().take_while(|&c| c == ' ').count();
        let rest = line[spaces..].strip_prefix(Self::MARKER)?;
        Some((spaces / Self::INDENT_WIDTH, rest))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_level_item() {
        assert_eq!(ListItem::parse("- a"), Some((0, "a")));
    }

    #[test]
    fn two_spaces_per_level() {
        assert_eq!(ListItem::parse("  - a"), Some((1, "a")));
        assert_eq!(ListItem::parse("    - b"), Some((2, "b")));
        // Odd indent rounds down
        assert_eq!(ListItem::parse("   - c"), Some((1, "c")));
    }

    #[test]
    fn dash_without_space_is_not_an_item() {
        assert_eq!(ListItem::parse("-tight"), None);
    }
}
