pub struct CodeFence;

impl CodeFence {
    pub const DELIMITER: &'static str = "```";

    /// Whether the line opens or closes a fenced code block.
    ///
    /// An opener may carry an info string (```` ```rust ````); a closer is
    /// matched the same way, so any fence line toggles fence mode.
    pub fn is_fence(line: &str) -> bool {
        line.trim_end().starts_with(Self::DELIMITER)
    }
}
