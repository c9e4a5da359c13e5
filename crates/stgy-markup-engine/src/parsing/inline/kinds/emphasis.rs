use crate::ast::Tag;

pub struct Emphasis;

impl Emphasis {
    /// Delimiters in match order: double markers must be tried before the
    /// single markers they contain.
    pub const DELIMITERS: [(&'static str, Tag); 4] = [
        ("**", Tag::Strong),
        ("__", Tag::U),
        ("*", Tag::Em),
        ("_", Tag::Em),
    ];
}
