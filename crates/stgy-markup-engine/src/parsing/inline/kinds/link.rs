pub struct Link;

impl Link {
    pub const OPEN: &'static str = "[";
    pub const LABEL_CLOSE: &'static str = "]";
    pub const URL_OPEN: &'static str = "(";
    pub const URL_CLOSE: &'static str = ")";
}

pub struct Autolink;

impl Autolink {
    pub const SCHEMES: [&'static str; 2] = ["https://", "http://"];

    /// Characters that terminate a bare URL run.
    pub fn ends_url(c: char) -> bool {
        c.is_whitespace() || matches!(c, '<' | '>' | '"')
    }
}
