pub struct Media;

impl Media {
    pub const OPEN: &'static str = "![";
    pub const ALT_CLOSE: &'static str = "]";
    pub const URL_OPEN: &'static str = "(";
    pub const URL_CLOSE: &'static str = ")";
    pub const ATTRS_OPEN: &'static str = "{";
    pub const ATTRS_CLOSE: &'static str = "}";
    pub const ATTR_SEP: char = ',';
    pub const ATTR_EQ: char = '=';
}
