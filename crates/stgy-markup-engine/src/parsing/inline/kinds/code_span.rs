pub struct CodeSpan;

impl CodeSpan {
    pub const TICK: &'static str = "`";
}
