mod code_span;
mod emphasis;
mod link;
mod media;

pub use code_span::CodeSpan;
pub use emphasis::Emphasis;
pub use link::{Autolink, Link};
pub use media::Media;
