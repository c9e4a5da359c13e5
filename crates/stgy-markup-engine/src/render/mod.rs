mod html;
mod text;

pub use html::render_html;
pub use text::{inline_text, render_text};
