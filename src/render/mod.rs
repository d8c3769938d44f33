mod json;

use crate::core::Document;
use crate::Result;

pub use json::JsonRenderer;

pub trait Renderer {
    fn render(&self, document: &Document) -> Result<String>;
}
