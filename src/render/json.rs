use crate::core::Document;
use crate::render::Renderer;
use crate::Result;

/// Writes a document back out as Pandoc JSON.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonRenderer {
    pub pretty: bool,
}

impl Renderer for JsonRenderer {
    fn render(&self, document: &Document) -> Result<String> {
        let out = if self.pretty {
            serde_json::to_string_pretty(document)?
        } else {
            serde_json::to_string(document)?
        };
        Ok(out)
    }
}
