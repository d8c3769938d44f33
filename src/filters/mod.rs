//! Filters and the pipeline that runs them over a serialized document.

mod admonition;

use crate::adapters::pandoc::{DocumentLoader, JsonLoader};
use crate::core::{walk, Document, Filter};
use crate::render::{JsonRenderer, Renderer};
use crate::{FilterOptions, Result};
use std::io::{Read, Write};

pub use self::admonition::{is_admonition, AdmonitionRewriter, ADMONITIONS};

/// Loads a Pandoc JSON document, walks it through a filter and dumps it back.
pub struct FilterPipeline<F> {
    options: FilterOptions,
    filter: F,
}

/// Pipeline running the [`AdmonitionRewriter`].
pub fn admonitions(options: FilterOptions) -> FilterPipeline<AdmonitionRewriter> {
    FilterPipeline::new(options, AdmonitionRewriter)
}

impl<F: Filter> FilterPipeline<F> {
    /// Creates a new pipeline with the given options.
    pub fn new(options: FilterOptions, filter: F) -> Self {
        Self { options, filter }
    }

    /// Applies the filter to an already loaded document.
    pub fn apply(&self, doc: &mut Document) -> Result<()> {
        if doc.format.is_none() {
            doc.format = self.options.target_format.clone();
        }
        walk(doc, &self.filter)
    }

    /// Filters a Pandoc JSON string.
    ///
    /// # Returns
    /// The filtered document as Pandoc JSON.
    pub fn filter_str(&self, input: &str) -> Result<String> {
        let loader = JsonLoader {
            strict_api_version: self.options.strict_api_version,
        };
        let mut doc = loader.load(input)?;
        let before = doc.blocks.len();
        self.apply(&mut doc)?;
        log::info!(
            "filtered document: {} top-level blocks in, {} out",
            before,
            doc.blocks.len()
        );

        JsonRenderer {
            pretty: self.options.pretty,
        }
        .render(&doc)
    }

    /// Reads a document from `reader`, filters it and writes it to `writer`.
    pub fn run<R: Read, W: Write>(&self, mut reader: R, mut writer: W) -> Result<()> {
        let mut input = String::new();
        reader.read_to_string(&mut input)?;
        let output = self.filter_str(&input)?;
        writer.write_all(output.as_bytes())?;
        writer.flush()?;
        Ok(())
    }
}

impl FilterPipeline<AdmonitionRewriter> {
    /// Creates an admonition pipeline with default options.
    pub fn with_defaults() -> Self {
        admonitions(FilterOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Block;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    #[test]
    fn test_run_streams_filtered_json() {
        let input = json!({
            "pandoc-api-version": [1, 23, 1],
            "meta": {},
            "blocks": [
                { "t": "Div", "c": [["", ["remarque"], []], [
                    { "t": "Plain", "c": [{ "t": "Str", "c": "hi" }] }
                ]] }
            ]
        })
        .to_string();

        let mut output = Vec::new();
        FilterPipeline::with_defaults()
            .run(input.as_bytes(), &mut output)
            .expect("pipeline should succeed");

        let output: Value = serde_json::from_slice(&output).expect("output is JSON");
        assert_eq!(
            output["blocks"],
            json!([
                { "t": "RawBlock", "c": ["latex", "\\begin{remarque}"] },
                { "t": "Plain", "c": [{ "t": "Str", "c": "hi" }] },
                { "t": "RawBlock", "c": ["latex", "\\end{remarque}"] }
            ])
        );
    }

    #[test]
    fn test_apply_sets_target_format_from_options() {
        let options = FilterOptions {
            target_format: Some("latex".to_string()),
            ..Default::default()
        };
        let mut doc = Document::new(vec![Block::para_text("x")]);
        admonitions(options)
            .apply(&mut doc)
            .expect("apply should succeed");
        assert_eq!(doc.format.as_deref(), Some("latex"));
    }

    #[test]
    fn test_filter_str_rejects_garbage() {
        let err = FilterPipeline::with_defaults()
            .filter_str("not json")
            .expect_err("should fail");
        assert!(matches!(err, crate::Error::Json(_)));
    }
}
