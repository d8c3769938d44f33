use super::DocumentLoader;
use crate::core::{ApiVersion, Document};
use crate::error::Error;
use crate::Result;

/// Oldest minor version with the current table layout (head, bodies, foot).
/// Releases before 1.17 did not even write a top-level object.
const MIN_MINOR: u32 = 21;

/// Loads Pandoc JSON as written by `pandoc -t json`.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonLoader {
    /// Reject documents newer than [`ApiVersion::CURRENT`] instead of warning.
    pub strict_api_version: bool,
}

impl DocumentLoader for JsonLoader {
    fn load(&self, input: &str) -> Result<Document> {
        let doc: Document = serde_json::from_str(input)?;
        self.check_version(&doc.api_version)?;
        Ok(doc)
    }
}

impl JsonLoader {
    fn check_version(&self, version: &ApiVersion) -> Result<()> {
        let (Some(major), Some(minor)) = (version.major(), version.minor()) else {
            return Err(Error::UnsupportedApiVersion(format!("{version:?}")));
        };
        let [known_major, known_minor, _] = ApiVersion::CURRENT;

        if major != known_major || minor < MIN_MINOR {
            return Err(Error::UnsupportedApiVersion(version.to_string()));
        }
        if minor > known_minor {
            if self.strict_api_version {
                return Err(Error::UnsupportedApiVersion(version.to_string()));
            }
            log::warn!(
                "document uses pandoc-api-version {}, newer than {}; continuing",
                version,
                ApiVersion::current()
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Block;
    use serde_json::json;

    fn doc_with_version(version: serde_json::Value) -> String {
        json!({ "pandoc-api-version": version, "meta": {}, "blocks": [] }).to_string()
    }

    #[test]
    fn test_load_current_document() {
        let input = json!({
            "pandoc-api-version": [1, 23, 1],
            "meta": { "title": { "t": "MetaInlines", "c": [] } },
            "blocks": [{ "t": "HorizontalRule" }]
        })
        .to_string();

        let doc = JsonLoader::default().load(&input).expect("should load");
        assert_eq!(doc.api_version, ApiVersion::current());
        assert!(doc.meta.contains_key("title"));
        assert!(matches!(&doc.blocks[..], [Block::Other(node)] if node.t == "HorizontalRule"));
        assert_eq!(doc.format, None);
    }

    #[test]
    fn test_rejects_other_major_and_old_minor() {
        for version in [json!([2, 0]), json!([1, 20, 2]), json!([1, 16, 0]), json!([1]), json!([])] {
            let err = JsonLoader::default()
                .load(&doc_with_version(version))
                .expect_err("should be rejected");
            assert!(matches!(err, Error::UnsupportedApiVersion(_)));
        }
    }

    #[test]
    fn test_newer_minor_depends_on_strictness() {
        let input = doc_with_version(json!([1, 99]));
        assert!(JsonLoader::default().load(&input).is_ok());

        let strict = JsonLoader {
            strict_api_version: true,
        };
        assert!(matches!(
            strict.load(&input),
            Err(Error::UnsupportedApiVersion(v)) if v == "1.99"
        ));
    }

    #[test]
    fn test_missing_blocks_is_a_json_error() {
        let err = JsonLoader::default()
            .load(r#"{"pandoc-api-version": [1, 23, 1], "meta": {}}"#)
            .expect_err("should fail");
        assert!(matches!(err, Error::Json(_)));
    }
}
