//! Typed rendition of Pandoc's JSON document model.
//!
//! Only the block kinds the filters need to look inside are modelled as
//! distinct variants. Every other block is carried as its raw `{"t", "c"}`
//! node and written back unchanged, so documents survive a round trip even
//! when they use constructs this crate knows nothing about.

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{json, Map, Value};
use std::fmt;

/// Inlines stay as raw JSON; the walker only looks inside them for notes.
pub type Inline = Value;
pub type Inlines = Vec<Inline>;
/// `[start, style, delimiter]` of an ordered list, kept opaque.
pub type ListAttributes = Value;

/// A whole Pandoc document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(rename = "pandoc-api-version")]
    pub api_version: ApiVersion,
    #[serde(default)]
    pub meta: Map<String, Value>,
    pub blocks: Vec<Block>,
    /// Output format Pandoc passed to the filter (`latex`, `beamer`, ...).
    #[serde(skip)]
    pub format: Option<String>,
}

impl Document {
    /// Creates a document with empty metadata at the current API version.
    pub fn new(blocks: Vec<Block>) -> Self {
        Self {
            api_version: ApiVersion::current(),
            meta: Map::new(),
            blocks,
            format: None,
        }
    }
}

/// The `pandoc-api-version` triple (or longer list) stamped on a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiVersion(pub Vec<u32>);

impl ApiVersion {
    /// Newest pandoc-types release this crate was written against.
    pub const CURRENT: [u32; 3] = [1, 23, 1];

    pub fn current() -> Self {
        Self(Self::CURRENT.to_vec())
    }

    pub fn major(&self) -> Option<u32> {
        self.0.first().copied()
    }

    pub fn minor(&self) -> Option<u32> {
        self.0.get(1).copied()
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(u32::to_string).collect();
        f.write_str(&parts.join("."))
    }
}

/// Identifier, classes and key/value pairs attached to a block.
///
/// Serialized as Pandoc's `[id, [classes], [[key, value]]]` array.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Attr {
    pub identifier: String,
    pub classes: Vec<String>,
    pub attributes: Vec<(String, String)>,
}

impl Attr {
    /// Builds an attribute set carrying only the given classes.
    pub fn with_classes<I, S>(classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            classes: classes.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// First class label, if any. Labels are only ever checked by position.
    pub fn first_class(&self) -> Option<&str> {
        self.classes.first().map(String::as_str)
    }
}

impl Serialize for Attr {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        (&self.identifier, &self.classes, &self.attributes).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Attr {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let (identifier, classes, attributes): (String, Vec<String>, Vec<(String, String)>) =
            Deserialize::deserialize(deserializer)?;
        Ok(Self {
            identifier,
            classes,
            attributes,
        })
    }
}

/// Target format tag of a raw block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Format(pub String);

impl Format {
    pub fn latex() -> Self {
        Self("latex".to_string())
    }
}

/// `[short caption or null, long caption blocks]`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Caption(pub Option<Inlines>, pub Vec<Block>);

/// Column alignment and width, kept opaque.
pub type ColSpec = Value;

/// `[attr, caption, colspecs, head, bodies, foot]` of a pandoc-types 1.21+ table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table(
    pub Attr,
    pub Caption,
    pub Vec<ColSpec>,
    pub TableHead,
    pub Vec<TableBody>,
    pub TableFoot,
);

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TableHead(pub Attr, pub Vec<Row>);

/// `[attr, row head columns, intermediate head rows, body rows]`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TableBody(pub Attr, pub i64, pub Vec<Row>, pub Vec<Row>);

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TableFoot(pub Attr, pub Vec<Row>);

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Row(pub Attr, pub Vec<Cell>);

/// `[attr, alignment, row span, col span, blocks]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell(pub Attr, pub Value, pub i64, pub i64, pub Vec<Block>);

impl Cell {
    /// A default-aligned 1x1 cell.
    pub fn new(content: Vec<Block>) -> Self {
        Cell(
            Attr::default(),
            json!({ "t": "AlignDefault" }),
            1,
            1,
            content,
        )
    }
}

/// A block node exactly as it appears in Pandoc JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawNode {
    pub t: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub c: Option<Value>,
}

/// Block-level node.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawNode")]
pub enum Block {
    /// Generic container; its classes are the category labels.
    Div(Attr, Vec<Block>),
    BlockQuote(Vec<Block>),
    BulletList(Vec<Vec<Block>>),
    OrderedList(ListAttributes, Vec<Vec<Block>>),
    DefinitionList(Vec<(Inlines, Vec<Vec<Block>>)>),
    /// Only written by pandoc-types 1.23 and later.
    Figure(Attr, Caption, Vec<Block>),
    Table(Box<Table>),
    Para(Inlines),
    Plain(Inlines),
    /// Literal text emitted verbatim for the given format.
    RawBlock(Format, String),
    /// Any block kind not listed above, passed through untouched.
    Other(RawNode),
}

impl Block {
    pub fn div(attr: Attr, content: Vec<Block>) -> Self {
        Block::Div(attr, content)
    }

    /// A raw LaTeX block.
    pub fn raw_latex(text: impl Into<String>) -> Self {
        Block::RawBlock(Format::latex(), text.into())
    }

    /// A paragraph of plain words separated by spaces.
    pub fn para_text(text: &str) -> Self {
        let mut inlines = Vec::new();
        for (i, word) in text.split_whitespace().enumerate() {
            if i > 0 {
                inlines.push(json!({ "t": "Space" }));
            }
            inlines.push(json!({ "t": "Str", "c": word }));
        }
        Block::Para(inlines)
    }

    /// Pandoc constructor name of this block.
    pub fn tag(&self) -> &str {
        match self {
            Block::Div(..) => "Div",
            Block::BlockQuote(_) => "BlockQuote",
            Block::BulletList(_) => "BulletList",
            Block::OrderedList(..) => "OrderedList",
            Block::DefinitionList(_) => "DefinitionList",
            Block::Figure(..) => "Figure",
            Block::Table(_) => "Table",
            Block::Para(_) => "Para",
            Block::Plain(_) => "Plain",
            Block::RawBlock(..) => "RawBlock",
            Block::Other(node) => &node.t,
        }
    }
}

fn decode<T: DeserializeOwned>(tag: &str, content: Option<Value>) -> Result<T> {
    serde_json::from_value(content.unwrap_or_default()).map_err(|source| Error::MalformedBlock {
        tag: tag.to_string(),
        source,
    })
}

impl TryFrom<RawNode> for Block {
    type Error = Error;

    fn try_from(node: RawNode) -> Result<Self> {
        let RawNode { t: tag, c } = node;
        let block = match tag.as_str() {
            "Div" => {
                let (attr, content): (Attr, Vec<Block>) = decode(&tag, c)?;
                Block::Div(attr, content)
            }
            "BlockQuote" => Block::BlockQuote(decode(&tag, c)?),
            "BulletList" => Block::BulletList(decode(&tag, c)?),
            "OrderedList" => {
                let (attrs, items): (ListAttributes, Vec<Vec<Block>>) = decode(&tag, c)?;
                Block::OrderedList(attrs, items)
            }
            "DefinitionList" => Block::DefinitionList(decode(&tag, c)?),
            "Figure" => {
                let (attr, caption, content): (Attr, Caption, Vec<Block>) = decode(&tag, c)?;
                Block::Figure(attr, caption, content)
            }
            "Table" => Block::Table(decode(&tag, c)?),
            "Para" => Block::Para(decode(&tag, c)?),
            "Plain" => Block::Plain(decode(&tag, c)?),
            "RawBlock" => {
                let (format, text): (Format, String) = decode(&tag, c)?;
                Block::RawBlock(format, text)
            }
            _ => Block::Other(RawNode { t: tag, c }),
        };
        Ok(block)
    }
}

fn tagged<S, C>(serializer: S, tag: &'static str, content: &C) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
    C: Serialize + ?Sized,
{
    let mut node = serializer.serialize_struct("Block", 2)?;
    node.serialize_field("t", tag)?;
    node.serialize_field("c", content)?;
    node.end()
}

impl Serialize for Block {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Block::Div(attr, content) => tagged(serializer, "Div", &(attr, content)),
            Block::BlockQuote(content) => tagged(serializer, "BlockQuote", content),
            Block::BulletList(items) => tagged(serializer, "BulletList", items),
            Block::OrderedList(attrs, items) => tagged(serializer, "OrderedList", &(attrs, items)),
            Block::DefinitionList(items) => tagged(serializer, "DefinitionList", items),
            Block::Figure(attr, caption, content) => {
                tagged(serializer, "Figure", &(attr, caption, content))
            }
            Block::Table(table) => tagged(serializer, "Table", table),
            Block::Para(inlines) => tagged(serializer, "Para", inlines),
            Block::Plain(inlines) => tagged(serializer, "Plain", inlines),
            Block::RawBlock(format, text) => tagged(serializer, "RawBlock", &(format, text)),
            Block::Other(node) => node.serialize(serializer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_div_parses_attr_and_content() {
        let value = json!({
            "t": "Div",
            "c": [["box", ["remarque", "wide"], [["title", "Note"]]], [
                { "t": "Para", "c": [{ "t": "Str", "c": "Hello" }] }
            ]]
        });
        let block: Block = serde_json::from_value(value).expect("div should parse");

        let Block::Div(attr, content) = block else {
            panic!("expected a Div");
        };
        assert_eq!(attr.identifier, "box");
        assert_eq!(attr.first_class(), Some("remarque"));
        assert_eq!(
            attr.attributes,
            vec![("title".to_string(), "Note".to_string())]
        );
        assert_eq!(content.len(), 1);
        assert_eq!(content[0].tag(), "Para");
    }

    #[test]
    fn test_unknown_blocks_round_trip_verbatim() {
        let header = json!({
            "t": "Header",
            "c": [1, ["intro", [], []], [{ "t": "Str", "c": "Intro" }]]
        });
        let rule = json!({ "t": "HorizontalRule" });

        for value in [header, rule] {
            let block: Block = serde_json::from_value(value.clone()).expect("block should parse");
            assert!(matches!(block, Block::Other(_)));
            assert_eq!(serde_json::to_value(&block).expect("serialize"), value);
        }
    }

    #[test]
    fn test_raw_block_serializes_as_pandoc_node() {
        let block = Block::raw_latex("\\begin{attention}");
        assert_eq!(
            serde_json::to_value(&block).expect("serialize"),
            json!({ "t": "RawBlock", "c": ["latex", "\\begin{attention}"] })
        );
    }

    #[test]
    fn test_attr_serializes_as_triple() {
        let attr = Attr::with_classes(["conseils"]);
        assert_eq!(
            serde_json::to_value(&attr).expect("serialize"),
            json!(["", ["conseils"], []])
        );
    }

    #[test]
    fn test_malformed_known_block_names_tag() {
        let value = json!({ "t": "Div", "c": "not an array" });
        let err = serde_json::from_value::<Block>(value).expect_err("should be rejected");
        assert!(err.to_string().contains("Malformed Div block"));
    }

    #[test]
    fn test_para_text_interleaves_spaces() {
        let Block::Para(inlines) = Block::para_text("two words") else {
            panic!("expected a Para");
        };
        assert_eq!(
            inlines,
            vec![
                json!({ "t": "Str", "c": "two" }),
                json!({ "t": "Space" }),
                json!({ "t": "Str", "c": "words" }),
            ]
        );
    }

    #[test]
    fn test_table_round_trips_with_typed_cells() {
        let value = json!({
            "t": "Table",
            "c": [
                ["", [], []],
                [null, []],
                [[{ "t": "AlignDefault" }, { "t": "ColWidthDefault" }]],
                [["", [], []], []],
                [[["", [], []], 0, [], [
                    [["", [], []], [
                        [["", [], []], { "t": "AlignDefault" }, 1, 1, [
                            { "t": "Plain", "c": [{ "t": "Str", "c": "cell" }] }
                        ]]
                    ]]
                ]]],
                [["", [], []], []]
            ]
        });
        let block: Block = serde_json::from_value(value.clone()).expect("table should parse");

        let Block::Table(table) = &block else {
            panic!("expected a Table");
        };
        let Table(_, _, _, _, bodies, _) = table.as_ref();
        let Row(_, cells) = &bodies[0].3[0];
        assert_eq!(cells[0].4.len(), 1);
        assert_eq!(serde_json::to_value(&block).expect("serialize"), value);
    }

    #[test]
    fn test_figure_round_trips() {
        let value = json!({
            "t": "Figure",
            "c": [["fig", [], []], [null, [{ "t": "Plain", "c": [] }]], [
                { "t": "Div", "c": [["", ["remarque"], []], []] }
            ]]
        });
        let block: Block = serde_json::from_value(value.clone()).expect("figure should parse");
        assert_eq!(block.tag(), "Figure");
        assert_eq!(serde_json::to_value(&block).expect("serialize"), value);
    }

    #[test]
    fn test_api_version_display() {
        assert_eq!(ApiVersion::current().to_string(), "1.23.1");
    }
}
