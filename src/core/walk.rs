//! Bottom-up traversal applying a [`Filter`] to every reachable block.

use super::ast::{Block, Caption, Cell, Document, Row, Table, TableBody, TableFoot, TableHead};
use crate::error::{Error, Result};
use serde_json::{Map, Value};

/// Outcome of running a filter on one block.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Leave the block where it is.
    Keep,
    /// Splice these blocks into the parent list in place of the block.
    Replace(Vec<Block>),
}

/// A per-block transform.
pub trait Filter {
    /// Decides what happens to `block`. `doc` is the enclosing document,
    /// whose metadata or block list is detached while it is being walked.
    fn action(&self, block: &Block, doc: &Document) -> Action;
}

/// Walks every block of `doc` through `filter`, metadata first.
///
/// Children are visited before their parent, so a replacement that re-uses a
/// block's content carries already-filtered children. Block lists held in
/// `MetaBlocks` values and in footnotes are decoded and walked too; a note
/// whose content is not a block list is an error, and leaves `doc` partially
/// filtered.
pub fn walk<F: Filter + ?Sized>(doc: &mut Document, filter: &F) -> Result<()> {
    let mut meta = std::mem::take(&mut doc.meta);
    let walked = walk_meta(&mut meta, filter, doc);
    doc.meta = meta;
    walked?;

    let blocks = std::mem::take(&mut doc.blocks);
    let filtered = walk_blocks(blocks, filter, doc)?;
    doc.blocks = filtered;
    Ok(())
}

fn walk_meta<F: Filter + ?Sized>(
    meta: &mut Map<String, Value>,
    filter: &F,
    doc: &Document,
) -> Result<()> {
    for value in meta.values_mut() {
        walk_value(value, filter, doc)?;
    }
    Ok(())
}

fn walk_blocks<F: Filter + ?Sized>(
    blocks: Vec<Block>,
    filter: &F,
    doc: &Document,
) -> Result<Vec<Block>> {
    let mut out = Vec::with_capacity(blocks.len());
    for block in blocks {
        let block = walk_children(block, filter, doc)?;
        match filter.action(&block, doc) {
            Action::Keep => out.push(block),
            Action::Replace(replacement) => out.extend(replacement),
        }
    }
    Ok(out)
}

fn walk_items<F: Filter + ?Sized>(
    items: Vec<Vec<Block>>,
    filter: &F,
    doc: &Document,
) -> Result<Vec<Vec<Block>>> {
    items
        .into_iter()
        .map(|item| walk_blocks(item, filter, doc))
        .collect()
}

fn walk_children<F: Filter + ?Sized>(block: Block, filter: &F, doc: &Document) -> Result<Block> {
    let block = match block {
        Block::Div(attr, content) => Block::Div(attr, walk_blocks(content, filter, doc)?),
        Block::BlockQuote(content) => Block::BlockQuote(walk_blocks(content, filter, doc)?),
        Block::BulletList(items) => Block::BulletList(walk_items(items, filter, doc)?),
        Block::OrderedList(attrs, items) => {
            Block::OrderedList(attrs, walk_items(items, filter, doc)?)
        }
        Block::DefinitionList(entries) => {
            let mut walked = Vec::with_capacity(entries.len());
            for (mut term, definitions) in entries {
                walk_inlines(&mut term, filter, doc)?;
                walked.push((term, walk_items(definitions, filter, doc)?));
            }
            Block::DefinitionList(walked)
        }
        Block::Figure(attr, caption, content) => Block::Figure(
            attr,
            walk_caption(caption, filter, doc)?,
            walk_blocks(content, filter, doc)?,
        ),
        Block::Table(table) => Block::Table(Box::new(walk_table(*table, filter, doc)?)),
        Block::Para(mut inlines) => {
            walk_inlines(&mut inlines, filter, doc)?;
            Block::Para(inlines)
        }
        Block::Plain(mut inlines) => {
            walk_inlines(&mut inlines, filter, doc)?;
            Block::Plain(inlines)
        }
        // Headers, line blocks and the like may still carry footnotes.
        Block::Other(mut node) => {
            if let Some(content) = node.c.as_mut() {
                walk_value(content, filter, doc)?;
            }
            Block::Other(node)
        }
        raw @ Block::RawBlock(..) => raw,
    };
    Ok(block)
}

fn walk_caption<F: Filter + ?Sized>(
    caption: Caption,
    filter: &F,
    doc: &Document,
) -> Result<Caption> {
    let Caption(mut short, long) = caption;
    if let Some(short) = short.as_mut() {
        walk_inlines(short, filter, doc)?;
    }
    Ok(Caption(short, walk_blocks(long, filter, doc)?))
}

fn walk_rows<F: Filter + ?Sized>(rows: Vec<Row>, filter: &F, doc: &Document) -> Result<Vec<Row>> {
    let mut walked = Vec::with_capacity(rows.len());
    for Row(attr, cells) in rows {
        let mut walked_cells = Vec::with_capacity(cells.len());
        for Cell(attr, alignment, row_span, col_span, content) in cells {
            let content = walk_blocks(content, filter, doc)?;
            walked_cells.push(Cell(attr, alignment, row_span, col_span, content));
        }
        walked.push(Row(attr, walked_cells));
    }
    Ok(walked)
}

fn walk_table<F: Filter + ?Sized>(table: Table, filter: &F, doc: &Document) -> Result<Table> {
    let Table(attr, caption, col_specs, head, bodies, foot) = table;
    let caption = walk_caption(caption, filter, doc)?;

    let TableHead(head_attr, head_rows) = head;
    let head = TableHead(head_attr, walk_rows(head_rows, filter, doc)?);

    let mut walked_bodies = Vec::with_capacity(bodies.len());
    for TableBody(body_attr, row_head_columns, intermediate, rows) in bodies {
        walked_bodies.push(TableBody(
            body_attr,
            row_head_columns,
            walk_rows(intermediate, filter, doc)?,
            walk_rows(rows, filter, doc)?,
        ));
    }

    let TableFoot(foot_attr, foot_rows) = foot;
    let foot = TableFoot(foot_attr, walk_rows(foot_rows, filter, doc)?);

    Ok(Table(attr, caption, col_specs, head, walked_bodies, foot))
}

fn walk_inlines<F: Filter + ?Sized>(
    inlines: &mut [Value],
    filter: &F,
    doc: &Document,
) -> Result<()> {
    for inline in inlines {
        walk_value(inline, filter, doc)?;
    }
    Ok(())
}

/// Finds `Note` inlines and `MetaBlocks` values anywhere under `value` and
/// walks their block lists.
fn walk_value<F: Filter + ?Sized>(value: &mut Value, filter: &F, doc: &Document) -> Result<()> {
    match value {
        Value::Object(node) => {
            let holder = match node.get("t").and_then(Value::as_str) {
                Some(tag @ ("Note" | "MetaBlocks")) => Some(tag.to_string()),
                _ => None,
            };
            if let Some(tag) = holder {
                if let Some(content) = node.get_mut("c") {
                    let blocks: Vec<Block> = serde_json::from_value(content.take())
                        .map_err(|source| Error::MalformedBlock { tag, source })?;
                    *content = serde_json::to_value(walk_blocks(blocks, filter, doc)?)?;
                }
            } else {
                for child in node.values_mut() {
                    walk_value(child, filter, doc)?;
                }
            }
        }
        Value::Array(items) => walk_inlines(items, filter, doc)?,
        _ => {}
    }
    Ok(())
}
