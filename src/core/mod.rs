//! Document model and traversal shared by loaders, filters and renderers.

pub mod ast;
pub mod walk;

pub use ast::{
    ApiVersion, Attr, Block, Caption, Cell, Document, Format, RawNode, Row, Table, TableBody,
    TableFoot, TableHead,
};
pub use walk::{walk, Action, Filter};
