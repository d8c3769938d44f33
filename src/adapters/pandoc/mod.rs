mod reader;

use crate::core::Document;
use crate::Result;

pub trait DocumentLoader {
    fn load(&self, input: &str) -> Result<Document>;
}

pub use reader::JsonLoader;
