//! HTML parsing into an index-linked [`Document`] tree

mod dom;
mod parsing;

pub use dom::*;
pub use parsing::{document, read_document, ParseError};
