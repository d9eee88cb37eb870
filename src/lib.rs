//! Find HTML elements matching a short element pattern and describe where they
//! are with CSS selectors and the chain of opening tags leading to them.

/// Compiling element patterns and matching them against documents
pub mod query;
/// Loading documents from disk or the web
pub mod web;

pub use html::{Document, NodeRef, ParseError};
pub use query::selector::{full_selector, path, query_selector, reconstruct, single_selector};
pub use query::{find_all_matches, CompileError, LexError, Matches, Query};

/// Compile a query string such as `<a class=nav href>`
pub fn compile_query(raw: &str) -> Result<Query, CompileError> {
    Query::compile(raw)
}
