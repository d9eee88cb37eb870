use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

pub use lexer::{tokenize, LexError};
pub use matching::{find_all_matches, Matches};

mod lexer;
mod matching;
/// Generation of selectors and paths from queries and matched nodes
pub mod selector;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum CompileError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error("query can't be empty")]
    Empty,
}

/// A single HTML element pattern: a tag name and the attributes an element
/// must carry.
///
/// An empty tag matches any element. An attribute with an empty value only
/// has to be present; any other value must match exactly.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Query {
    tag: String,
    // Kept in the order first seen so rendering is stable
    attrs: Vec<(String, String)>,
}

impl Query {
    /// Compile a query such as `<div class="a b" id=main hidden>`
    pub fn compile(raw: &str) -> Result<Self, CompileError> {
        let (tokens, errors) = tokenize(raw);
        if let Some(err) = errors.into_iter().next() {
            return Err(err.into());
        }
        let query = Self::from_tokens(tokens)?;
        debug!(?query, "Compiled query");
        Ok(query)
    }

    /// Build a query from already split tokens: the tag, then `key` or
    /// `key=value` requirements. A repeated key replaces the earlier value.
    pub fn from_tokens<I>(tokens: I) -> Result<Self, CompileError>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let mut tokens = tokens.into_iter().map(Into::into);
        let tag = tokens.next().ok_or(CompileError::Empty)?;
        let mut query = Self {
            tag,
            attrs: vec![],
        };
        for token in tokens {
            let (key, value) = match token.split_once('=') {
                Some((k, v)) => (k.to_string(), v.to_string()),
                None => (token, String::new()),
            };
            query.require(key, value);
        }
        Ok(query)
    }

    fn require(&mut self, key: String, value: String) {
        match self.attrs.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.attrs.push((key, value)),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Required attributes in the order they were first given
    pub fn attrs(&self) -> &[(String, String)] {
        &self.attrs
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl FromStr for Query {
    type Err = CompileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::compile(s)
    }
}
