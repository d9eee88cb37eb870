use html::{read_document, Document, NodeId, NodeRef, ParseError};
use std::io::Read;
use tracing::{debug, span, Level};

use super::Query;

impl Query {
    /// Check whether `node` is an element with this query's tag (if any) and
    /// every required attribute. When the node repeats an attribute, only its
    /// first occurrence is considered.
    pub fn matches(&self, node: NodeRef) -> bool {
        if !node.is_element() || (!self.tag.is_empty() && node.tag_name() != self.tag) {
            return false;
        }
        if self.attrs.is_empty() {
            return true;
        }
        if node.attributes().is_empty() {
            return false;
        }
        self.attrs
            .iter()
            .all(|(key, required)| match node.get_attribute(key) {
                Some(value) => required.is_empty() || value == required.as_str(),
                None => false,
            })
    }

    /// Every node of `doc` matching this query, in document order
    pub fn find_all<'a>(&self, doc: &'a Document) -> Vec<NodeRef<'a>> {
        doc.descendants().filter(|n| self.matches(*n)).collect()
    }

    pub fn find_in(&self, reader: impl Read) -> Result<Matches, ParseError> {
        find_all_matches(self, reader)
    }
}

/// A parsed document together with the nodes a query matched in it
#[derive(Debug)]
pub struct Matches {
    document: Document,
    ids: Vec<NodeId>,
}

impl Matches {
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn first(&self) -> Option<NodeRef<'_>> {
        self.iter().next()
    }

    pub fn iter(&self) -> impl Iterator<Item = NodeRef<'_>> {
        self.ids.iter().filter_map(move |&id| self.document.get(id))
    }
}

/// Parse the document read from `reader` and collect everything `query`
/// matches in it. Parse failures are returned as they are.
pub fn find_all_matches(query: &Query, reader: impl Read) -> Result<Matches, ParseError> {
    let document = read_document(reader)?;
    let span = span!(Level::DEBUG, "Searching document", nodes = document.len());
    let _enter = span.enter();
    let ids: Vec<_> = query.find_all(&document).iter().map(|n| n.id()).collect();
    debug!(matches = ids.len(), "Search finished");
    Ok(Matches { document, ids })
}
