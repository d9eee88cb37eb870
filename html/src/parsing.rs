use html5ever::tendril::TendrilSink;
use html5ever::{parse_document, ParseOpts};
use markup5ever_rcdom::{Handle, NodeData, RcDom};
use std::io::Read;
use thiserror::Error;
use tracing::{debug, span, Level};

use super::dom::*;

/// Markup never fails to parse; only reading the input can
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("could not read document: {0}")]
    Io(#[from] std::io::Error),
}

/// Read `reader` to the end and parse it as a document. Invalid UTF-8 is
/// replaced rather than rejected.
pub fn read_document(mut reader: impl Read) -> Result<Document, ParseError> {
    let span = span!(Level::DEBUG, "Parsing document");
    let _enter = span.enter();
    let dom = parse_document(RcDom::default(), ParseOpts::default())
        .from_utf8()
        .read_from(&mut reader)?;
    Ok(from_rcdom(&dom))
}

/// Parse a complete HTML document the way a browser would, including the
/// `html`, `head` and `body` elements it implies
pub fn document(input: &str) -> Document {
    let span = span!(Level::DEBUG, "Parsing document", bytes = input.len());
    let _enter = span.enter();
    let dom = parse_document(RcDom::default(), ParseOpts::default()).one(input);
    from_rcdom(&dom)
}

/// Copy the parser's reference counted tree into an index-linked [`Document`]
fn from_rcdom(dom: &RcDom) -> Document {
    let mut doc = Document::new();
    let mut stack: Vec<(Handle, NodeId)> = children_of(&dom.document)
        .into_iter()
        .rev()
        .map(|c| (c, Document::ROOT))
        .collect();
    while let Some((handle, parent)) = stack.pop() {
        let id = doc.append(parent, node_type(&handle));
        stack.extend(children_of(&handle).into_iter().rev().map(|c| (c, id)));
    }
    debug!(nodes = doc.len(), "Parsed document");
    doc
}

/// Children of `handle`. The content of a `<template>` counts as its children.
fn children_of(handle: &Handle) -> Vec<Handle> {
    if let NodeData::Element {
        template_contents, ..
    } = &handle.data
    {
        if let Some(contents) = template_contents.borrow().as_ref() {
            return contents.children.borrow().clone();
        }
    }
    handle.children.borrow().clone()
}

fn node_type(handle: &Handle) -> NodeType {
    match &handle.data {
        NodeData::Document => NodeType::Document,
        NodeData::Doctype { name, .. } => NodeType::Doctype(name.to_string()),
        NodeData::Text { contents } => NodeType::Text(contents.borrow().to_string()),
        NodeData::Comment { contents } => NodeType::Comment(contents.to_string()),
        NodeData::ProcessingInstruction { target, contents } => {
            NodeType::Comment(format!("?{} {}", target, contents))
        }
        NodeData::Element { name, attrs, .. } => {
            let attributes = attrs
                .borrow()
                .iter()
                .map(|a| (a.name.local.to_string(), a.value.to_string()))
                .collect();
            NodeType::Element(DOMElement::new(
                name.local.to_string(),
                Some(DOMAttributes(attributes)),
            ))
        }
    }
}
