use css::{CompoundSelector, Selector, SimpleSelector};
use html::NodeRef;

use super::Query;

/// The compound selector for one element: its tag, a `.class` or `#id` for
/// every class and ID it carries and a bare `[name]` for any other attribute.
fn node_compound<'a>(node: NodeRef<'a>) -> CompoundSelector<'a> {
    let mut compound = CompoundSelector::new(node.tag_name());
    for (key, value) in node.attributes() {
        match key.as_str() {
            "class" => compound.push_classes(value),
            "id" => compound.push_ids(value),
            _ => compound.push(SimpleSelector::Attribute(key)),
        }
    }
    compound
}

/// `node` and its ancestors, outermost first. Nodes without a tag name, such as
/// the document itself, are left out.
fn element_chain(node: NodeRef) -> Vec<NodeRef> {
    let mut chain: Vec<_> = node
        .ancestors()
        .filter(|n| !n.tag_name().is_empty())
        .collect();
    chain.reverse();
    chain
}

/// Selector for `node` alone, e.g. `div.a.b#main[hidden]`
pub fn single_selector(node: NodeRef) -> String {
    node_compound(node).to_string()
}

/// Selector for `node` through every ancestor, e.g. `html > body > div.a`
pub fn full_selector(node: NodeRef) -> String {
    element_chain(node)
        .into_iter()
        .map(node_compound)
        .collect::<Selector>()
        .to_string()
}

/// The opening tags of `node` and its ancestors, outermost first
pub fn path(node: NodeRef) -> Vec<String> {
    element_chain(node).into_iter().map(reconstruct).collect()
}

/// Rebuild the opening tag of `node`. Text content, closing tags and
/// escaping of quotes inside values are not reproduced.
pub fn reconstruct(node: NodeRef) -> String {
    let mut buff = String::new();
    buff.push('<');
    buff.push_str(node.tag_name());
    for (key, value) in node.attributes() {
        buff.push(' ');
        if value.is_empty() {
            buff.push_str(key);
        } else {
            buff.push_str(key);
            buff.push_str("=\"");
            buff.push_str(value);
            buff.push('"');
        }
    }
    buff.push('>');
    buff
}

/// Selector built from the query itself. Unlike [`single_selector`], values of
/// attributes other than `class` and `id` are kept: `a[href="/"]`.
pub fn query_selector(query: &Query) -> String {
    let mut compound = CompoundSelector::new(query.tag());
    for (key, value) in query.attrs() {
        match key.as_str() {
            "class" => compound.push_classes(value),
            "id" => compound.push_ids(value),
            _ => compound.push(SimpleSelector::AttributeEquals(key, value)),
        }
    }
    compound.to_string()
}

impl Query {
    pub fn selector(&self) -> String {
        query_selector(self)
    }
}
