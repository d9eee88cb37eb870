/// Index of a node inside its [`Document`]
pub type NodeId = usize;

#[derive(Debug, Eq, PartialEq, Clone)]
pub struct DOMNode {
    pub node_type: NodeType,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

#[derive(Debug, Eq, PartialEq, Clone)]
pub enum NodeType {
    Document,
    Element(DOMElement),
    Text(String),
    Comment(String),
    Doctype(String),
}

#[derive(Debug, Eq, PartialEq, Clone)]
pub struct DOMElement {
    pub tag_name: String,
    pub attributes: DOMAttributes,
}

impl DOMElement {
    pub fn new(name: impl Into<String>, attributes: Option<DOMAttributes>) -> Self {
        Self {
            tag_name: name.into(),
            attributes: attributes.unwrap_or_default(),
        }
    }
}

/// Attributes in source order. Duplicate keys are kept as given.
#[derive(Debug, Eq, PartialEq, Clone, Default)]
pub struct DOMAttributes(pub Vec<(String, String)>);

impl DOMAttributes {
    /// Value of the first attribute named `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// A parsed HTML document. Nodes are owned by the document and refer to each
/// other by [`NodeId`]; node `0` is the document itself.
#[derive(Debug, Eq, PartialEq, Clone)]
pub struct Document {
    nodes: Vec<DOMNode>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub const ROOT: NodeId = 0;

    pub fn new() -> Self {
        Self {
            nodes: vec![DOMNode {
                node_type: NodeType::Document,
                parent: None,
                children: vec![],
            }],
        }
    }

    pub fn root(&self) -> NodeRef<'_> {
        NodeRef {
            doc: self,
            id: Self::ROOT,
        }
    }

    pub fn get(&self, id: NodeId) -> Option<NodeRef<'_>> {
        (id < self.nodes.len()).then(|| NodeRef { doc: self, id })
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the document holds nothing but the document node
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Add `node_type` as the last child of `parent`, returning the new node's id
    pub fn append(&mut self, parent: NodeId, node_type: NodeType) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(DOMNode {
            node_type,
            parent: Some(parent),
            children: vec![],
        });
        self.nodes[parent].children.push(id);
        id
    }

    /// Every node of the document in pre-order, starting with the document node
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            doc: self,
            stack: vec![Self::ROOT],
        }
    }
}

/// Borrowed handle to one node of a [`Document`]
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'a> {
    doc: &'a Document,
    id: NodeId,
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.doc, other.doc) && self.id == other.id
    }
}

impl Eq for NodeRef<'_> {}

impl<'a> NodeRef<'a> {
    fn node(&self) -> &'a DOMNode {
        &self.doc.nodes[self.id]
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn node_type(&self) -> &'a NodeType {
        &self.node().node_type
    }

    pub fn as_element(&self) -> Option<&'a DOMElement> {
        match self.node_type() {
            NodeType::Element(e) => Some(e),
            _ => None,
        }
    }

    pub fn is_element(&self) -> bool {
        self.as_element().is_some()
    }

    /// The tag name, or `""` for anything that is not an element
    pub fn tag_name(&self) -> &'a str {
        self.as_element().map_or("", |e| e.tag_name.as_str())
    }

    pub fn attributes(&self) -> &'a [(String, String)] {
        self.as_element().map_or(&[], |e| e.attributes.0.as_slice())
    }

    pub fn get_attribute(&self, key: &str) -> Option<&'a str> {
        self.as_element().and_then(|e| e.attributes.get(key))
    }

    pub fn parent(&self) -> Option<NodeRef<'a>> {
        self.node().parent.map(|id| NodeRef { doc: self.doc, id })
    }

    pub fn children(&self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        let doc = self.doc;
        self.node()
            .children
            .iter()
            .map(move |&id| NodeRef { doc, id })
    }

    /// This node followed by its parent, grandparent, up to the document node
    pub fn ancestors(&self) -> impl Iterator<Item = NodeRef<'a>> {
        std::iter::successors(Some(*self), |n| n.parent())
    }
}

pub struct Descendants<'a> {
    doc: &'a Document,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = NodeRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.doc.nodes[id].children.iter().rev().copied());
        Some(NodeRef { doc: self.doc, id })
    }
}
