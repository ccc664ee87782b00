//! Arena-backed in-memory document

use crate::dom::Document;

/// Elements serialized without a closing tag
const VOID_ELEMENTS: [&str; 8] = ["area", "br", "hr", "img", "input", "link", "meta", "source"];

/// Index of a node inside a [`MemoryDocument`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
enum NodeKind {
    Element {
        tag: String,
        attributes: Vec<(String, String)>,
    },
    Text(String),
    /// Trusted markup kept verbatim, never parsed
    Markup(String),
}

#[derive(Debug, Clone)]
struct NodeData {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// A small DOM tree for offline rendering and tests.
///
/// Markup written through [`Document::set_inner_html`] is stored as an opaque
/// node and serialized back unchanged: the dictionary is a trusted asset, so
/// no parsing or sanitizing happens here.
///
/// Nodes dropped by [`Document::clear_children`] go back to a free list and
/// their slots are reused by later nodes, so re-rendering the same page does
/// not grow the arena. A [`NodeId`] for a cleared node must not be used again.
#[derive(Debug, Clone)]
pub struct MemoryDocument {
    nodes: Vec<NodeData>,
    free: Vec<NodeId>,
    root: NodeId,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocument {
    /// Create a document with an empty `body` root
    pub fn new() -> Self {
        let mut doc = Self {
            nodes: Vec::new(),
            free: Vec::new(),
            root: NodeId(0),
        };
        doc.root = doc.push(NodeKind::Element {
            tag: "body".to_string(),
            attributes: Vec::new(),
        });
        doc
    }

    /// The root element
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of slots in the arena, live or free
    pub fn allocated(&self) -> usize {
        self.nodes.len()
    }

    fn push(&mut self, kind: NodeKind) -> NodeId {
        let data = NodeData {
            kind,
            parent: None,
            children: Vec::new(),
        };
        match self.free.pop() {
            Some(id) => {
                self.nodes[id.0] = data;
                id
            }
            None => {
                self.nodes.push(data);
                NodeId(self.nodes.len() - 1)
            }
        }
    }

    /// Return `id` and its whole subtree to the free list
    fn release(&mut self, id: NodeId) {
        let node = &mut self.nodes[id.0];
        let children = std::mem::take(&mut node.children);
        node.parent = None;
        node.kind = NodeKind::Text(String::new());
        self.free.push(id);
        for child in children {
            self.release(child);
        }
    }

    fn node(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0]
    }

    fn attributes_mut(&mut self, id: NodeId) -> Option<&mut Vec<(String, String)>> {
        match &mut self.nodes[id.0].kind {
            NodeKind::Element { attributes, .. } => Some(attributes),
            _ => None,
        }
    }

    fn attach(&mut self, parent: NodeId, child: NodeId) {
        if let Some(old_parent) = self.nodes[child.0].parent.take() {
            self.nodes[old_parent.0].children.retain(|c| *c != child);
        }
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    /// Create an element with attributes and append it to `parent`
    pub fn element(&mut self, parent: NodeId, tag: &str, attributes: &[(&str, &str)]) -> NodeId {
        let id = self.push(NodeKind::Element {
            tag: tag.to_string(),
            attributes: attributes
                .iter()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
        });
        self.attach(parent, id);
        id
    }

    /// Append a text node to `parent`
    pub fn append_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        let id = self.push(NodeKind::Text(text.to_string()));
        self.attach(parent, id);
        id
    }

    /// Tag name of an element, `None` for text and markup nodes
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        match &self.node(id).kind {
            NodeKind::Element { tag, .. } => Some(tag),
            _ => None,
        }
    }

    /// Child nodes in order
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    /// Child elements in order, skipping text and markup
    pub fn child_elements(&self, id: NodeId) -> Vec<NodeId> {
        self.node(id)
            .children
            .iter()
            .copied()
            .filter(|child| self.tag_name(*child).is_some())
            .collect()
    }

    /// Concatenated text of all descendants; markup nodes contribute their raw source
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        match &self.node(id).kind {
            NodeKind::Text(text) | NodeKind::Markup(text) => out.push_str(text),
            NodeKind::Element { .. } => {
                for child in &self.node(id).children {
                    self.collect_text(*child, out);
                }
            }
        }
    }

    /// Whether the element's class list contains `class`
    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.attribute(&id, "class")
            .map(|list| list.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    /// Serialized children of `id`
    pub fn inner_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        for child in &self.node(id).children {
            self.serialize(*child, &mut out);
        }
        out
    }

    /// Serialized `id` including its own tag
    pub fn outer_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.serialize(id, &mut out);
        out
    }

    fn serialize(&self, id: NodeId, out: &mut String) {
        match &self.node(id).kind {
            NodeKind::Text(text) => out.push_str(&escape(text, false)),
            NodeKind::Markup(markup) => out.push_str(markup),
            NodeKind::Element { tag, attributes } => {
                out.push('<');
                out.push_str(tag);
                for (name, value) in attributes {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    out.push_str(&escape(value, true));
                    out.push('"');
                }
                out.push('>');
                if VOID_ELEMENTS.contains(&tag.as_str()) {
                    return;
                }
                for child in &self.node(id).children {
                    self.serialize(*child, out);
                }
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
            }
        }
    }

    fn walk(&self, id: NodeId, visit: &mut impl FnMut(NodeId)) {
        visit(id);
        for child in &self.node(id).children {
            self.walk(*child, visit);
        }
    }
}

fn escape(text: &str, attribute: bool) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

impl Document for MemoryDocument {
    type Node = NodeId;

    fn elements_with_attribute(&self, name: &str) -> Vec<NodeId> {
        let mut found = Vec::new();
        self.walk(self.root, &mut |id| {
            if let NodeKind::Element { attributes, .. } = &self.node(id).kind {
                if attributes.iter().any(|(attr, _)| attr == name) {
                    found.push(id);
                }
            }
        });
        found
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        match &self.node(*node).kind {
            NodeKind::Element { attributes, .. } => attributes
                .iter()
                .find(|(attr, _)| attr == name)
                .map(|(_, value)| value.clone()),
            _ => None,
        }
    }

    fn set_attribute(&mut self, node: &NodeId, name: &str, value: &str) {
        if let Some(attributes) = self.attributes_mut(*node) {
            match attributes.iter_mut().find(|(attr, _)| attr == name) {
                Some((_, existing)) => *existing = value.to_string(),
                None => attributes.push((name.to_string(), value.to_string())),
            }
        }
    }

    fn set_text_content(&mut self, node: &NodeId, text: &str) {
        self.clear_children(node);
        if !text.is_empty() {
            self.append_text(*node, text);
        }
    }

    fn set_inner_html(&mut self, node: &NodeId, markup: &str) {
        self.clear_children(node);
        if !markup.is_empty() {
            let id = self.push(NodeKind::Markup(markup.to_string()));
            self.attach(*node, id);
        }
    }

    fn clear_children(&mut self, node: &NodeId) {
        let children = std::mem::take(&mut self.nodes[node.0].children);
        for child in children {
            self.release(child);
        }
    }

    fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(NodeKind::Element {
            tag: tag.to_string(),
            attributes: Vec::new(),
        })
    }

    fn append_child(&mut self, parent: &NodeId, child: &NodeId) {
        self.attach(*parent, *child);
    }

    fn toggle_class(&mut self, node: &NodeId, class: &str, force: bool) {
        let current = self.attribute(node, "class").unwrap_or_default();
        let mut classes: Vec<&str> = current.split_whitespace().filter(|c| *c != class).collect();
        if force {
            classes.push(class);
        }
        let updated = classes.join(" ");
        if updated != current {
            self.set_attribute(node, "class", &updated);
        }
    }
}
