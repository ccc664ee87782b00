//! Document abstraction the renderer writes into

use std::fmt;

/// The DOM operations the binder, infographic renderer and switcher need.
///
/// Implementations wrap a live page (or an in-memory tree for tests and
/// offline rendering). Query methods return elements in document order and
/// only consider elements attached to the document.
pub trait Document {
    /// Handle to an element
    type Node: Clone + PartialEq + fmt::Debug;

    /// All attached elements carrying `name`, in document order
    fn elements_with_attribute(&self, name: &str) -> Vec<Self::Node>;

    /// First attached element carrying `name`
    fn first_with_attribute(&self, name: &str) -> Option<Self::Node> {
        self.elements_with_attribute(name).into_iter().next()
    }

    /// Read an attribute value
    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;

    /// Set or replace an attribute value
    fn set_attribute(&mut self, node: &Self::Node, name: &str, value: &str);

    /// Replace all children with a single text node
    fn set_text_content(&mut self, node: &Self::Node, text: &str);

    /// Replace all children with trusted markup
    fn set_inner_html(&mut self, node: &Self::Node, markup: &str);

    /// Remove all children; the removed nodes are discarded
    fn clear_children(&mut self, node: &Self::Node);

    /// Create a detached element
    fn create_element(&mut self, tag: &str) -> Self::Node;

    /// Append `child` as the last child of `parent`
    fn append_child(&mut self, parent: &Self::Node, child: &Self::Node);

    /// Add or remove a single class, leaving other classes intact
    fn toggle_class(&mut self, node: &Self::Node, class: &str, force: bool);

    /// Replace the full class list
    fn set_class_name(&mut self, node: &Self::Node, class: &str) {
        self.set_attribute(node, "class", class);
    }
}
