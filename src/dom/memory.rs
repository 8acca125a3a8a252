//! In-memory [`Dom`] used by native tests.
//!
//! Models just enough of an element tree for the page components: attributes,
//! inline styles, class lists, form values, text, parent/child links and a
//! record of scroll requests.

#[cfg(test)]
#[path = "memory_test.rs"]
mod memory_test;

use std::collections::BTreeMap;

use super::{Dom, NodeRef};

#[derive(Clone, Debug, Default)]
struct MemoryNode {
    tag: String,
    attributes: BTreeMap<String, String>,
    styles: BTreeMap<String, String>,
    classes: Vec<String>,
    value: String,
    text: String,
    disabled: bool,
    parent: Option<NodeRef>,
    children: Vec<NodeRef>,
}

/// Element tree rooted at an `<html>` node with a `<body>` child.
#[derive(Clone, Debug)]
pub struct MemoryDom {
    nodes: Vec<MemoryNode>,
    root: NodeRef,
    body: NodeRef,
    scrolled: Vec<NodeRef>,
    class_changes: usize,
}

impl Default for MemoryDom {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDom {
    #[must_use]
    pub fn new() -> Self {
        let mut dom = Self {
            nodes: Vec::new(),
            root: NodeRef::new(0),
            body: NodeRef::new(0),
            scrolled: Vec::new(),
            class_changes: 0,
        };
        dom.root = dom.push("html");
        dom.body = dom.append_element(dom.root, "body");
        dom
    }

    /// Create a `tag` element and attach it under `parent`.
    pub fn append_element(&mut self, parent: NodeRef, tag: &str) -> NodeRef {
        let node = self.push(tag);
        self.append_child(parent, node);
        node
    }

    /// Create a `tag` element carrying `class` and attach it under `parent`.
    pub fn append_with_class(&mut self, parent: NodeRef, tag: &str, class: &str) -> NodeRef {
        let node = self.append_element(parent, tag);
        if let Some(entry) = self.node_mut(node) {
            entry.classes.push(class.to_owned());
        }
        node
    }

    #[must_use]
    pub fn tag(&self, node: NodeRef) -> Option<&str> {
        self.node(node).map(|n| n.tag.as_str())
    }

    #[must_use]
    pub fn children(&self, node: NodeRef) -> &[NodeRef] {
        self.node(node).map_or(&[], |n| n.children.as_slice())
    }

    /// Connected elements carrying `class`, in creation order.
    #[must_use]
    pub fn find_by_class(&self, class: &str) -> Vec<NodeRef> {
        (0..u32::try_from(self.nodes.len()).unwrap_or(u32::MAX))
            .map(NodeRef::new)
            .filter(|&node| self.is_connected(node) && self.has_class(node, class))
            .collect()
    }

    /// Elements passed to [`Dom::scroll_into_view`], oldest first.
    #[must_use]
    pub fn scrolled(&self) -> &[NodeRef] {
        &self.scrolled
    }

    /// Number of class mutations that actually changed a class list.
    #[must_use]
    pub fn class_changes(&self) -> usize {
        self.class_changes
    }

    #[must_use]
    pub fn is_disabled(&self, node: NodeRef) -> bool {
        self.node(node).is_some_and(|n| n.disabled)
    }

    /// Whether `node` is attached under the document root.
    #[must_use]
    pub fn is_connected(&self, node: NodeRef) -> bool {
        self.node(node).is_some() && self.contains(self.root, node)
    }

    fn push(&mut self, tag: &str) -> NodeRef {
        let index = u32::try_from(self.nodes.len()).unwrap_or(u32::MAX);
        self.nodes.push(MemoryNode { tag: tag.to_owned(), ..MemoryNode::default() });
        NodeRef::new(index)
    }

    fn node(&self, node: NodeRef) -> Option<&MemoryNode> {
        self.nodes.get(node.index())
    }

    fn node_mut(&mut self, node: NodeRef) -> Option<&mut MemoryNode> {
        self.nodes.get_mut(node.index())
    }

    fn detach(&mut self, node: NodeRef) {
        let Some(parent) = self.node(node).and_then(|n| n.parent) else {
            return;
        };
        if let Some(entry) = self.node_mut(parent) {
            entry.children.retain(|&child| child != node);
        }
        if let Some(entry) = self.node_mut(node) {
            entry.parent = None;
        }
    }
}

impl Dom for MemoryDom {
    fn document_element(&self) -> Option<NodeRef> {
        Some(self.root)
    }

    fn body(&self) -> Option<NodeRef> {
        Some(self.body)
    }

    fn attribute(&self, node: NodeRef, name: &str) -> Option<String> {
        self.node(node)?.attributes.get(name).cloned()
    }

    fn set_attribute(&mut self, node: NodeRef, name: &str, value: &str) {
        if let Some(entry) = self.node_mut(node) {
            entry.attributes.insert(name.to_owned(), value.to_owned());
        }
    }

    fn style(&self, node: NodeRef, property: &str) -> Option<String> {
        self.node(node)?.styles.get(property).cloned()
    }

    fn set_style(&mut self, node: NodeRef, property: &str, value: &str) {
        if let Some(entry) = self.node_mut(node) {
            entry.styles.insert(property.to_owned(), value.to_owned());
        }
    }

    fn set_class_name(&mut self, node: NodeRef, class_name: &str) {
        let classes: Vec<String> = class_name.split_whitespace().map(str::to_owned).collect();
        if let Some(entry) = self.node_mut(node) {
            if entry.classes != classes {
                entry.classes = classes;
                self.class_changes += 1;
            }
        }
    }

    fn has_class(&self, node: NodeRef, class: &str) -> bool {
        self.node(node).is_some_and(|n| n.classes.iter().any(|c| c == class))
    }

    fn add_class(&mut self, node: NodeRef, class: &str) {
        if self.has_class(node, class) {
            return;
        }
        if let Some(entry) = self.node_mut(node) {
            entry.classes.push(class.to_owned());
            self.class_changes += 1;
        }
    }

    fn remove_class(&mut self, node: NodeRef, class: &str) {
        if !self.has_class(node, class) {
            return;
        }
        if let Some(entry) = self.node_mut(node) {
            entry.classes.retain(|c| c != class);
            self.class_changes += 1;
        }
    }

    fn value(&self, node: NodeRef) -> String {
        self.node(node).map(|n| n.value.clone()).unwrap_or_default()
    }

    fn set_value(&mut self, node: NodeRef, value: &str) {
        if let Some(entry) = self.node_mut(node) {
            entry.value = value.to_owned();
        }
    }

    fn text(&self, node: NodeRef) -> String {
        self.node(node).map(|n| n.text.clone()).unwrap_or_default()
    }

    fn set_text(&mut self, node: NodeRef, text: &str) {
        if let Some(entry) = self.node_mut(node) {
            entry.text = text.to_owned();
        }
    }

    fn set_disabled(&mut self, node: NodeRef, disabled: bool) {
        if let Some(entry) = self.node_mut(node) {
            entry.disabled = disabled;
        }
    }

    fn contains(&self, ancestor: NodeRef, node: NodeRef) -> bool {
        let mut current = Some(node);
        while let Some(candidate) = current {
            if candidate == ancestor {
                return true;
            }
            current = self.parent(candidate);
        }
        false
    }

    fn parent(&self, node: NodeRef) -> Option<NodeRef> {
        self.node(node)?.parent
    }

    fn create_element(&mut self, tag: &str) -> Option<NodeRef> {
        Some(self.push(tag))
    }

    fn append_child(&mut self, parent: NodeRef, child: NodeRef) {
        if self.node(parent).is_none() || self.node(child).is_none() || self.contains(child, parent) {
            return;
        }
        self.detach(child);
        if let Some(entry) = self.node_mut(child) {
            entry.parent = Some(parent);
        }
        if let Some(entry) = self.node_mut(parent) {
            entry.children.push(child);
        }
    }

    fn remove(&mut self, node: NodeRef) {
        self.detach(node);
    }

    /// Inputs fall back to their `value` attribute, textareas to their text.
    fn reset_form(&mut self, form: NodeRef) {
        let mut pending = self.children(form).to_vec();
        while let Some(node) = pending.pop() {
            pending.extend_from_slice(self.children(node));
            let default = match self.tag(node) {
                Some("input") => self.attribute(node, "value").unwrap_or_default(),
                Some("textarea") => self.text(node),
                _ => continue,
            };
            self.set_value(node, &default);
        }
    }

    fn scroll_into_view(&mut self, node: NodeRef) {
        self.scrolled.push(node);
    }
}
