//! Minimal DOM surface the page components are written against.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components never hold browser objects. They address elements through
//! opaque [`NodeRef`] handles issued by a [`Dom`] implementation: the web-sys
//! backed `web::WebDom` in the browser, `memory::MemoryDom` in tests.
//!
//! Mutations are infallible from the caller's point of view. Implementations
//! that can fail (the browser) log and carry on, so one rejected style write
//! never takes down the rest of the page.

#[cfg(test)]
pub mod memory;

#[cfg(any(test, feature = "hydrate"))]
pub mod registry;

#[cfg(feature = "hydrate")]
pub mod web;

/// Opaque handle to an element owned by a [`Dom`] implementation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeRef(u32);

impl NodeRef {
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Element operations used by the page-behavior components.
pub trait Dom {
    /// The `<html>` element, if the document has one.
    fn document_element(&self) -> Option<NodeRef>;

    /// The `<body>` element, if the document has one.
    fn body(&self) -> Option<NodeRef>;

    fn attribute(&self, node: NodeRef, name: &str) -> Option<String>;
    fn set_attribute(&mut self, node: NodeRef, name: &str, value: &str);

    /// Inline style property value; `None` when unset.
    fn style(&self, node: NodeRef, property: &str) -> Option<String>;
    fn set_style(&mut self, node: NodeRef, property: &str, value: &str);

    /// Replace the whole class list with the space-separated `class_name`.
    fn set_class_name(&mut self, node: NodeRef, class_name: &str);
    fn has_class(&self, node: NodeRef, class: &str) -> bool;
    fn add_class(&mut self, node: NodeRef, class: &str);
    fn remove_class(&mut self, node: NodeRef, class: &str);

    /// Flip `class` on `node`, returning whether it is now present.
    fn toggle_class(&mut self, node: NodeRef, class: &str) -> bool {
        if self.has_class(node, class) {
            self.remove_class(node, class);
            false
        } else {
            self.add_class(node, class);
            true
        }
    }

    /// Current value of a form control; empty for other elements.
    fn value(&self, node: NodeRef) -> String;
    fn set_value(&mut self, node: NodeRef, value: &str);

    fn text(&self, node: NodeRef) -> String;
    fn set_text(&mut self, node: NodeRef, text: &str);

    fn set_disabled(&mut self, node: NodeRef, disabled: bool);

    /// Whether `node` is `ancestor` or one of its descendants.
    fn contains(&self, ancestor: NodeRef, node: NodeRef) -> bool;
    fn parent(&self, node: NodeRef) -> Option<NodeRef>;

    fn create_element(&mut self, tag: &str) -> Option<NodeRef>;
    fn append_child(&mut self, parent: NodeRef, child: NodeRef);
    /// Detach `node`. Its handle must not be used afterwards.
    fn remove(&mut self, node: NodeRef);

    /// Restore every control in `form` to its default value.
    fn reset_form(&mut self, form: NodeRef);

    /// Smooth-scroll so `node` sits at the top of the viewport.
    fn scroll_into_view(&mut self, node: NodeRef);
}
