//! Mobile navigation menu.
//!
//! The menu is open while the link panel carries the `active` class; the
//! toggle control mirrors it. Clicking outside the navigation container or on
//! any navigation link closes it.

#[cfg(test)]
#[path = "nav_menu_test.rs"]
mod nav_menu_test;

use crate::bindings::NavBindings;
use crate::dom::{Dom, NodeRef};

pub const ACTIVE_CLASS: &str = "active";

#[derive(Clone, Debug)]
pub struct NavigationMenu {
    bindings: NavBindings,
}

impl NavigationMenu {
    #[must_use]
    pub fn new(bindings: NavBindings) -> Self {
        Self { bindings }
    }

    #[must_use]
    pub fn bindings(&self) -> &NavBindings {
        &self.bindings
    }

    pub fn is_open(&self, dom: &impl Dom) -> bool {
        dom.has_class(self.bindings.links, ACTIVE_CLASS)
    }

    /// Flip the open state of panel and toggle. Returns whether it is open.
    pub fn toggle(&self, dom: &mut impl Dom) -> bool {
        let open = dom.toggle_class(self.bindings.links, ACTIVE_CLASS);
        dom.toggle_class(self.bindings.toggle, ACTIVE_CLASS);
        log::debug!("navigation menu {}", if open { "opened" } else { "closed" });
        open
    }

    /// Clear the open state. Idempotent.
    pub fn close(&self, dom: &mut impl Dom) {
        dom.remove_class(self.bindings.links, ACTIVE_CLASS);
        dom.remove_class(self.bindings.toggle, ACTIVE_CLASS);
    }

    /// Close the menu when `target` lies outside the navigation container
    /// while open. Returns whether the menu was closed.
    pub fn on_document_click(&self, dom: &mut impl Dom, target: Option<NodeRef>) -> bool {
        let inside = match (self.bindings.container, target) {
            (Some(container), Some(target)) => dom.contains(container, target),
            _ => false,
        };
        if inside || !self.is_open(dom) {
            return false;
        }
        self.close(dom);
        true
    }
}
