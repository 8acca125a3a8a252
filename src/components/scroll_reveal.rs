//! Scroll-triggered reveal and smooth anchor scrolling.
//!
//! Reveal targets start transparent and shifted down; the first time the
//! viewport watcher reports one as intersecting it fades and slides into
//! place. Targets are never hidden again. The watcher keeps observing them,
//! which is harmless because the revealed styles are idempotent.
//!
//! Same-page anchor clicks are routed here too: the default jump is
//! suppressed by the host and the fragment's target is smooth-scrolled into
//! view, if it exists.

#[cfg(test)]
#[path = "scroll_reveal_test.rs"]
mod scroll_reveal_test;

use crate::bindings::AnchorBinding;
use crate::dom::{Dom, NodeRef};

pub const HIDDEN_TRANSFORM: &str = "translateY(30px)";
pub const REVEALED_TRANSFORM: &str = "translateY(0)";
pub const REVEAL_TRANSITION: &str = "opacity 0.6s ease, transform 0.6s ease";

#[derive(Clone, Debug, Default)]
pub struct ScrollRevealAnimator {
    elements: Vec<NodeRef>,
    anchors: Vec<AnchorBinding>,
}

impl ScrollRevealAnimator {
    #[must_use]
    pub fn new(elements: Vec<NodeRef>, anchors: Vec<AnchorBinding>) -> Self {
        Self { elements, anchors }
    }

    #[must_use]
    pub fn elements(&self) -> &[NodeRef] {
        &self.elements
    }

    #[must_use]
    pub fn anchors(&self) -> &[AnchorBinding] {
        &self.anchors
    }

    /// Put every target into its hidden starting state.
    pub fn setup(&self, dom: &mut impl Dom) {
        for &node in &self.elements {
            dom.set_style(node, "opacity", "0");
            dom.set_style(node, "transform", HIDDEN_TRANSFORM);
            dom.set_style(node, "transition", REVEAL_TRANSITION);
        }
    }

    /// Viewport callback for one target. Returns whether it was revealed.
    pub fn on_intersection(&self, dom: &mut impl Dom, node: NodeRef, is_intersecting: bool) -> bool {
        if !is_intersecting || !self.elements.contains(&node) {
            return false;
        }
        dom.set_style(node, "opacity", "1");
        dom.set_style(node, "transform", REVEALED_TRANSFORM);
        true
    }

    pub fn is_revealed(dom: &impl Dom, node: NodeRef) -> bool {
        dom.style(node, "opacity").as_deref() == Some("1")
    }

    /// Smooth-scroll to the clicked anchor's target. Returns whether a scroll
    /// happened; unknown links and missing targets do nothing.
    pub fn on_anchor_click(&self, dom: &mut impl Dom, link: NodeRef) -> bool {
        let target = self
            .anchors
            .iter()
            .find(|anchor| anchor.link == link)
            .and_then(|anchor| anchor.target);
        match target {
            Some(target) => {
                dom.scroll_into_view(target);
                true
            }
            None => {
                log::debug!("anchor {link:?} has no target on this page");
                false
            }
        }
    }
}
