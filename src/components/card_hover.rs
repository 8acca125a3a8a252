//! Lift-and-scale hover effect on project cards.

#[cfg(test)]
#[path = "card_hover_test.rs"]
mod card_hover_test;

use crate::dom::{Dom, NodeRef};

pub const LIFTED_TRANSFORM: &str = "translateY(-10px) scale(1.02)";
pub const RESTING_TRANSFORM: &str = "translateY(0) scale(1)";

#[derive(Clone, Debug, Default)]
pub struct ProjectCardHover {
    cards: Vec<NodeRef>,
}

impl ProjectCardHover {
    #[must_use]
    pub fn new(cards: Vec<NodeRef>) -> Self {
        Self { cards }
    }

    #[must_use]
    pub fn cards(&self) -> &[NodeRef] {
        &self.cards
    }

    pub fn on_enter(&self, dom: &mut impl Dom, card: NodeRef) {
        if self.cards.contains(&card) {
            dom.set_style(card, "transform", LIFTED_TRANSFORM);
        }
    }

    pub fn on_leave(&self, dom: &mut impl Dom, card: NodeRef) {
        if self.cards.contains(&card) {
            dom.set_style(card, "transform", RESTING_TRANSFORM);
        }
    }
}
