//! Slot registry handing out [`NodeRef`]s for host objects.
//!
//! Released slots go on a free list and are handed out again, so a handle
//! stays valid only until its element is removed.

#[cfg(test)]
#[path = "registry_test.rs"]
mod registry_test;

use super::NodeRef;

#[derive(Debug)]
pub struct Registry<T> {
    slots: Vec<Option<T>>,
    free: Vec<u32>,
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self { slots: Vec::new(), free: Vec::new() }
    }
}

impl<T: PartialEq + Clone> Registry<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Handle of a live entry equal to `item`.
    #[must_use]
    pub fn lookup(&self, item: &T) -> Option<NodeRef> {
        let index = self.slots.iter().position(|slot| slot.as_ref() == Some(item))?;
        let Ok(index) = u32::try_from(index) else {
            return None;
        };
        Some(NodeRef::new(index))
    }

    /// Handle for `item`, reusing its existing slot or a freed one.
    pub fn insert(&mut self, item: T) -> Option<NodeRef> {
        if let Some(node) = self.lookup(&item) {
            return Some(node);
        }
        if let Some(index) = self.free.pop() {
            if let Some(slot) = self.slots.get_mut(NodeRef::new(index).index()) {
                *slot = Some(item);
                return Some(NodeRef::new(index));
            }
        }
        let Ok(index) = u32::try_from(self.slots.len()) else {
            log::warn!("element registry full");
            return None;
        };
        self.slots.push(Some(item));
        Some(NodeRef::new(index))
    }

    #[must_use]
    pub fn get(&self, node: NodeRef) -> Option<T> {
        self.slots.get(node.index())?.clone()
    }

    /// Drop the entry behind `node` and free its slot.
    pub fn release(&mut self, node: NodeRef) -> Option<T> {
        let item = self.slots.get_mut(node.index())?.take()?;
        if let Ok(index) = u32::try_from(node.index()) {
            self.free.push(index);
        }
        Some(item)
    }
}
