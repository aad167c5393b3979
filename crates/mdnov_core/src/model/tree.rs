//! Ordered document tree.
//!
//! # Responsibility
//! - Keep the parent/child ordering of element IDs; one fixed root per
//!   category, chapters own sections, plot lines own plot points.
//! - Own no element data: collections live on `Novel`, this type only
//!   orders IDs.
//!
//! # Invariants
//! - An ID appears under exactly one parent.
//! - Child order is insertion order and defines manuscript order.

use crate::model::id::{Category, ElementId};
use std::collections::HashMap;

/// Parent slot of a tree entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParentKey {
    /// Fixed per-category root (chapters, characters, locations, items,
    /// plot lines, project notes).
    Root(Category),
    /// Nested parent: a chapter owning sections, or a plot line owning
    /// plot points.
    Element(ElementId),
}

/// Ordered forest of element IDs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tree {
    children: HashMap<ParentKey, Vec<ElementId>>,
    parents: HashMap<ElementId, ParentKey>,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `child` at the end of `parent`'s children.
    ///
    /// Idempotent: an ID that is already linked anywhere in the tree is
    /// left untouched.
    pub fn append(&mut self, parent: ParentKey, child: ElementId) {
        if self.parents.contains_key(&child) {
            return;
        }
        self.children.entry(parent).or_default().push(child);
        self.parents.insert(child, parent);
    }

    /// Ordered children of `parent`, empty when none exist.
    pub fn get_children(&self, parent: ParentKey) -> &[ElementId] {
        self.children
            .get(&parent)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Parent slot of `id`, if linked.
    pub fn parent(&self, id: ElementId) -> Option<ParentKey> {
        self.parents.get(&id).copied()
    }

    /// Relocates `id` under `new_parent`.
    ///
    /// `position` is clamped to the sibling count; `None` appends at the
    /// end. Order among the remaining siblings is preserved.
    pub fn move_to(&mut self, id: ElementId, new_parent: ParentKey, position: Option<usize>) {
        if let Some(old_parent) = self.parents.remove(&id) {
            if let Some(siblings) = self.children.get_mut(&old_parent) {
                siblings.retain(|entry| *entry != id);
            }
        }
        let siblings = self.children.entry(new_parent).or_default();
        let index = position.unwrap_or(siblings.len()).min(siblings.len());
        siblings.insert(index, id);
        self.parents.insert(id, new_parent);
    }

    /// Clears all parent/child links. Used before a fresh read.
    pub fn reset(&mut self) {
        self.children.clear();
        self.parents.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::{ParentKey, Tree};
    use crate::model::id::{Category, ElementId};

    const CH_ROOT: ParentKey = ParentKey::Root(Category::Chapter);

    #[test]
    fn append_keeps_insertion_order() {
        let mut tree = Tree::new();
        tree.append(CH_ROOT, ElementId::Chapter(2));
        tree.append(CH_ROOT, ElementId::Chapter(1));
        assert_eq!(
            tree.get_children(CH_ROOT),
            [ElementId::Chapter(2), ElementId::Chapter(1)]
        );
    }

    #[test]
    fn append_is_idempotent() {
        let mut tree = Tree::new();
        tree.append(CH_ROOT, ElementId::Chapter(1));
        tree.append(CH_ROOT, ElementId::Chapter(1));
        assert_eq!(tree.get_children(CH_ROOT).len(), 1);
    }

    #[test]
    fn move_to_end_relocates_and_preserves_others() {
        let mut tree = Tree::new();
        for n in 1..=3 {
            tree.append(CH_ROOT, ElementId::Chapter(n));
        }
        tree.move_to(ElementId::Chapter(1), CH_ROOT, None);
        assert_eq!(
            tree.get_children(CH_ROOT),
            [
                ElementId::Chapter(2),
                ElementId::Chapter(3),
                ElementId::Chapter(1)
            ]
        );
    }

    #[test]
    fn move_to_position_is_clamped() {
        let mut tree = Tree::new();
        tree.append(CH_ROOT, ElementId::Chapter(1));
        let section = ElementId::Section(1);
        tree.append(ParentKey::Element(ElementId::Chapter(1)), section);
        tree.move_to(section, CH_ROOT, Some(99));
        assert_eq!(tree.parent(section), Some(CH_ROOT));
        assert!(tree
            .get_children(ParentKey::Element(ElementId::Chapter(1)))
            .is_empty());
    }

    #[test]
    fn reset_clears_everything() {
        let mut tree = Tree::new();
        tree.append(CH_ROOT, ElementId::Chapter(1));
        tree.reset();
        assert!(tree.get_children(CH_ROOT).is_empty());
        assert_eq!(tree.parent(ElementId::Chapter(1)), None);
    }
}
