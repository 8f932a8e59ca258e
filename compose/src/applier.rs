use std::collections::HashMap;

use log::trace;

use treehouse_shared::{
    check_insert, move_range, remove_range, ChildrenDiff, ChildrenTag, Diff, Insert,
    LayoutModifierElement, LayoutModifiers, Move, PropertyDiff, PropertyTag, Remove, Value,
    WidgetId, WidgetIdGenerator, WidgetTag,
};

use crate::{diff_batch::DiffBatch, ComposeError, ProtocolNode};

/// Translates edits of the composed tree into protocol diffs
///
/// Every structural edit updates the local mirror of the tree and appends the
/// matching diff to the pending batch, in the order the edits were made.
/// Ids are allocated here and never reused.
#[derive(Debug)]
pub struct ProtocolApplier {
    id_generator: WidgetIdGenerator,
    nodes: HashMap<WidgetId, ProtocolNode>,
    batch: DiffBatch,
}

impl Default for ProtocolApplier {
    fn default() -> Self {
        Self::new()
    }
}

impl ProtocolApplier {
    pub fn new() -> Self {
        Self {
            id_generator: WidgetIdGenerator::new(),
            nodes: HashMap::from([(WidgetId::ROOT, ProtocolNode::root())]),
            batch: DiffBatch::new(),
        }
    }

    // Tree edits

    /// Creates a node of type `kind` at `index` in `parent`'s `tag` children.
    ///
    /// Returns the id allocated for the new node.
    pub fn insert(
        &mut self,
        parent: WidgetId,
        tag: ChildrenTag,
        index: usize,
        kind: WidgetTag,
    ) -> Result<WidgetId, ComposeError> {
        let children = self.children_mut(parent, tag)?;
        check_insert(index, children.len()).map_err(|source| ComposeError::InvalidRange {
            id: parent,
            tag,
            source,
        })?;

        let id = self.id_generator.generate();
        self.children_mut(parent, tag)?.insert(index, id);
        self.nodes.insert(id, ProtocolNode::new(kind));

        let diff = ChildrenDiff::Insert(Insert {
            id: parent,
            tag,
            child_id: id,
            kind,
            index,
        });
        trace!("{:?}", diff);
        self.batch.append_children_diff(diff);
        Ok(id)
    }

    /// Relocates `count` children of `parent` starting at `from_index`.
    ///
    /// `to_index` is measured before the run is taken out of the list.
    pub fn move_children(
        &mut self,
        parent: WidgetId,
        tag: ChildrenTag,
        from_index: usize,
        to_index: usize,
        count: usize,
    ) -> Result<(), ComposeError> {
        let children = self.children_mut(parent, tag)?;
        move_range(children, from_index, to_index, count).map_err(|source| {
            ComposeError::InvalidRange {
                id: parent,
                tag,
                source,
            }
        })?;

        let diff = ChildrenDiff::Move(Move {
            id: parent,
            tag,
            from_index,
            to_index,
            count,
        });
        trace!("{:?}", diff);
        self.batch.append_children_diff(diff);
        Ok(())
    }

    /// Removes `count` children of `parent` starting at `index`.
    ///
    /// Returns every id released by the removal, including descendants of the
    /// removed children. Released ids are never handed out again.
    pub fn remove(
        &mut self,
        parent: WidgetId,
        tag: ChildrenTag,
        index: usize,
        count: usize,
    ) -> Result<Vec<WidgetId>, ComposeError> {
        let children = self.children_mut(parent, tag)?;
        let removed_ids =
            remove_range(children, index, count).map_err(|source| ComposeError::InvalidRange {
                id: parent,
                tag,
                source,
            })?;

        let mut released = Vec::with_capacity(removed_ids.len());
        for removed_id in &removed_ids {
            self.release_subtree(*removed_id, &mut released);
        }

        let remove = Remove::new(parent, tag, index, count, removed_ids)?;
        let diff = ChildrenDiff::Remove(remove);
        trace!("{:?}", diff);
        self.batch.append_children_diff(diff);
        self.batch.discard_released(&released);
        Ok(released)
    }

    /// Resets the tree to only the root.
    ///
    /// Returns every id released by the reset.
    pub fn clear(&mut self) -> Vec<WidgetId> {
        let released: Vec<WidgetId> = self
            .nodes
            .keys()
            .copied()
            .filter(|id| !id.is_root())
            .collect();
        self.nodes.clear();
        self.nodes.insert(WidgetId::ROOT, ProtocolNode::root());

        trace!("{:?}", ChildrenDiff::Clear);
        self.batch.append_children_diff(ChildrenDiff::Clear);
        self.batch.discard_released(&released);
        released
    }

    /// Records a property change on `id`.
    ///
    /// The node is not resolved here; only the display enforces existence.
    pub fn set_property(&mut self, id: WidgetId, tag: PropertyTag, value: impl Into<Value>) {
        let diff = PropertyDiff::new(id, tag, value);
        trace!("{:?}", diff);
        self.batch.append_property_diff(diff);
    }

    /// Replaces the layout modifier chain of `id`.
    pub fn set_layout_modifiers(&mut self, id: WidgetId, elements: Vec<LayoutModifierElement>) {
        let layout_modifiers = LayoutModifiers { id, elements };
        trace!("{:?}", layout_modifiers);
        self.batch.append_layout_modifiers(layout_modifiers);
    }

    // Batching

    /// Hands out everything recorded since the last flush, or `None` if the
    /// tree did not change.
    pub fn flush(&mut self) -> Option<Diff> {
        self.batch.take()
    }

    pub fn has_pending_diffs(&self) -> bool {
        !self.batch.is_empty()
    }

    // Queries

    pub fn node(&self, id: &WidgetId) -> Option<&ProtocolNode> {
        self.nodes.get(id)
    }

    pub fn contains(&self, id: &WidgetId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of live nodes, including the root.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn node_ids(&self) -> impl Iterator<Item = &WidgetId> {
        self.nodes.keys()
    }

    /// The id the next insert will allocate.
    pub fn next_id(&self) -> WidgetId {
        self.id_generator.peek()
    }

    // Private

    fn children_mut(
        &mut self,
        parent: WidgetId,
        tag: ChildrenTag,
    ) -> Result<&mut Vec<WidgetId>, ComposeError> {
        let node = self
            .nodes
            .get_mut(&parent)
            .ok_or(ComposeError::UnknownNode { id: parent })?;
        if node.is_root() && tag != ChildrenTag::ROOT {
            return Err(ComposeError::InvalidRootChildren { tag });
        }
        Ok(node.children_mut(tag))
    }

    fn release_subtree(&mut self, id: WidgetId, released: &mut Vec<WidgetId>) {
        let mut pending = vec![id];
        while let Some(id) = pending.pop() {
            if let Some(node) = self.nodes.remove(&id) {
                pending.extend(node.all_children().copied());
                released.push(id);
            }
        }
    }
}
