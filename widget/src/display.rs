use std::collections::HashMap;

use log::{debug, trace};

use treehouse_shared::{
    check_insert, check_move, check_run, move_range, remove_range, ChildrenDiff, ChildrenTag,
    Diff, Insert, LayoutModifiers, Move, PropertyDiff, RangeError, Remove, SharedEventSink,
    WidgetId, WidgetTag,
};

use crate::{
    mismatch::mismatch_handler_for, DiffConsumingWidget, DisplayConfig, DisplayError,
    ProtocolMismatchHandler, WidgetChildren, WidgetFactory,
};

struct DisplayNode<W> {
    // `None` only for the root
    kind: Option<WidgetTag>,
    // `None` when the widget type, or one of its ancestors, could not be
    // created locally
    widget: Option<Box<dyn DiffConsumingWidget<W>>>,
    children: HashMap<ChildrenTag, Vec<WidgetId>>,
}

impl<W> DisplayNode<W> {
    fn children(&self, tag: ChildrenTag) -> &[WidgetId] {
        self.children.get(&tag).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Replays protocol diffs onto a tree of concrete widgets.
///
/// Alongside the concrete widgets the display keeps its own mirror of every
/// node's child ids, so it always tracks the same tree shape as the producer.
/// Nodes whose widgets could not be created under a tolerant mismatch policy
/// stay in the mirror without a concrete widget; child indices are mapped
/// around them before reaching a concrete child collection.
pub struct ProtocolDisplay<W> {
    nodes: HashMap<WidgetId, DisplayNode<W>>,
    factory: Box<dyn WidgetFactory<W>>,
    event_sink: SharedEventSink,
    mismatch_handler: Box<dyn ProtocolMismatchHandler>,
}

impl<W: 'static> ProtocolDisplay<W> {
    /// Create a new display rooted at `root`.
    ///
    /// Fails if `root` does not expose children for [`ChildrenTag::ROOT`].
    pub fn new(
        mut root: Box<dyn DiffConsumingWidget<W>>,
        factory: impl WidgetFactory<W> + 'static,
        event_sink: SharedEventSink,
        config: DisplayConfig,
    ) -> Result<Self, DisplayError> {
        if root.children(ChildrenTag::ROOT).is_none() {
            return Err(DisplayError::MissingRootChildren);
        }

        let root_node = DisplayNode {
            kind: None,
            widget: Some(root),
            children: HashMap::from([(ChildrenTag::ROOT, Vec::new())]),
        };
        Ok(Self {
            nodes: HashMap::from([(WidgetId::ROOT, root_node)]),
            factory: Box::new(factory),
            event_sink,
            mismatch_handler: mismatch_handler_for(config.mismatch_policy),
        })
    }

    /// Replace the handler chosen by the configured mismatch policy
    pub fn with_mismatch_handler(
        mut self,
        handler: impl ProtocolMismatchHandler + 'static,
    ) -> Self {
        self.mismatch_handler = Box::new(handler);
        self
    }

    /// Apply one batch: children diffs first, then layout modifiers, then
    /// property diffs, each list in order.
    ///
    /// Stops at the first failing diff. Diffs before it stay applied, so
    /// after an error the tree must be rebuilt starting from a `Clear`.
    pub fn send_diff(&mut self, diff: &Diff) -> Result<(), DisplayError> {
        debug!(
            "Applying diff: {} children, {} layout modifiers, {} properties",
            diff.children_diffs.len(),
            diff.layout_modifiers.len(),
            diff.property_diffs.len()
        );

        for children_diff in &diff.children_diffs {
            trace!("{:?}", children_diff);
            match children_diff {
                ChildrenDiff::Insert(insert) => self.insert(insert)?,
                ChildrenDiff::Move(move_diff) => self.move_children(move_diff)?,
                ChildrenDiff::Remove(remove) => self.remove(remove)?,
                ChildrenDiff::Clear => self.clear()?,
            }
        }

        for layout_modifiers in &diff.layout_modifiers {
            trace!("{:?}", layout_modifiers);
            self.update_layout_modifiers(layout_modifiers)?;
        }

        for property_diff in &diff.property_diffs {
            trace!("{:?}", property_diff);
            self.apply_property(property_diff)?;
        }

        Ok(())
    }

    // Queries

    /// Whether `id` is part of the tree, with or without a concrete widget.
    pub fn contains(&self, id: &WidgetId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Whether `id` is backed by a concrete widget.
    pub fn is_rendered(&self, id: &WidgetId) -> bool {
        self.nodes
            .get(id)
            .is_some_and(|node| node.widget.is_some())
    }

    /// Number of tracked nodes, including the root.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of concrete widgets, including the root.
    pub fn widget_count(&self) -> usize {
        self.nodes
            .values()
            .filter(|node| node.widget.is_some())
            .count()
    }

    pub fn kind(&self, id: &WidgetId) -> Option<WidgetTag> {
        self.nodes.get(id).and_then(|node| node.kind)
    }

    /// The ids in `id`'s `tag` children, in order.
    pub fn children(&self, id: &WidgetId, tag: ChildrenTag) -> Option<&[WidgetId]> {
        self.nodes.get(id).map(|node| node.children(tag))
    }

    pub fn event_sink(&self) -> &SharedEventSink {
        &self.event_sink
    }

    // Children diffs

    fn insert(&mut self, insert: &Insert) -> Result<(), DisplayError> {
        let siblings = self.mirror(insert.id, insert.tag)?;
        check_insert(insert.index, siblings.len())
            .map_err(|source| invalid_range(insert.id, insert.tag, source))?;
        let concrete_index = self.rendered_count(&siblings[..insert.index]);
        if self.nodes.contains_key(&insert.child_id) {
            return Err(DisplayError::DuplicateWidgetId {
                id: insert.child_id,
            });
        }

        let widget = if self.resolve_children(insert.id, insert.tag)? {
            let created = self.factory.create(insert.kind);
            if created.is_none() {
                self.mismatch_handler.on_unknown_widget(insert.kind)?;
            }
            created
        } else {
            None
        };

        if let Some(widget) = &widget {
            let value = widget.value();
            if let Some(children) = self.concrete_children(insert.id, insert.tag) {
                children.insert(concrete_index, value);
            }
        }

        self.nodes.insert(
            insert.child_id,
            DisplayNode {
                kind: Some(insert.kind),
                widget,
                children: HashMap::new(),
            },
        );
        self.mirror_mut(insert.id, insert.tag)?
            .insert(insert.index, insert.child_id);
        Ok(())
    }

    fn move_children(&mut self, move_diff: &Move) -> Result<(), DisplayError> {
        let Move {
            id,
            tag,
            from_index,
            to_index,
            count,
        } = *move_diff;

        let siblings = self.mirror(id, tag)?;
        check_move(from_index, to_index, count, siblings.len())
            .map_err(|source| invalid_range(id, tag, source))?;
        let concrete_from = self.rendered_count(&siblings[..from_index]);
        let concrete_to = self.rendered_count(&siblings[..to_index]);
        let concrete_count = self.rendered_count(&siblings[from_index..from_index + count]);

        if self.resolve_children(id, tag)? && concrete_count > 0 {
            if let Some(children) = self.concrete_children(id, tag) {
                children.move_range(concrete_from, concrete_to, concrete_count);
            }
        }

        move_range(self.mirror_mut(id, tag)?, from_index, to_index, count)
            .map_err(|source| invalid_range(id, tag, source))
    }

    fn remove(&mut self, remove: &Remove) -> Result<(), DisplayError> {
        let (id, tag, index, count) = (remove.id(), remove.tag(), remove.index(), remove.count());

        let siblings = self.mirror(id, tag)?;
        check_run(index, count, siblings.len()).map_err(|source| invalid_range(id, tag, source))?;
        if &siblings[index..index + count] != remove.removed_ids() {
            return Err(DisplayError::RemovedIdsMismatch { id, tag, index });
        }
        let concrete_index = self.rendered_count(&siblings[..index]);
        let concrete_count = self.rendered_count(&siblings[index..index + count]);

        if self.resolve_children(id, tag)? && concrete_count > 0 {
            if let Some(children) = self.concrete_children(id, tag) {
                children.remove(concrete_index, concrete_count);
            }
        }

        let removed_ids = remove_range(self.mirror_mut(id, tag)?, index, count)
            .map_err(|source| invalid_range(id, tag, source))?;
        for removed_id in removed_ids {
            self.unregister_subtree(removed_id);
        }
        Ok(())
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        let children = self
            .concrete_children(WidgetId::ROOT, ChildrenTag::ROOT)
            .ok_or(DisplayError::MissingRootChildren)?;
        children.clear();

        self.nodes.retain(|id, _| id.is_root());
        self.mirror_mut(WidgetId::ROOT, ChildrenTag::ROOT)?.clear();
        Ok(())
    }

    // Layout modifier & property diffs

    fn update_layout_modifiers(
        &mut self,
        layout_modifiers: &LayoutModifiers,
    ) -> Result<(), DisplayError> {
        let id = layout_modifiers.id;
        if !self.resolve_modifiable(id)? {
            trace!("Skipping layout modifiers for unrendered widget {}", id);
            return Ok(());
        }

        let mut elements = Vec::with_capacity(layout_modifiers.elements.len());
        for element in &layout_modifiers.elements {
            if self.factory.supports_layout_modifier(element.tag) {
                elements.push(element.clone());
            } else {
                self.mismatch_handler.on_unknown_layout_modifier(element.tag)?;
            }
        }

        match self.nodes.get_mut(&id).and_then(|node| node.widget.as_mut()) {
            Some(widget) => widget.update_layout_modifiers(&elements),
            None => Ok(()),
        }
    }

    fn apply_property(&mut self, diff: &PropertyDiff) -> Result<(), DisplayError> {
        if !self.resolve_modifiable(diff.id)? {
            trace!("Skipping property {} for unrendered widget {}", diff.tag, diff.id);
            return Ok(());
        }

        let Some(widget) = self
            .nodes
            .get_mut(&diff.id)
            .and_then(|node| node.widget.as_mut())
        else {
            return Ok(());
        };
        match widget.apply(diff, &self.event_sink) {
            Err(DisplayError::UnknownProperty { widget_tag, tag }) => {
                self.mismatch_handler.on_unknown_property(widget_tag, tag)
            }
            result => result,
        }
    }

    // Private

    /// The mirrored child ids of `id`'s `tag` children.
    fn mirror(&self, id: WidgetId, tag: ChildrenTag) -> Result<&[WidgetId], DisplayError> {
        let node = self
            .nodes
            .get(&id)
            .ok_or(DisplayError::UnknownWidgetId { id })?;
        if id.is_root() && tag != ChildrenTag::ROOT {
            return Err(DisplayError::InvalidRootChildren { tag });
        }
        Ok(node.children(tag))
    }

    fn mirror_mut(
        &mut self,
        id: WidgetId,
        tag: ChildrenTag,
    ) -> Result<&mut Vec<WidgetId>, DisplayError> {
        let node = self
            .nodes
            .get_mut(&id)
            .ok_or(DisplayError::UnknownWidgetId { id })?;
        Ok(node.children.entry(tag).or_default())
    }

    fn rendered_count(&self, ids: &[WidgetId]) -> usize {
        ids.iter().filter(|id| self.is_rendered(id)).count()
    }

    /// Whether `id` has a concrete child collection for `tag`. A rendered
    /// widget without one is reported to the mismatch handler.
    fn resolve_children(&mut self, id: WidgetId, tag: ChildrenTag) -> Result<bool, DisplayError> {
        let node = self
            .nodes
            .get_mut(&id)
            .ok_or(DisplayError::UnknownWidgetId { id })?;
        let Some(widget) = node.widget.as_mut() else {
            return Ok(false);
        };
        if widget.children(tag).is_some() {
            return Ok(true);
        }

        match node.kind {
            Some(widget_tag) => {
                self.mismatch_handler.on_unknown_children(widget_tag, tag)?;
                Ok(false)
            }
            None => Err(DisplayError::MissingRootChildren),
        }
    }

    fn concrete_children(
        &mut self,
        id: WidgetId,
        tag: ChildrenTag,
    ) -> Option<&mut dyn WidgetChildren<W>> {
        self.nodes.get_mut(&id)?.widget.as_mut()?.children(tag)
    }

    /// Whether property and layout modifier diffs for `id` reach a widget.
    fn resolve_modifiable(&self, id: WidgetId) -> Result<bool, DisplayError> {
        if id.is_root() {
            return Err(DisplayError::RootNotModifiable);
        }
        self.nodes
            .get(&id)
            .map(|node| node.widget.is_some())
            .ok_or(DisplayError::UnknownWidgetId { id })
    }

    fn unregister_subtree(&mut self, id: WidgetId) {
        let mut pending = vec![id];
        while let Some(id) = pending.pop() {
            if let Some(node) = self.nodes.remove(&id) {
                pending.extend(node.children.into_values().flatten());
            }
        }
    }
}

fn invalid_range(id: WidgetId, tag: ChildrenTag, source: RangeError) -> DisplayError {
    DisplayError::InvalidRange { id, tag, source }
}
