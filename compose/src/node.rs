use std::collections::HashMap;

use treehouse_shared::{ChildrenTag, WidgetId, WidgetTag};

/// Producer-side bookkeeping for one node of the tree.
///
/// Only structure is tracked here; property values live in the composition
/// and are never read back.
#[derive(Debug, Clone)]
pub struct ProtocolNode {
    kind: Option<WidgetTag>,
    children: HashMap<ChildrenTag, Vec<WidgetId>>,
}

impl ProtocolNode {
    pub(crate) fn root() -> Self {
        Self {
            kind: None,
            children: HashMap::from([(ChildrenTag::ROOT, Vec::new())]),
        }
    }

    pub(crate) fn new(kind: WidgetTag) -> Self {
        Self {
            kind: Some(kind),
            children: HashMap::new(),
        }
    }

    /// The widget type of this node, or `None` for the synthetic root.
    pub fn kind(&self) -> Option<WidgetTag> {
        self.kind
    }

    pub fn is_root(&self) -> bool {
        self.kind.is_none()
    }

    pub fn children(&self, tag: ChildrenTag) -> &[WidgetId] {
        self.children.get(&tag).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn children_tags(&self) -> impl Iterator<Item = &ChildrenTag> {
        self.children.keys()
    }

    pub(crate) fn children_mut(&mut self, tag: ChildrenTag) -> &mut Vec<WidgetId> {
        self.children.entry(tag).or_default()
    }

    pub(crate) fn all_children(&self) -> impl Iterator<Item = &WidgetId> {
        self.children.values().flatten()
    }
}
