use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{ChildrenTag, LayoutModifierTag, PropertyTag, ProtocolError, WidgetId, WidgetTag};

/// One atomic batch of structural and property changes.
///
/// Children diffs are applied first, in order, then layout modifiers, then
/// property diffs. Later entries may depend on earlier ones (a parent is
/// inserted before its children), so order within each list is significant.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diff {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children_diffs: Vec<ChildrenDiff>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub layout_modifiers: Vec<LayoutModifiers>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub property_diffs: Vec<PropertyDiff>,
}

impl Diff {
    pub fn is_empty(&self) -> bool {
        self.children_diffs.is_empty()
            && self.layout_modifiers.is_empty()
            && self.property_diffs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.children_diffs.len() + self.layout_modifiers.len() + self.property_diffs.len()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ChildrenDiff {
    Insert(Insert),
    Move(Move),
    Remove(Remove),
    /// Resets the whole tree to only the root. Always targets the root slot.
    Clear,
}

impl ChildrenDiff {
    /// The widget whose children change.
    pub fn id(&self) -> WidgetId {
        match self {
            ChildrenDiff::Insert(insert) => insert.id,
            ChildrenDiff::Move(mv) => mv.id,
            ChildrenDiff::Remove(remove) => remove.id,
            ChildrenDiff::Clear => WidgetId::ROOT,
        }
    }

    /// The child slot of [`id`](Self::id) that changes.
    pub fn tag(&self) -> ChildrenTag {
        match self {
            ChildrenDiff::Insert(insert) => insert.tag,
            ChildrenDiff::Move(mv) => mv.tag,
            ChildrenDiff::Remove(remove) => remove.tag,
            ChildrenDiff::Clear => ChildrenTag::ROOT,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ChildrenDiff::Insert(_) => "insert",
            ChildrenDiff::Move(_) => "move",
            ChildrenDiff::Remove(_) => "remove",
            ChildrenDiff::Clear => "clear",
        }
    }
}

/// Create widget `child_id` of type `kind` and insert it at `index`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insert {
    pub id: WidgetId,
    pub tag: ChildrenTag,
    pub child_id: WidgetId,
    pub kind: WidgetTag,
    pub index: usize,
}

/// Relocate the contiguous run `from_index..from_index + count`.
///
/// `to_index` is expressed in the coordinates of the list before the run is
/// taken out; see [`move_range`](crate::move_range).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Move {
    pub id: WidgetId,
    pub tag: ChildrenTag,
    pub from_index: usize,
    pub to_index: usize,
    pub count: usize,
}

/// Delete the contiguous run `index..index + count`.
///
/// The removed ids travel with the diff; their number always equals `count`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Remove {
    id: WidgetId,
    tag: ChildrenTag,
    index: usize,
    count: usize,
    removed_ids: Vec<WidgetId>,
}

impl Remove {
    pub fn new(
        id: WidgetId,
        tag: ChildrenTag,
        index: usize,
        count: usize,
        removed_ids: Vec<WidgetId>,
    ) -> Result<Self, ProtocolError> {
        if count != removed_ids.len() {
            return Err(ProtocolError::RemoveCountMismatch {
                count,
                removed: removed_ids.len(),
            });
        }
        Ok(Self {
            id,
            tag,
            index,
            count,
            removed_ids,
        })
    }

    pub fn id(&self) -> WidgetId {
        self.id
    }

    pub fn tag(&self) -> ChildrenTag {
        self.tag
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn removed_ids(&self) -> &[WidgetId] {
        &self.removed_ids
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RemoveFields {
    id: WidgetId,
    tag: ChildrenTag,
    index: usize,
    count: usize,
    removed_ids: Vec<WidgetId>,
}

impl<'de> Deserialize<'de> for Remove {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let fields = RemoveFields::deserialize(deserializer)?;
        Remove::new(
            fields.id,
            fields.tag,
            fields.index,
            fields.count,
            fields.removed_ids,
        )
        .map_err(serde::de::Error::custom)
    }
}

/// A property of widget `id` changed to `value`.
///
/// A `null` value is meaningful: for optional event properties it signals
/// that the handler was removed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PropertyDiff {
    pub id: WidgetId,
    pub tag: PropertyTag,
    #[serde(default)]
    pub value: Value,
}

impl PropertyDiff {
    pub fn new(id: WidgetId, tag: PropertyTag, value: impl Into<Value>) -> Self {
        Self {
            id,
            tag,
            value: value.into(),
        }
    }
}

/// The full layout modifier chain of widget `id`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayoutModifiers {
    pub id: WidgetId,
    #[serde(default)]
    pub elements: Vec<LayoutModifierElement>,
}

/// One element of a layout modifier chain.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayoutModifierElement {
    pub tag: LayoutModifierTag,
    #[serde(default)]
    pub value: Value,
}
