use thiserror::Error;

use treehouse_shared::{
    ChildrenTag, LayoutModifierTag, PropertyTag, RangeError, WidgetId, WidgetTag,
};

/// Errors that can occur while replaying diffs onto concrete widgets
///
/// A diff batch is not rolled back when one of its diffs fails. After an error
/// the display must be reset by replaying the tree from a `Clear`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DisplayError {
    /// A diff referenced a widget that is not part of the tree
    #[error("Unknown widget ID {id}")]
    UnknownWidgetId { id: WidgetId },

    /// An insert reused the id of a live widget
    #[error("Widget ID {id} already exists")]
    DuplicateWidgetId { id: WidgetId },

    /// The root widget handed to the display has no root children
    #[error("Root widget must expose children for tag {}", ChildrenTag::ROOT)]
    MissingRootChildren,

    /// Only the root's own child slot may be edited on the root
    #[error("Root widget has no children tag {tag}")]
    InvalidRootChildren { tag: ChildrenTag },

    /// A property or layout modifier diff targeted the root
    #[error("Root widget does not accept property or layout modifier diffs")]
    RootNotModifiable,

    /// The factory cannot create widgets of this type
    #[error("Unknown widget tag {tag}")]
    UnknownWidget { tag: WidgetTag },

    /// The widget has no child collection with this tag
    #[error("Unknown children tag {tag} for widget tag {widget_tag}")]
    UnknownChildren { widget_tag: WidgetTag, tag: ChildrenTag },

    /// The widget has no property with this tag
    #[error("Unknown property tag {tag} for widget tag {widget_tag}")]
    UnknownProperty { widget_tag: WidgetTag, tag: PropertyTag },

    /// The widget does not support this layout modifier
    #[error("Unknown layout modifier tag {tag}")]
    UnknownLayoutModifier { tag: LayoutModifierTag },

    /// A property value did not have the shape the widget expects
    #[error("Invalid value for property tag {tag} of widget tag {widget_tag}: {reason}")]
    InvalidPropertyValue {
        widget_tag: WidgetTag,
        tag: PropertyTag,
        reason: String,
    },

    /// An insert, move or remove described a run that does not fit the slot
    #[error("Invalid run on children {tag} of widget {id}: {source}")]
    InvalidRange {
        id: WidgetId,
        tag: ChildrenTag,
        #[source]
        source: RangeError,
    },

    /// A remove named ids other than the ones at its run
    #[error("Removed IDs do not match children {tag} of widget {id} at index {index}")]
    RemovedIdsMismatch {
        id: WidgetId,
        tag: ChildrenTag,
        index: usize,
    },
}
