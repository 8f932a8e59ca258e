use thiserror::Error;

use treehouse_shared::{ChildrenTag, EventTag, ProtocolError, RangeError, WidgetId, WidgetTag};

/// Errors that can occur while editing a composition or routing its events
///
/// Edits are issued by the reactive engine, which is trusted to describe valid
/// runs. These errors surface the cases where it did not, before a malformed
/// diff can reach the display.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComposeError {
    /// An edit targeted a node that is not part of the tree
    #[error("Unknown node {id}")]
    UnknownNode { id: WidgetId },

    /// Only the root's own child slot may be edited on the root
    #[error("Root node has no children tag {tag}")]
    InvalidRootChildren { tag: ChildrenTag },

    /// An insert, move or remove described a run that does not fit the slot
    #[error("Invalid run on children {tag} of node {id}: {source}")]
    InvalidRange {
        id: WidgetId,
        tag: ChildrenTag,
        #[source]
        source: RangeError,
    },

    /// An event arrived for a node that is no longer part of the tree
    #[error("Unknown node ID {id} for event with tag {tag}")]
    UnknownEventNode { id: WidgetId, tag: EventTag },

    /// An event arrived with a tag the target widget does not handle
    #[error("Unknown event tag {tag} for widget tag {widget_tag}")]
    UnknownEvent { widget_tag: WidgetTag, tag: EventTag },

    /// A diff could not be built from the edit
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// The composition was cancelled and accepts no further edits
    #[error("Composition has been cancelled")]
    Cancelled,
}
