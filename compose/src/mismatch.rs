use log::warn;

use treehouse_shared::{EventTag, MismatchPolicy, WidgetId, WidgetTag};

use crate::ComposeError;

/// Handler invoked when an event sent back from the display cannot be routed.
///
/// This usually happens when the display was built from a newer schema than
/// the composition, or when an event raced with the removal of its node.
pub trait ProtocolMismatchHandler {
    /// An event `tag` the widget `widget_tag` has no handler for.
    ///
    /// Invoked once per event, so repeated clicks on the same widget invoke it
    /// repeatedly.
    fn on_unknown_event(
        &mut self,
        widget_tag: WidgetTag,
        tag: EventTag,
    ) -> Result<(), ComposeError>;

    /// An event for node `id`, which is not part of the tree.
    fn on_unknown_event_node(&mut self, id: WidgetId, tag: EventTag) -> Result<(), ComposeError>;
}

/// Fails every unroutable event.
#[derive(Debug, Default)]
pub struct ThrowingMismatchHandler;

impl ProtocolMismatchHandler for ThrowingMismatchHandler {
    fn on_unknown_event(
        &mut self,
        widget_tag: WidgetTag,
        tag: EventTag,
    ) -> Result<(), ComposeError> {
        Err(ComposeError::UnknownEvent { widget_tag, tag })
    }

    fn on_unknown_event_node(&mut self, id: WidgetId, tag: EventTag) -> Result<(), ComposeError> {
        Err(ComposeError::UnknownEventNode { id, tag })
    }
}

/// Logs and drops every unroutable event.
#[derive(Debug, Default)]
pub struct LoggingMismatchHandler;

impl ProtocolMismatchHandler for LoggingMismatchHandler {
    fn on_unknown_event(
        &mut self,
        widget_tag: WidgetTag,
        tag: EventTag,
    ) -> Result<(), ComposeError> {
        warn!("Dropping event with unknown tag {} for widget tag {}", tag, widget_tag);
        Ok(())
    }

    fn on_unknown_event_node(&mut self, id: WidgetId, tag: EventTag) -> Result<(), ComposeError> {
        warn!("Dropping event with tag {} for unknown node {}", tag, id);
        Ok(())
    }
}

pub(crate) fn mismatch_handler_for(policy: MismatchPolicy) -> Box<dyn ProtocolMismatchHandler> {
    match policy {
        MismatchPolicy::Strict => Box::new(ThrowingMismatchHandler),
        MismatchPolicy::Tolerant => Box::new(LoggingMismatchHandler),
    }
}
