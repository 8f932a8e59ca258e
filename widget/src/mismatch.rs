use log::warn;

use treehouse_shared::{ChildrenTag, LayoutModifierTag, MismatchPolicy, PropertyTag, WidgetTag};

use crate::DisplayError;

/// Handler invoked when a diff names something the local widget bindings do
/// not know.
///
/// This is the normal outcome of an older display receiving diffs produced
/// from a newer schema. Returning `Ok` skips the offending operation; the rest
/// of the batch is still applied.
pub trait ProtocolMismatchHandler {
    /// The factory could not create a widget of type `tag`.
    ///
    /// When skipped, the node and its whole subtree are tracked without
    /// concrete widgets, and later diffs targeting them are ignored.
    fn on_unknown_widget(&mut self, tag: WidgetTag) -> Result<(), DisplayError>;

    /// A widget rejected one element of its layout modifier chain.
    fn on_unknown_layout_modifier(&mut self, tag: LayoutModifierTag) -> Result<(), DisplayError>;

    /// A widget of type `widget_tag` has no child collection `tag`.
    fn on_unknown_children(
        &mut self,
        widget_tag: WidgetTag,
        tag: ChildrenTag,
    ) -> Result<(), DisplayError>;

    /// A widget of type `widget_tag` has no property `tag`.
    fn on_unknown_property(
        &mut self,
        widget_tag: WidgetTag,
        tag: PropertyTag,
    ) -> Result<(), DisplayError>;
}

/// Fails the batch at the first unknown value.
#[derive(Debug, Default)]
pub struct ThrowingMismatchHandler;

impl ProtocolMismatchHandler for ThrowingMismatchHandler {
    fn on_unknown_widget(&mut self, tag: WidgetTag) -> Result<(), DisplayError> {
        Err(DisplayError::UnknownWidget { tag })
    }

    fn on_unknown_layout_modifier(&mut self, tag: LayoutModifierTag) -> Result<(), DisplayError> {
        Err(DisplayError::UnknownLayoutModifier { tag })
    }

    fn on_unknown_children(
        &mut self,
        widget_tag: WidgetTag,
        tag: ChildrenTag,
    ) -> Result<(), DisplayError> {
        Err(DisplayError::UnknownChildren { widget_tag, tag })
    }

    fn on_unknown_property(
        &mut self,
        widget_tag: WidgetTag,
        tag: PropertyTag,
    ) -> Result<(), DisplayError> {
        Err(DisplayError::UnknownProperty { widget_tag, tag })
    }
}

/// Logs every unknown value and skips the operation.
#[derive(Debug, Default)]
pub struct LoggingMismatchHandler;

impl ProtocolMismatchHandler for LoggingMismatchHandler {
    fn on_unknown_widget(&mut self, tag: WidgetTag) -> Result<(), DisplayError> {
        warn!("Skipping widget with unknown tag {}", tag);
        Ok(())
    }

    fn on_unknown_layout_modifier(&mut self, tag: LayoutModifierTag) -> Result<(), DisplayError> {
        warn!("Skipping layout modifier with unknown tag {}", tag);
        Ok(())
    }

    fn on_unknown_children(
        &mut self,
        widget_tag: WidgetTag,
        tag: ChildrenTag,
    ) -> Result<(), DisplayError> {
        warn!("Skipping unknown children tag {} for widget tag {}", tag, widget_tag);
        Ok(())
    }

    fn on_unknown_property(
        &mut self,
        widget_tag: WidgetTag,
        tag: PropertyTag,
    ) -> Result<(), DisplayError> {
        warn!("Skipping unknown property tag {} for widget tag {}", tag, widget_tag);
        Ok(())
    }
}

pub(crate) fn mismatch_handler_for(policy: MismatchPolicy) -> Box<dyn ProtocolMismatchHandler> {
    match policy {
        MismatchPolicy::Strict => Box::new(ThrowingMismatchHandler),
        MismatchPolicy::Tolerant => Box::new(LoggingMismatchHandler),
    }
}
