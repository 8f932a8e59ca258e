use treehouse_shared::{
    ChildrenTag, LayoutModifierElement, LayoutModifierTag, PropertyDiff, SharedEventSink,
    WidgetTag,
};

use crate::DisplayError;

/// One ordered child collection of a concrete widget.
///
/// The display validates every run against its own mirror of the tree before
/// calling in, so implementations may assume indices are in bounds. `move_range`
/// follows the convention of [`treehouse_shared::move_range`]: `to_index` is
/// measured before the run is taken out of the list.
pub trait WidgetChildren<W> {
    fn insert(&mut self, index: usize, widget: W);
    fn move_range(&mut self, from_index: usize, to_index: usize, count: usize);
    fn remove(&mut self, index: usize, count: usize);
    fn clear(&mut self);
}

/// A concrete platform widget driven by protocol diffs.
///
/// `W` is the platform's handle type, the value a parent's child collection
/// stores for this widget.
pub trait DiffConsumingWidget<W> {
    /// The handle inserted into the parent's child collection.
    fn value(&self) -> W;

    /// Apply one property change.
    ///
    /// Event properties keep a clone of `event_sink` and call it from the
    /// native interaction callback; a `null` value removes the callback.
    /// Unrecognized tags are reported as [`DisplayError::UnknownProperty`] and
    /// handed to the display's mismatch handler.
    fn apply(
        &mut self,
        diff: &PropertyDiff,
        event_sink: &SharedEventSink,
    ) -> Result<(), DisplayError>;

    /// The child collection for `tag`, or `None` if this widget type has none.
    fn children(&mut self, tag: ChildrenTag) -> Option<&mut dyn WidgetChildren<W>>;

    /// Replace the layout modifier chain.
    ///
    /// Elements the factory does not support have already been filtered out.
    fn update_layout_modifiers(
        &mut self,
        _elements: &[LayoutModifierElement],
    ) -> Result<(), DisplayError> {
        Ok(())
    }
}

/// Creates concrete widgets by widget type.
pub trait WidgetFactory<W> {
    /// `None` if this platform has no widget of type `kind`.
    fn create(&mut self, kind: WidgetTag) -> Option<Box<dyn DiffConsumingWidget<W>>>;

    fn supports_layout_modifier(&self, _tag: LayoutModifierTag) -> bool {
        true
    }
}
