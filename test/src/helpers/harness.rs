use std::sync::{
    mpsc::{channel, Receiver, Sender},
    Arc,
};

use log::trace;
use thiserror::Error;

use treehouse_compose::{ComposeConfig, ComposeError, ProtocolComposition};
use treehouse_shared::{
    decode_diff_bytes, encode_diff_bytes, ChildrenTag, CodecError, Diff, Event,
    LayoutModifierElement, SharedEventSink, WidgetId,
};
use treehouse_widget::{DisplayConfig, DisplayError, ProtocolDisplay};

use crate::{
    edit_script::TreeEdit,
    reference_tree::ReferenceTree,
    test_schema::{ButtonEvent, ButtonProperty, TextProperty, WidgetKind},
    test_widget::{RootWidget, TestWidgetFactory, ViewRef, ViewSnapshot},
};

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error(transparent)]
    Compose(#[from] ComposeError),
    #[error(transparent)]
    Display(#[from] DisplayError),
    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// A composition wired to a display the way a remote deployment wires them:
/// diff batches cross a channel as encoded JSON, events come back over a
/// second channel.
///
/// Every edit is mirrored into a [`ReferenceTree`].
pub struct TestHarness {
    composition: ProtocolComposition<Sender<Diff>>,
    diffs: Receiver<Diff>,
    display: ProtocolDisplay<ViewRef>,
    events: Receiver<Event>,
    root: ViewRef,
    reference: ReferenceTree,
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

impl TestHarness {
    pub fn new() -> Self {
        Self::with_configs(
            ComposeConfig::default(),
            DisplayConfig::default(),
            TestWidgetFactory::new(),
        )
    }

    pub fn with_configs(
        compose_config: ComposeConfig,
        display_config: DisplayConfig,
        factory: TestWidgetFactory,
    ) -> Self {
        let (diff_sender, diffs) = channel::<Diff>();
        let (event_sender, events) = channel::<Event>();
        let event_sink: SharedEventSink = Arc::new(event_sender);

        let (root_widget, root) = RootWidget::new();
        let display =
            ProtocolDisplay::new(Box::new(root_widget), factory, event_sink, display_config)
                .unwrap_or_else(|error| panic!("Test root rejected: {}", error));

        Self {
            composition: ProtocolComposition::new(compose_config, diff_sender),
            diffs,
            display,
            events,
            root,
            reference: ReferenceTree::new(),
        }
    }

    // Edits

    pub fn insert(
        &mut self,
        parent: WidgetId,
        tag: ChildrenTag,
        index: usize,
        kind: WidgetKind,
    ) -> Result<WidgetId, HarnessError> {
        let id = self.composition.insert(parent, tag, index, kind.tag())?;
        self.reference.insert(parent, tag, index, id, kind);
        Ok(id)
    }

    pub fn move_children(
        &mut self,
        parent: WidgetId,
        tag: ChildrenTag,
        from_index: usize,
        to_index: usize,
        count: usize,
    ) -> Result<(), HarnessError> {
        self.composition
            .move_children(parent, tag, from_index, to_index, count)?;
        self.reference
            .move_children(parent, tag, from_index, to_index, count);
        Ok(())
    }

    pub fn remove(
        &mut self,
        parent: WidgetId,
        tag: ChildrenTag,
        index: usize,
        count: usize,
    ) -> Result<Vec<WidgetId>, HarnessError> {
        let released = self.composition.remove(parent, tag, index, count)?;
        self.reference.remove(parent, tag, index, count);
        Ok(released)
    }

    pub fn clear(&mut self) -> Result<(), HarnessError> {
        self.composition.clear()?;
        self.reference.clear();
        Ok(())
    }

    /// Sets the text of a `Text` or `Button`.
    pub fn set_text(&mut self, id: WidgetId, text: Option<&str>) -> Result<(), HarnessError> {
        // Both widget types use the same tag for their text
        self.composition
            .set_property(id, TextProperty::Text.tag(), text)?;
        self.reference.set_text(id, text.map(str::to_owned));
        Ok(())
    }

    /// Registers `handler` for clicks on button `id` and tells the display
    /// to report them.
    pub fn set_on_click(
        &mut self,
        id: WidgetId,
        handler: impl FnMut(&Event) + 'static,
    ) -> Result<(), HarnessError> {
        self.composition
            .set_event_handler(id, ButtonEvent::Clicked.tag(), handler)?;
        self.composition
            .set_property(id, ButtonProperty::OnClick.tag(), true)?;
        Ok(())
    }

    pub fn set_layout_modifiers(
        &mut self,
        id: WidgetId,
        elements: Vec<LayoutModifierElement>,
    ) -> Result<(), HarnessError> {
        Ok(self.composition.set_layout_modifiers(id, elements)?)
    }

    pub fn apply_edit(&mut self, edit: &TreeEdit) -> Result<(), HarnessError> {
        match edit {
            TreeEdit::Insert {
                parent,
                tag,
                index,
                kind,
            } => self.insert(*parent, *tag, *index, *kind).map(|_| ()),
            TreeEdit::Move {
                parent,
                tag,
                from_index,
                to_index,
                count,
            } => self.move_children(*parent, *tag, *from_index, *to_index, *count),
            TreeEdit::Remove {
                parent,
                tag,
                index,
                count,
            } => self.remove(*parent, *tag, *index, *count).map(|_| ()),
            TreeEdit::SetText { id, text } => self.set_text(*id, text.as_deref()),
            TreeEdit::Clear => self.clear(),
        }
    }

    // Frames

    /// Ends the frame: the pending batch is encoded, sent across the channel,
    /// decoded and applied to the display. Returns whether a batch was sent.
    pub fn frame(&mut self) -> Result<bool, HarnessError> {
        let sent = self.composition.tick();
        self.deliver_diffs()?;
        Ok(sent)
    }

    /// Routes every event the display raised since the last call.
    pub fn deliver_events(&mut self) -> Result<usize, HarnessError> {
        Ok(self.composition.drain_events(&self.events)?)
    }

    /// Applies a batch that did not come from this harness's composition.
    pub fn display_diff(&mut self, diff: &Diff) -> Result<(), HarnessError> {
        Ok(self.display.send_diff(diff)?)
    }

    pub fn cancel(&mut self) -> Result<(), HarnessError> {
        self.composition.cancel();
        self.deliver_diffs()?;
        Ok(())
    }

    // Queries

    pub fn composition(&self) -> &ProtocolComposition<Sender<Diff>> {
        &self.composition
    }

    /// Edits made through this bypass the reference tree.
    pub fn composition_mut(&mut self) -> &mut ProtocolComposition<Sender<Diff>> {
        &mut self.composition
    }

    pub fn display(&self) -> &ProtocolDisplay<ViewRef> {
        &self.display
    }

    pub fn reference(&self) -> &ReferenceTree {
        &self.reference
    }

    pub fn root(&self) -> &ViewRef {
        &self.root
    }

    /// The views in the root's children.
    pub fn root_views(&self) -> Vec<ViewRef> {
        self.root.borrow().children(ChildrenTag::ROOT)
    }

    pub fn snapshot(&self) -> ViewSnapshot {
        self.root.borrow().snapshot()
    }

    // Private

    fn deliver_diffs(&mut self) -> Result<(), HarnessError> {
        for diff in self.diffs.try_iter() {
            let bytes = encode_diff_bytes(&diff)?;
            trace!("Delivering {} byte batch", bytes.len());
            let decoded = decode_diff_bytes(&bytes)?;
            self.display.send_diff(&decoded)?;
        }
        Ok(())
    }
}
