use std::{collections::HashMap, sync::mpsc::Receiver};

use log::{debug, trace};

use treehouse_shared::{
    ChildrenTag, DiffSink, Event, EventTag, LayoutModifierElement, PropertyTag, Value, WidgetId,
    WidgetTag,
};

use crate::{
    mismatch::mismatch_handler_for, ComposeConfig, ComposeError, ProtocolApplier, ProtocolNode,
    ProtocolMismatchHandler,
};

type EventHandler = Box<dyn FnMut(&Event)>;

/// A composed widget tree bound to the sink its diffs are delivered to.
///
/// The reactive engine drives the tree through the edit methods and calls
/// [`tick`](Self::tick) once per frame. Events coming back from the display
/// are routed to the handler registered for their `(id, tag)` pair.
pub struct ProtocolComposition<S: DiffSink> {
    config: ComposeConfig,
    applier: ProtocolApplier,
    diff_sink: S,
    event_handlers: HashMap<(WidgetId, EventTag), EventHandler>,
    mismatch_handler: Box<dyn ProtocolMismatchHandler>,
    cancelled: bool,
}

impl<S: DiffSink> ProtocolComposition<S> {
    /// Create a new composition delivering its diffs to `diff_sink`
    pub fn new(config: ComposeConfig, diff_sink: S) -> Self {
        let mismatch_handler = mismatch_handler_for(config.mismatch_policy);
        Self {
            config,
            applier: ProtocolApplier::new(),
            diff_sink,
            event_handlers: HashMap::new(),
            mismatch_handler,
            cancelled: false,
        }
    }

    /// Replace the handler chosen by the configured mismatch policy
    pub fn with_mismatch_handler(
        mut self,
        handler: impl ProtocolMismatchHandler + 'static,
    ) -> Self {
        self.mismatch_handler = Box::new(handler);
        self
    }

    // Tree edits

    pub fn insert(
        &mut self,
        parent: WidgetId,
        tag: ChildrenTag,
        index: usize,
        kind: WidgetTag,
    ) -> Result<WidgetId, ComposeError> {
        self.check_live()?;
        self.applier.insert(parent, tag, index, kind)
    }

    pub fn move_children(
        &mut self,
        parent: WidgetId,
        tag: ChildrenTag,
        from_index: usize,
        to_index: usize,
        count: usize,
    ) -> Result<(), ComposeError> {
        self.check_live()?;
        self.applier
            .move_children(parent, tag, from_index, to_index, count)
    }

    /// Removes a run of children, dropping the event handlers of every node
    /// released with it.
    pub fn remove(
        &mut self,
        parent: WidgetId,
        tag: ChildrenTag,
        index: usize,
        count: usize,
    ) -> Result<Vec<WidgetId>, ComposeError> {
        self.check_live()?;
        let released = self.applier.remove(parent, tag, index, count)?;
        self.event_handlers
            .retain(|(id, _), _| !released.contains(id));
        Ok(released)
    }

    pub fn clear(&mut self) -> Result<(), ComposeError> {
        self.check_live()?;
        self.applier.clear();
        self.event_handlers.clear();
        Ok(())
    }

    pub fn set_property(
        &mut self,
        id: WidgetId,
        tag: PropertyTag,
        value: impl Into<Value>,
    ) -> Result<(), ComposeError> {
        self.check_live()?;
        self.applier.set_property(id, tag, value);
        Ok(())
    }

    pub fn set_layout_modifiers(
        &mut self,
        id: WidgetId,
        elements: Vec<LayoutModifierElement>,
    ) -> Result<(), ComposeError> {
        self.check_live()?;
        self.applier.set_layout_modifiers(id, elements);
        Ok(())
    }

    // Events

    /// Register `handler` for events with `tag` raised by node `id`.
    ///
    /// Replaces any handler previously registered for the same pair.
    pub fn set_event_handler(
        &mut self,
        id: WidgetId,
        tag: EventTag,
        handler: impl FnMut(&Event) + 'static,
    ) -> Result<(), ComposeError> {
        self.check_live()?;
        if id.is_root() || !self.applier.contains(&id) {
            return Err(ComposeError::UnknownNode { id });
        }
        self.event_handlers.insert((id, tag), Box::new(handler));
        Ok(())
    }

    /// Returns whether a handler was registered.
    pub fn remove_event_handler(&mut self, id: WidgetId, tag: EventTag) -> bool {
        self.event_handlers.remove(&(id, tag)).is_some()
    }

    /// Route `event` to the handler registered for its node and tag.
    pub fn send_event(&mut self, event: Event) -> Result<(), ComposeError> {
        self.check_live()?;
        trace!("{:?}", event);

        let kind = match self.applier.node(&event.id).and_then(ProtocolNode::kind) {
            Some(kind) => kind,
            None => return self.mismatch_handler.on_unknown_event_node(event.id, event.tag),
        };
        match self.event_handlers.get_mut(&(event.id, event.tag)) {
            Some(handler) => {
                handler(&event);
                Ok(())
            }
            None => self.mismatch_handler.on_unknown_event(kind, event.tag),
        }
    }

    /// Route every event currently queued on `receiver`.
    ///
    /// Stops at the first event that cannot be routed. Returns how many
    /// events were routed.
    pub fn drain_events(&mut self, receiver: &Receiver<Event>) -> Result<usize, ComposeError> {
        let mut routed = 0;
        for event in receiver.try_iter() {
            self.send_event(event)?;
            routed += 1;
        }
        Ok(routed)
    }

    // Frames

    /// Deliver everything recorded since the previous tick as one batch.
    ///
    /// Returns whether a batch was delivered.
    pub fn tick(&mut self) -> bool {
        if self.cancelled {
            return false;
        }
        self.flush()
    }

    /// Stop the composition. If so configured, a final `Clear` is delivered
    /// so the display tears down its tree.
    pub fn cancel(&mut self) {
        if self.cancelled {
            return;
        }
        if self.config.clear_on_cancel {
            self.applier.clear();
        }
        self.flush();
        self.event_handlers.clear();
        self.cancelled = true;
        debug!("Composition cancelled");
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    // Queries

    pub fn applier(&self) -> &ProtocolApplier {
        &self.applier
    }

    pub fn config(&self) -> &ComposeConfig {
        &self.config
    }

    pub fn diff_sink(&self) -> &S {
        &self.diff_sink
    }

    pub fn diff_sink_mut(&mut self) -> &mut S {
        &mut self.diff_sink
    }

    // Private

    fn check_live(&self) -> Result<(), ComposeError> {
        if self.cancelled {
            return Err(ComposeError::Cancelled);
        }
        Ok(())
    }

    fn flush(&mut self) -> bool {
        match self.applier.flush() {
            Some(diff) => {
                self.diff_sink.send_diff(diff);
                true
            }
            None => false,
        }
    }
}
