use std::sync::{mpsc::Sender, Arc};

use log::warn;

use crate::{Diff, Event};

/// Receives completed diff batches from the producing side.
///
/// A batch is handed off whole; a sink never observes a batch that is still
/// being appended to.
pub trait DiffSink {
    fn send_diff(&mut self, diff: Diff);
}

impl<F: FnMut(Diff)> DiffSink for F {
    fn send_diff(&mut self, diff: Diff) {
        self(diff)
    }
}

impl DiffSink for Sender<Diff> {
    fn send_diff(&mut self, diff: Diff) {
        if self.send(diff).is_err() {
            warn!("Diff receiver disconnected, dropping batch");
        }
    }
}

impl DiffSink for Vec<Diff> {
    fn send_diff(&mut self, diff: Diff) {
        self.push(diff);
    }
}

/// Receives events raised by concrete widgets.
///
/// Widgets keep a [`SharedEventSink`] and call it from their native
/// interaction callbacks.
pub trait EventSink: Send + Sync {
    fn send_event(&self, event: Event);
}

pub type SharedEventSink = Arc<dyn EventSink>;

impl<F: Fn(Event) + Send + Sync> EventSink for F {
    fn send_event(&self, event: Event) {
        self(event)
    }
}

impl EventSink for Sender<Event> {
    fn send_event(&self, event: Event) {
        if self.send(event).is_err() {
            warn!("Event receiver disconnected, dropping event");
        }
    }
}
