//! # Treehouse Compose
//! The producing side of the diff protocol. Edits made by a reactive engine
//! against a composed widget tree are turned into ordered protocol diffs,
//! batched per frame, and handed to a [`DiffSink`](treehouse_shared::DiffSink).
//! Events coming back from the display are routed to the handler registered
//! for their node.

#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unstable_features,
    unused_import_braces
)]

pub mod shared {
    pub use treehouse_shared::{
        ChildrenDiff, ChildrenTag, Diff, DiffSink, Event, EventTag, LayoutModifierElement,
        MismatchPolicy, PropertyTag, Value, WidgetId, WidgetTag,
    };
}

mod applier;
mod composition;
mod config;
mod diff_batch;
mod error;
mod mismatch;
mod node;

pub use applier::ProtocolApplier;
pub use composition::ProtocolComposition;
pub use config::ComposeConfig;
pub use diff_batch::DiffBatch;
pub use error::ComposeError;
pub use mismatch::{LoggingMismatchHandler, ProtocolMismatchHandler, ThrowingMismatchHandler};
pub use node::ProtocolNode;
