//! # Treehouse Widget
//! The display side of the diff protocol. A [`ProtocolDisplay`] owns the live
//! map from widget id to concrete platform widget and replays each incoming
//! diff batch against it, creating widgets through a [`WidgetFactory`].
//! Widgets report user interactions through the shared event sink.

#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unstable_features,
    unused_import_braces
)]

pub mod shared {
    pub use treehouse_shared::{
        ChildrenDiff, ChildrenTag, Diff, Event, EventSink, EventTag, LayoutModifierElement,
        LayoutModifierTag, MismatchPolicy, PropertyDiff, PropertyTag, SharedEventSink, Value,
        WidgetId, WidgetTag,
    };
}

mod config;
mod display;
mod error;
mod mismatch;
mod widget;

pub use config::DisplayConfig;
pub use display::ProtocolDisplay;
pub use error::DisplayError;
pub use mismatch::{LoggingMismatchHandler, ProtocolMismatchHandler, ThrowingMismatchHandler};
pub use widget::{DiffConsumingWidget, WidgetChildren, WidgetFactory};
