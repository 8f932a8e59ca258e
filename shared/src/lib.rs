//! # Treehouse Shared
//! Protocol types shared between treehouse-compose & treehouse-widget crates.
//!
//! A composition describes its UI as a tree of typed widget nodes. Every edit
//! to that tree travels to the display as part of a [`Diff`], and every user
//! interaction travels back as an [`Event`]. Both sides keep their own mirror
//! of the tree; the diff stream is the only thing keeping them in sync.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

mod children;
mod codec;
mod diff;
mod error;
mod event;
mod mismatch;
mod sink;
mod types;
mod widget_id;

pub use children::{
    check_insert, check_move, check_run, insert_at, move_destination, move_range, remove_range,
    RangeError,
};
pub use codec::{
    decode_diff, decode_diff_bytes, decode_event, encode_diff, encode_diff_bytes, encode_event,
};
pub use diff::{
    ChildrenDiff, Diff, Insert, LayoutModifierElement, LayoutModifiers, Move, PropertyDiff,
    Remove,
};
pub use error::{CodecError, ProtocolError};
pub use event::Event;
pub use mismatch::MismatchPolicy;
pub use sink::{DiffSink, EventSink, SharedEventSink};
pub use types::{ChildrenTag, EventTag, LayoutModifierTag, PropertyTag, WidgetTag};
pub use widget_id::{WidgetId, WidgetIdGenerator};

pub use serde_json::Value;
