use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{EventTag, WidgetId};

/// A UI interaction on widget `id`, travelling from the display back to the
/// composition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Identifier for the widget from which this event originated.
    pub id: WidgetId,
    /// Identifies which event occurred on the widget with `id`.
    pub tag: EventTag,
    #[serde(default)]
    pub value: Value,
}

impl Event {
    pub fn new(id: WidgetId, tag: EventTag, value: impl Into<Value>) -> Self {
        Self {
            id,
            tag,
            value: value.into(),
        }
    }

    /// An event with no payload.
    pub fn signal(id: WidgetId, tag: EventTag) -> Self {
        Self {
            id,
            tag,
            value: Value::Null,
        }
    }
}
