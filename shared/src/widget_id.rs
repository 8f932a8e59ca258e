use std::fmt;

use serde::{Deserialize, Serialize};

// WidgetId
/// Identifies one node instance within a single tree.
///
/// Ids are handed out in increasing order by the producing side and are never
/// reused for the lifetime of a tree, so a stale id can never alias a newer node.
#[derive(PartialEq, Eq, Hash, Clone, Copy, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WidgetId(u64);

impl WidgetId {
    /// The synthetic root of every tree. It always exists.
    pub const ROOT: WidgetId = WidgetId(0);

    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn value(&self) -> u64 {
        self.0
    }

    pub const fn is_root(&self) -> bool {
        self.0 == Self::ROOT.0
    }
}

impl From<u64> for WidgetId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Debug for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            write!(f, "WidgetId(root)")
        } else {
            write!(f, "WidgetId({})", self.0)
        }
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// WidgetIdGenerator
/// Monotonic id source for one tree.
///
/// Unlike a recycling key generator, released ids are never handed out again:
/// events and diffs that are still in flight for a removed node must not
/// resolve to whatever node was created after it.
#[derive(Debug)]
pub struct WidgetIdGenerator {
    next: u64,
}

impl Default for WidgetIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl WidgetIdGenerator {
    pub fn new() -> Self {
        Self {
            next: WidgetId::ROOT.value() + 1,
        }
    }

    pub fn generate(&mut self) -> WidgetId {
        let id = WidgetId(self.next);
        self.next += 1;
        id
    }

    /// The id the next call to [`generate`](Self::generate) will return.
    pub fn peek(&self) -> WidgetId {
        WidgetId(self.next)
    }
}
