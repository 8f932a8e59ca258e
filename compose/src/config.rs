use std::default::Default;

use treehouse_shared::MismatchPolicy;

/// Contains Config properties which will be used by a Composition
#[derive(Clone, Debug)]
pub struct ComposeConfig {
    /// Determines what happens when an event targets a removed node, or uses a
    /// tag the node has no handler for.
    pub mismatch_policy: MismatchPolicy,
    /// Whether cancelling the composition sends a final `Clear` so the display
    /// tears down its tree.
    pub clear_on_cancel: bool,
}

impl Default for ComposeConfig {
    fn default() -> Self {
        Self {
            mismatch_policy: MismatchPolicy::Strict,
            clear_on_cancel: true,
        }
    }
}
