use std::default::Default;

use treehouse_shared::MismatchPolicy;

/// Contains Config properties which will be used by a Display
#[derive(Clone, Debug, Default)]
pub struct DisplayConfig {
    /// Determines what happens when a diff names a widget, children, property
    /// or layout modifier tag the local widget bindings do not know.
    pub mismatch_policy: MismatchPolicy,
}
