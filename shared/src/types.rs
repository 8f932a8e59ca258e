use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! protocol_tag {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u32);

        impl $name {
            pub const fn new(value: u32) -> Self {
                Self(value)
            }

            pub const fn value(&self) -> u32 {
                self.0
            }
        }

        impl From<u32> for $name {
            fn from(value: u32) -> Self {
                Self(value)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

protocol_tag!(
    /// Identifies the concrete type of a widget (e.g. "button").
    WidgetTag
);
protocol_tag!(
    /// Identifies which property of a widget changed.
    PropertyTag
);
protocol_tag!(
    /// Identifies one named, ordered child collection of a widget.
    ChildrenTag
);
protocol_tag!(
    /// Identifies which logical event fired on a widget.
    EventTag
);
protocol_tag!(
    /// Identifies one element of a widget's layout modifier chain.
    LayoutModifierTag
);

impl ChildrenTag {
    /// The only child slot exposed by the synthetic root.
    pub const ROOT: ChildrenTag = ChildrenTag(1);
}
