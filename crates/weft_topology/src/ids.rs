//! Typed indices for clocks, subsystems, and bindings.
//!
//! An ID is the position of its entity in allocation order within one
//! platform graph; IDs from different graphs are not comparable.

use std::fmt;

use crate::arena::ArenaId;
use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Wraps a raw position.
            pub fn from_raw(index: u32) -> Self {
                Self(index)
            }

            /// The raw position.
            pub fn as_raw(self) -> u32 {
                self.0
            }
        }

        impl ArenaId for $name {
            fn from_index(index: usize) -> Self {
                Self(index as u32)
            }

            fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($label, "#{}"), self.0)
            }
        }
    };
}

define_id!(
    /// A clock source.
    ClockId,
    "clock"
);

define_id!(
    /// A registered subsystem.
    SubsystemId,
    "subsystem"
);

define_id!(
    /// A binding; also its position in wiring order.
    BindingId,
    "binding"
);
