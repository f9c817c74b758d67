//! Strongly typed identity handles.
//!
//! Activity names are free text and need not be unique, so the container
//! tracks activities by `ActivityId`.  Every schedule carries a `ScheduleId`
//! that its activities record as their owner; the id moves with the schedule
//! value, so the back-link never dangles.
//!
//! Ids are minted from process-wide counters and are never reused within a
//! process.  They are not persisted.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Generate a typed id wrapper around `u64` with its own allocation counter.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident;) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        $vis struct $name(u64);

        impl $name {
            /// Allocate an id that no other live value of this type holds.
            pub fn fresh() -> Self {
                static NEXT: AtomicU64 = AtomicU64::new(0);
                $name(NEXT.fetch_add(1, Ordering::Relaxed))
            }

            /// The raw counter value.
            #[inline(always)]
            pub fn get(self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for u64 {
            #[inline(always)]
            fn from(id: $name) -> u64 {
                id.0
            }
        }
    };
}

typed_id! {
    /// Identity of one activity, stable across moves between schedules.
    pub struct ActivityId;
}

typed_id! {
    /// Identity of one schedule container.
    pub struct ScheduleId;
}
