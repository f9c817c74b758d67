//! `ds-core`: foundational types for the elastic day scheduler.
//!
//! This crate is a dependency of every other `ds-*` crate.  It intentionally
//! has no `ds-*` dependencies and minimal external ones (only `thiserror`,
//! plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`offset`]      | `Offset`, `Duration` (signed h:m:s arithmetic)        |
//! | [`ids`]         | `ActivityId`, `ScheduleId`                            |
//! | [`error`]       | `DsError`, `DsResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | `Offset` serializes as its `[-]HH:MM:SS` display string.   |
//!           | Enabled by `ds-schedule` for the schedule file loader.     |

pub mod error;
pub mod ids;
pub mod offset;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{DsError, DsResult};
pub use ids::{ActivityId, ScheduleId};
pub use offset::{Duration, Offset, MAX_HOURS};
