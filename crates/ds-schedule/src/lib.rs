//! `ds-schedule`: activities, the schedule container, and reconciliation.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`activity`]  | `Activity`, `StartMode`, `LengthMode`                     |
//! | [`schedule`]  | `Schedule` (ordered container), `ActivityMut` edit guard  |
//! | [`reconcile`] | Two-pass engine computing actual starts and lengths       |
//! | [`session`]   | `begin`, `pause`, `reset_all` on `Schedule`               |
//! | [`loader`]    | `load_schedule`, `save_schedule` (JSON)                   |
//! | [`error`]     | `ScheduleError`, `ScheduleResult<T>`                      |
//!
//! # Reconciliation model (summary)
//!
//! A schedule is a window of fixed total length anchored at its first
//! activity.  Each activity states what it *wants* (desired start and length
//! plus how strongly each binds); the engine lays them out so that:
//!
//! ```text
//! start_time ≤ actual_start ≤ actual_start + actual_length ≤ end_time
//! ```
//!
//! Constrained activities are placed first; free lengths then share the
//! remaining slack in proportion to their desired lengths.  Every mutating
//! `Schedule` call reconciles before returning.

pub mod activity;
pub mod error;
pub mod loader;
pub mod reconcile;
pub mod schedule;
pub mod session;


pub use activity::{Activity, LengthMode, StartMode, DEFAULT_DESIRED_LENGTH, END_NAME, PAUSE_NAME};
pub use error::{ScheduleError, ScheduleResult};
pub use loader::{load_schedule, load_schedule_reader, save_schedule, save_schedule_writer};
pub use reconcile::{reconcile, Window};
pub use schedule::{ActivityMut, Schedule, DEFAULT_LENGTH};
