//! Core schedule types: `StartMode`, `LengthMode`, and `Activity`.
//!
//! # Desired versus actual
//!
//! An activity carries two sets of timing values:
//!
//! ```text
//! desired_start, desired_length   what the user asked for (never touched by
//!                                 the reconciliation engine)
//! actual_start,  actual_length    what the engine computed on the last pass
//! ```
//!
//! The modes decide how strongly the desired values bind.  A `Free` start
//! floats after its predecessor; a `Free` length is a weight used to share
//! out slack.  A recorded *beginning* (the time the activity really started)
//! overrides every mode.
//!
//! # Ownership
//!
//! Activities are plain data.  Once appended to a [`Schedule`] they are only
//! reachable mutably through [`Schedule::edit`], which reconciles the
//! schedule when the edit guard drops.  The `owner` field is an id, set and
//! cleared by the container, never a reference.
//!
//! [`Schedule`]: crate::Schedule
//! [`Schedule::edit`]: crate::Schedule::edit

use std::fmt;

use ds_core::{ActivityId, Duration, Offset, ScheduleId};

/// Name reserved for pause placeholders inserted by [`Schedule::pause`].
///
/// [`Schedule::pause`]: crate::Schedule::pause
pub const PAUSE_NAME: &str = "Pause";

/// Name of the terminal boundary the reconciliation engine synthesizes.
pub const END_NAME: &str = "End";

/// Desired length given to new activities.
pub const DEFAULT_DESIRED_LENGTH: Duration = Duration::new(1, 0, 0);

// ── Modes ─────────────────────────────────────────────────────────────────────

/// How an activity's start time is determined.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum StartMode {
    /// Starts wherever its predecessor ends.
    #[default]
    Free,
    /// `desired_start` is a clock time.
    FixedAbsolute,
    /// `desired_start` is measured from the schedule's start time.
    FixedRelative,
}

impl StartMode {
    #[inline]
    pub fn is_fixed(self) -> bool {
        self != StartMode::Free
    }
}

/// How an activity's length is determined.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum LengthMode {
    /// Stretched or shrunk in proportion to `desired_length`.
    #[default]
    Free,
    /// Exactly `desired_length`, unless the schedule runs out of time.
    Fixed,
}

impl LengthMode {
    #[inline]
    pub fn is_fixed(self) -> bool {
        self == LengthMode::Fixed
    }
}

// ── Activity ──────────────────────────────────────────────────────────────────

/// One schedulable entry.
///
/// `Clone` yields a snapshot of the *same* activity (same id).  Use
/// [`Activity::duplicate`] for a new, independent activity.
#[derive(Clone, Debug, PartialEq)]
pub struct Activity {
    id:    ActivityId,
    owner: Option<ScheduleId>,

    name:           String,
    start_mode:     StartMode,
    length_mode:    LengthMode,
    desired_start:  Offset,
    desired_length: Duration,

    // Written by the reconciliation engine only.
    actual_start:  Offset,
    actual_length: Duration,

    beginning: Option<Offset>,
}

impl Default for Activity {
    fn default() -> Self {
        Self::new("Activity")
    }
}

impl Activity {
    /// A free-start, free-length activity one hour long.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id:             ActivityId::fresh(),
            owner:          None,
            name:           name.into(),
            start_mode:     StartMode::Free,
            length_mode:    LengthMode::Free,
            desired_start:  Offset::ZERO,
            desired_length: DEFAULT_DESIRED_LENGTH,
            actual_start:   Offset::ZERO,
            actual_length:  Duration::ZERO,
            beginning:      None,
        }
    }

    /// A new activity with a fresh id and no owner, carrying this one's
    /// desired values and beginning.
    pub fn duplicate(&self) -> Self {
        Self {
            id:    ActivityId::fresh(),
            owner: None,
            ..self.clone()
        }
    }

    // ── Builders ──────────────────────────────────────────────────────────

    pub fn with_start_mode(mut self, mode: StartMode) -> Self {
        self.start_mode = mode;
        self
    }

    pub fn with_length_mode(mut self, mode: LengthMode) -> Self {
        self.length_mode = mode;
        self
    }

    pub fn with_desired_start(mut self, start: Offset) -> Self {
        self.desired_start = start;
        self
    }

    pub fn with_desired_length(mut self, length: Duration) -> Self {
        self.desired_length = length;
        self
    }

    /// Fixed-absolute start at `start`.
    pub fn starting_at(self, start: Offset) -> Self {
        self.with_start_mode(StartMode::FixedAbsolute).with_desired_start(start)
    }

    /// Fixed length of `length`.
    pub fn lasting(self, length: Duration) -> Self {
        self.with_length_mode(LengthMode::Fixed).with_desired_length(length)
    }

    // ── Identity ──────────────────────────────────────────────────────────

    #[inline]
    pub fn id(&self) -> ActivityId {
        self.id
    }

    /// The schedule holding this activity, or `None` when unattached.
    #[inline]
    pub fn owner(&self) -> Option<ScheduleId> {
        self.owner
    }

    pub(crate) fn set_owner(&mut self, owner: Option<ScheduleId>) {
        self.owner = owner;
    }

    // ── Desired values ────────────────────────────────────────────────────

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// `true` for the placeholders inserted by [`Schedule::pause`].
    ///
    /// [`Schedule::pause`]: crate::Schedule::pause
    pub fn is_pause(&self) -> bool {
        self.name == PAUSE_NAME
    }

    pub fn start_mode(&self) -> StartMode {
        self.start_mode
    }

    pub fn set_start_mode(&mut self, mode: StartMode) {
        self.start_mode = mode;
    }

    pub fn length_mode(&self) -> LengthMode {
        self.length_mode
    }

    pub fn set_length_mode(&mut self, mode: LengthMode) {
        self.length_mode = mode;
    }

    pub fn desired_start(&self) -> Offset {
        self.desired_start
    }

    pub fn set_desired_start(&mut self, start: Offset) {
        self.desired_start = start;
    }

    pub fn desired_length(&self) -> Duration {
        self.desired_length
    }

    pub fn set_desired_length(&mut self, length: Duration) {
        self.desired_length = length;
    }

    // ── Computed values ───────────────────────────────────────────────────

    /// Start time from the last reconciliation pass.
    pub fn actual_start(&self) -> Offset {
        self.actual_start
    }

    /// Length from the last reconciliation pass.  Never negative.
    pub fn actual_length(&self) -> Duration {
        self.actual_length
    }

    pub fn actual_end(&self) -> Offset {
        self.actual_start + self.actual_length
    }

    pub(crate) fn set_actual_start(&mut self, start: Offset) {
        self.actual_start = start;
    }

    pub(crate) fn set_actual_length(&mut self, length: Duration) {
        self.actual_length = length;
    }

    // ── Beginning override ────────────────────────────────────────────────

    /// The recorded real start time, if the activity has been begun.
    pub fn beginning(&self) -> Option<Offset> {
        self.beginning
    }

    pub fn is_begun(&self) -> bool {
        self.beginning.is_some()
    }

    /// Set via [`Schedule::begin_activity`] on owned activities; available
    /// directly while the activity is unattached.
    ///
    /// [`Schedule::begin_activity`]: crate::Schedule::begin_activity
    pub fn with_beginning(mut self, at: Offset) -> Self {
        self.beginning = Some(at);
        self
    }

    pub(crate) fn set_beginning(&mut self, beginning: Option<Offset>) {
        self.beginning = beginning;
    }

    /// Start mode, length mode, or beginning pins this activity.
    pub(crate) fn is_constrained(&self) -> bool {
        self.beginning.is_some() || self.start_mode.is_fixed() || self.length_mode.is_fixed()
    }

    /// Opens a new segment when stretching free lengths.
    pub(crate) fn is_boundary(&self) -> bool {
        self.beginning.is_some() || self.start_mode.is_fixed()
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{} +{}]", self.name, self.actual_start, self.actual_length)
    }
}
