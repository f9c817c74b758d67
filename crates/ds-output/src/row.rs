//! Plain data row types written by output backends.

use ds_core::{Duration, Offset};
use ds_schedule::{Activity, LengthMode, Schedule, StartMode};

/// A display-ready view of one activity after reconciliation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityRow {
    /// 1-based position in the schedule, as shown to users.
    pub index:          usize,
    pub flags:          String,
    pub start:          Offset,
    pub length:         Duration,
    pub name:           String,
    pub start_mode:     StartMode,
    pub length_mode:    LengthMode,
    pub desired_start:  Offset,
    pub desired_length: Duration,
    pub beginning:      Option<Offset>,
    pub is_pause:       bool,
}

impl ActivityRow {
    pub fn new(index: usize, activity: &Activity) -> Self {
        Self {
            index,
            flags:          mode_flags(activity),
            start:          activity.actual_start(),
            length:         activity.actual_length(),
            name:           activity.name().to_owned(),
            start_mode:     activity.start_mode(),
            length_mode:    activity.length_mode(),
            desired_start:  activity.desired_start(),
            desired_length: activity.desired_length(),
            beginning:      activity.beginning(),
            is_pause:       activity.is_pause(),
        }
    }

    pub fn end(&self) -> Offset {
        self.start + self.length
    }

    /// A pause whose length is still free is running.
    pub fn is_active_pause(&self) -> bool {
        self.is_pause && !self.length_mode.is_fixed()
    }
}

/// One row per activity, in schedule order.
pub fn rows(schedule: &Schedule) -> Vec<ActivityRow> {
    schedule
        .iter()
        .enumerate()
        .map(|(i, activity)| ActivityRow::new(i + 1, activity))
        .collect()
}

/// Two-letter start and length codes, `"FA --"` for a fixed-absolute start
/// with a free length.  A begun activity shows `B` in the first column.
pub fn mode_flags(activity: &Activity) -> String {
    let start = match activity.start_mode() {
        StartMode::Free => "--",
        StartMode::FixedAbsolute => "FA",
        StartMode::FixedRelative => "FR",
    };
    let length = match activity.length_mode() {
        LengthMode::Free => "--",
        LengthMode::Fixed => "FA",
    };

    let mut flags = format!("{start} {length}");
    if activity.is_begun() {
        flags.replace_range(..1, "B");
    }
    flags
}
