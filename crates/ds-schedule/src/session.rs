//! Real-time operations: beginning activities, pausing, and resetting.
//!
//! None of these read a clock.  Every operation takes the time of day from
//! the caller, so the binary decides whether "now" is the local time or a
//! time typed on the command line.
//!
//! # Pauses
//!
//! A pause is an ordinary activity named [`PAUSE_NAME`], pinned
//! `FixedAbsolute` at the pause time.  While its length is free it is
//! *active* and soaks up whatever time passes; beginning the next activity
//! closes it by fixing its length.  Pausing in the middle of an activity
//! splits it in two so the halves add up to the unpaused whole.
//!
//! ```text
//!   before:  | Work ................. |
//!   after:   | Work .... | Pause | Work ...... |
//!                        ^ at
//! ```

use ds_core::{ActivityId, Duration, Offset};
use tracing::debug;

use crate::activity::{Activity, LengthMode, StartMode, PAUSE_NAME};
use crate::{Schedule, ScheduleError, ScheduleResult};

impl Schedule {
    /// First activity of the trailing run that is neither begun nor a pause.
    pub fn next_unbegun(&self) -> Option<ActivityId> {
        self.iter()
            .rev()
            .take_while(|a| !a.is_begun() && !a.is_pause())
            .last()
            .map(Activity::id)
    }

    /// The free-length pause, if one is running.
    pub fn active_pause(&self) -> Option<&Activity> {
        self.iter().find(|a| a.is_pause() && !a.length_mode().is_fixed())
    }

    /// Begin `target` (default: [`next_unbegun`](Self::next_unbegun)) at `at`,
    /// closing the pause before it if that pause is still running.
    pub fn begin(&mut self, target: Option<ActivityId>, at: Offset) -> ScheduleResult<ActivityId> {
        let id = target
            .or_else(|| self.next_unbegun())
            .ok_or(ScheduleError::NothingToBegin)?;
        let index = self.owned_index(id)?;

        let activities = self.activities_mut();
        if activities[index].is_pause() {
            return Err(ScheduleError::CannotBeginPause);
        }

        // Only the nearest pause counts.
        let pause = activities[..index]
            .iter_mut()
            .rev()
            .find(|a| a.is_pause())
            .filter(|p| !p.length_mode().is_fixed());
        if let Some(pause) = pause {
            let pause_start = pause.actual_start();
            let length = at - pause_start;
            if length.is_negative() {
                return Err(ScheduleError::BeginBeforePause { begin: at, pause_start });
            }
            debug!(%pause_start, %length, "closing pause");
            pause.set_desired_length(length);
            pause.set_length_mode(LengthMode::Fixed);
        }

        self.begin_activity(id, at)?;
        Ok(id)
    }

    /// Insert a running pause at `at`, splitting the activity it falls in.
    ///
    /// Returns the id of the new pause.
    pub fn pause(&mut self, at: Offset) -> ScheduleResult<ActivityId> {
        let (first, last) = match (self.first(), self.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Err(ScheduleError::EmptySchedule),
        };
        if at < first.actual_start() || at >= last.actual_end() {
            return Err(ScheduleError::PauseOutOfRange(at));
        }
        if self.active_pause().is_some() {
            return Err(ScheduleError::PauseAlreadyActive);
        }

        let Some(index) = self.iter().rposition(|a| a.actual_start() <= at) else {
            return Err(ScheduleError::PauseOutOfRange(at));
        };

        let split = &self.activities()[index];
        let name = split.name().to_owned();
        let fixed_length = split.length_mode().is_fixed();
        let desired_length = split.desired_length();
        let before = at - split.actual_start();
        let after = split.actual_end() - at;

        let mut insert_at = index + 1;
        if before.is_zero() {
            self.detach(index);
            insert_at = index;
        } else {
            let split = &mut self.activities_mut()[index];
            if split.start_mode() == StartMode::Free && !split.is_begun() {
                let start = split.actual_start();
                split.set_desired_start(start);
                split.set_start_mode(StartMode::FixedAbsolute);
            }
            if fixed_length {
                split.set_desired_length(before);
            }
        }

        let pause = Activity::new(PAUSE_NAME)
            .starting_at(at)
            .with_desired_length(Duration::ZERO);
        let pause_id = self.attach(insert_at, pause)?;

        if !after.is_zero() {
            let continuation = if fixed_length {
                Activity::new(name).lasting(after)
            } else {
                let share = after.ratio(before + after).unwrap_or(0.0);
                Activity::new(name).with_desired_length(desired_length * share)
            };
            self.attach(insert_at + 1, continuation)?;
        }

        debug!(%at, %before, %after, "pause inserted");
        self.update();
        Ok(pause_id)
    }

    /// Delete every pause, rejoin activities a pause split in two, and clear
    /// every beginning.
    pub fn reset_all(&mut self) {
        let activities = std::mem::take(self.activities_mut());
        let mut kept: Vec<Activity> = Vec::with_capacity(activities.len());
        let mut rest = activities.into_iter().peekable();

        while let Some(mut activity) = rest.next() {
            if !activity.is_pause() {
                activity.set_beginning(None);
                kept.push(activity);
                continue;
            }

            let Some(previous) = kept.last_mut() else { continue };
            if let Some(continuation) = rest.next_if(|next| next.name() == previous.name()) {
                if previous.length_mode().is_fixed() && continuation.length_mode().is_fixed() {
                    let joined = previous.desired_length() + continuation.desired_length();
                    previous.set_desired_length(joined);
                }
                debug!(name = previous.name(), "rejoined split activity");
            }
        }

        *self.activities_mut() = kept;
        self.update();
    }

    /// Clear the beginning of one activity.
    pub fn reset(&mut self, id: ActivityId) -> ScheduleResult<()> {
        self.clear_beginning(id)
    }
}
