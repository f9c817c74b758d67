//! The reconciliation engine: desired constraints in, actual times out.
//!
//! # Window
//!
//! ```text
//! start_time = first activity's beginning, else its desired start
//! end_time   = start_time + schedule length
//! ```
//!
//! The first activity is always forced to `FixedAbsolute`, so a schedule is
//! anchored at a concrete clock time.  After the activities comes a
//! synthesized terminal boundary (fixed-relative at the schedule length, fixed
//! zero length) that closes the last segment.
//!
//! # Pass A: fix constrained activities
//!
//! Walks the activities tracking `current` (how far the timeline has been
//! laid out) and whether the previous segment can still stretch.  Priority is
//! beginning > fixed length > fixed start > free:
//!
//! * A beginning is honoured unless it lies before `current`.  Then, if it is
//!   still at or after the previous constrained activity's start, the
//!   activities since that one are compressed to end by the beginning.  If it
//!   is earlier still, the previous constrained activity wins and the begun
//!   activity is pinned to its start.  Compression rewinds one level only.
//! * A fixed start is honoured only when it is at or after `current` and the
//!   previous segment has a free length to absorb the gap; otherwise it is
//!   pinned to `current`.
//! * A fixed length is clamped to the room left before `end_time`.
//!
//! # Pass B: stretch free lengths
//!
//! Boundaries are activities with a fixed start or a beginning, plus the
//! terminal.  Within each segment the free lengths share whatever the fixed
//! lengths leave, in proportion to their desired lengths:
//!
//! ```text
//! scale = (next.start − segment.start − Σ fixed) / Σ desired(free)
//! ```
//!
//! A final pass clamps every start into the window and every length so the
//! activity ends inside it.

use ds_core::{Duration, Offset};
use tracing::{debug, trace};

use crate::activity::{Activity, StartMode, END_NAME};

/// Start and end of the schedule on the clock.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Window {
    pub start: Offset,
    pub end:   Offset,
}

/// Recompute `actual_start`/`actual_length` of every activity.
///
/// Returns the window used, or `None` for an empty slice.  Idempotent: only
/// desired values, modes, and beginnings are read as inputs.
pub fn reconcile(activities: &mut [Activity], length: Duration) -> Option<Window> {
    let first = activities.first_mut()?;
    first.set_start_mode(StartMode::FixedAbsolute);

    let start = first.beginning().unwrap_or(first.desired_start());
    let window = Window { start, end: start + length.max(Duration::ZERO) };

    let terminal = fix_constrained(activities, window);
    trace!(name = END_NAME, start = %terminal, "terminal boundary");
    stretch_free(activities, terminal);
    clamp_to_window(activities, window);

    debug!(
        activities = activities.len(),
        start = %window.start,
        end = %window.end,
        "schedule reconciled"
    );
    Some(window)
}

// ── Pass A ────────────────────────────────────────────────────────────────────

/// Lay out constrained starts and fixed lengths.  Returns the terminal
/// boundary's start.
fn fix_constrained(activities: &mut [Activity], window: Window) -> Offset {
    let mut current = window.start;
    let mut flexible = false;
    let mut previous_fixed: Option<usize> = None;

    for i in 0..activities.len() {
        if let Some(beginning) = activities[i].beginning() {
            let start = match previous_fixed {
                Some(prev) if beginning < current => {
                    let prev_start = activities[prev].actual_start();
                    if beginning >= prev_start {
                        compress(&mut activities[prev..i], beginning);
                        beginning.min(window.end)
                    } else {
                        prev_start
                    }
                }
                _ => beginning.min(window.end),
            };
            current = start;
            flexible = false;
        } else if activities[i].start_mode().is_fixed() {
            let desired = match activities[i].start_mode() {
                StartMode::FixedRelative => window.start + activities[i].desired_start(),
                _ => activities[i].desired_start(),
            };
            if flexible && desired >= current {
                current = desired.min(window.end);
            }
            flexible = false;
        }

        let activity = &mut activities[i];
        activity.set_actual_start(current);

        if activity.length_mode().is_fixed() {
            let room = (window.end - current).max(Duration::ZERO);
            let length = activity.desired_length().clamp(Duration::ZERO, room);
            activity.set_actual_length(length);
            current += length;
        } else {
            activity.set_actual_length(Duration::ZERO);
            flexible = true;
        }

        if activity.is_constrained() {
            previous_fixed = Some(i);
        }
    }

    if flexible && window.end >= current { window.end } else { current }
}

/// Pull every activity in `span` back so it ends by `limit`: first its start,
/// then its length.
fn compress(span: &mut [Activity], limit: Offset) {
    for activity in span {
        if activity.actual_start() > limit {
            activity.set_actual_start(limit);
        }
        if activity.actual_end() > limit {
            let length = (limit - activity.actual_start()).max(Duration::ZERO);
            trace!(name = activity.name(), %length, "compressed before a beginning");
            activity.set_actual_length(length);
        }
    }
}

// ── Pass B ────────────────────────────────────────────────────────────────────

fn stretch_free(activities: &mut [Activity], terminal: Offset) {
    let mut segment_start = 0;
    for i in 1..=activities.len() {
        let next_start = match activities.get(i) {
            None => terminal,
            Some(next) if next.is_boundary() => next.actual_start(),
            Some(_) => continue,
        };
        distribute(&mut activities[segment_start..i], next_start);
        segment_start = i;
    }
}

/// Share the slack of one segment among its free-length members.
///
/// `segment[0]` is the boundary that opened the segment.
fn distribute(segment: &mut [Activity], next_start: Offset) {
    let Some(opening) = segment.first() else { return };
    let origin = opening.actual_start();

    let (expanded, fixed) = segment.iter().fold(
        (Duration::ZERO, Duration::ZERO),
        |(expanded, fixed), a| {
            if a.length_mode().is_fixed() {
                (expanded, fixed + a.actual_length())
            } else {
                (expanded + a.desired_length(), fixed)
            }
        },
    );

    let available = next_start - origin - fixed;
    let scale = available.ratio(expanded).unwrap_or(0.0);
    let last_free = segment.iter().rposition(|a| !a.length_mode().is_fixed());

    // Free members end at rounded cumulative targets, and the last one takes
    // the remainder, so their lengths sum to `available` exactly.
    let mut desired_so_far = Duration::ZERO;
    let mut assigned = Duration::ZERO;
    let mut cursor = origin;
    for (i, activity) in segment.iter_mut().enumerate() {
        if !activity.is_boundary() {
            activity.set_actual_start(cursor);
        }
        if !activity.length_mode().is_fixed() {
            desired_so_far += activity.desired_length();
            let target = if last_free == Some(i) && !expanded.is_zero() {
                available
            } else {
                desired_so_far * scale
            };
            let length = (target - assigned).max(Duration::ZERO);
            assigned += length;
            activity.set_actual_length(length);
        }
        trace!(
            name = activity.name(),
            start = %activity.actual_start(),
            length = %activity.actual_length(),
            "placed"
        );
        cursor += activity.actual_length();
    }
}

fn clamp_to_window(activities: &mut [Activity], window: Window) {
    for activity in activities {
        let start = activity.actual_start().clamp(window.start, window.end);
        let length = activity.actual_length().clamp(Duration::ZERO, window.end - start);
        activity.set_actual_start(start);
        activity.set_actual_length(length);
    }
}
