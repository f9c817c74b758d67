//! `Schedule`: the ordered activity container.
//!
//! The schedule owns its activities in a `Vec` and keeps its total length in
//! an explicit field; there is no hidden terminal element to skip over, so
//! `len()`, iteration, `first()` and `last()` all see exactly the visible
//! activities.
//!
//! Every mutating method runs [`reconcile`] before returning, so callers
//! never observe stale actual values.

use std::ops::{Bound, Deref, RangeBounds};

use ds_core::{ActivityId, Duration, Offset, ScheduleId};
use tracing::{debug, warn};

use crate::activity::{Activity, LengthMode, StartMode};
use crate::reconcile::{reconcile, Window};
use crate::{ScheduleError, ScheduleResult};

/// Total length of a schedule created with [`Schedule::default`].
pub const DEFAULT_LENGTH: Duration = Duration::new(6, 0, 0);

// ── Schedule ──────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct Schedule {
    id:         ScheduleId,
    length:     Duration,
    activities: Vec<Activity>,
}

impl Default for Schedule {
    fn default() -> Self {
        Self::new(DEFAULT_LENGTH)
    }
}

impl Schedule {
    pub fn new(length: Duration) -> Self {
        Self {
            id: ScheduleId::fresh(),
            length,
            activities: Vec::new(),
        }
    }

    /// The id recorded as `owner` by every activity in this schedule.
    #[inline]
    pub fn id(&self) -> ScheduleId {
        self.id
    }

    // ── Length ────────────────────────────────────────────────────────────

    pub fn length(&self) -> Duration {
        self.length
    }

    pub fn set_length(&mut self, length: Duration) {
        self.length = length;
        self.update();
    }

    /// Clock window of the schedule, or `None` while it is empty.
    pub fn window(&self) -> Option<Window> {
        let start = self.activities.first()?.actual_start();
        Some(Window { start, end: start + self.length.max(Duration::ZERO) })
    }

    // ── Read access ───────────────────────────────────────────────────────

    pub fn len(&self) -> usize {
        self.activities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    /// Activities in order.  Double-ended: use `.rev()` for reverse order.
    pub fn iter(&self) -> std::slice::Iter<'_, Activity> {
        self.activities.iter()
    }

    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    pub fn first(&self) -> Option<&Activity> {
        self.activities.first()
    }

    pub fn last(&self) -> Option<&Activity> {
        self.activities.last()
    }

    pub fn get(&self, id: ActivityId) -> Option<&Activity> {
        self.activities.iter().find(|a| a.id() == id)
    }

    pub fn get_index(&self, index: usize) -> Option<&Activity> {
        self.activities.get(index)
    }

    pub fn position(&self, id: ActivityId) -> Option<usize> {
        self.activities.iter().position(|a| a.id() == id)
    }

    pub fn contains(&self, id: ActivityId) -> bool {
        self.position(id).is_some()
    }

    pub fn ids(&self) -> Vec<ActivityId> {
        self.activities.iter().map(Activity::id).collect()
    }

    // ── Insertion ─────────────────────────────────────────────────────────

    /// Take ownership of `activity` and add it at the end.
    pub fn append(&mut self, activity: Activity) -> ScheduleResult<ActivityId> {
        let index = self.activities.len();
        self.insert(index, activity)
    }

    /// Take ownership of `activity` and insert it at `index`.  An index past
    /// the end appends.
    ///
    /// # Errors
    ///
    /// [`ScheduleError::DuplicateInsertion`] if an activity with the same id
    /// is already in this schedule; nothing is inserted.
    pub fn insert(&mut self, index: usize, activity: Activity) -> ScheduleResult<ActivityId> {
        let id = self.attach(index, activity)?;
        self.update();
        Ok(id)
    }

    /// Insert `activity` in front of `before`, or at the end if `before` is
    /// not in this schedule.
    pub fn insert_before(
        &mut self,
        before: ActivityId,
        activity: Activity,
    ) -> ScheduleResult<ActivityId> {
        let index = self.position(before).unwrap_or(self.activities.len());
        self.insert(index, activity)
    }

    /// Move a live activity out of `from` and into this schedule at `index`
    /// (`None` appends).
    pub fn transfer(
        &mut self,
        from: &mut Schedule,
        id: ActivityId,
        index: Option<usize>,
    ) -> ScheduleResult<ActivityId> {
        if self.contains(id) {
            warn!(activity = %id, schedule = %self.id, "transfer of an activity already present");
            return Err(ScheduleError::DuplicateInsertion(id));
        }
        let activity = from
            .remove(id)
            .ok_or_else(|| from.ownership_violation(id))?;
        self.insert(index.unwrap_or(self.activities.len()), activity)
    }

    /// Insert without reconciling.
    pub(crate) fn attach(&mut self, index: usize, mut activity: Activity) -> ScheduleResult<ActivityId> {
        let id = activity.id();
        if self.contains(id) {
            warn!(activity = %id, schedule = %self.id, "activity already exists in schedule");
            return Err(ScheduleError::DuplicateInsertion(id));
        }
        if let Some(previous) = activity.owner().filter(|&owner| owner != self.id) {
            debug!(activity = %id, from = %previous, to = %self.id, "re-homing activity");
        }
        activity.set_owner(Some(self.id));
        let index = index.min(self.activities.len());
        self.activities.insert(index, activity);
        Ok(id)
    }

    // ── Removal ───────────────────────────────────────────────────────────

    /// Detach and return the activity with `id`.  The caller owns it.
    pub fn remove(&mut self, id: ActivityId) -> Option<Activity> {
        let index = self.position(id)?;
        self.remove_at(index)
    }

    /// Detach and return the activity at `index`; `None` at or past the end.
    pub fn remove_at(&mut self, index: usize) -> Option<Activity> {
        if index >= self.activities.len() {
            return None;
        }
        let activity = self.detach(index);
        self.update();
        Some(activity)
    }

    /// Detach and return every activity in `range` (clamped to the visible
    /// activities).
    pub fn remove_range(&mut self, range: impl RangeBounds<usize>) -> Vec<Activity> {
        let len = self.activities.len();
        let start = match range.start_bound() {
            Bound::Included(&s) => s,
            Bound::Excluded(&s) => s.saturating_add(1),
            Bound::Unbounded => 0,
        }
        .min(len);
        let end = match range.end_bound() {
            Bound::Included(&e) => e.saturating_add(1),
            Bound::Excluded(&e) => e,
            Bound::Unbounded => len,
        }
        .clamp(start, len);

        let removed: Vec<Activity> = self
            .activities
            .drain(start..end)
            .map(|mut a| {
                a.set_owner(None);
                a
            })
            .collect();
        if !removed.is_empty() {
            self.update();
        }
        removed
    }

    pub(crate) fn detach(&mut self, index: usize) -> Activity {
        let mut activity = self.activities.remove(index);
        activity.set_owner(None);
        activity
    }

    /// Move `id` in front of `before`.  `None`, or `before == id`, moves it to
    /// the end.
    pub fn move_before(&mut self, id: ActivityId, before: Option<ActivityId>) -> ScheduleResult<()> {
        let from = self.owned_index(id)?;
        if let Some(before) = before {
            self.owned_index(before)?;
        }

        let activity = self.activities.remove(from);
        let to = before
            .filter(|&b| b != id)
            .and_then(|b| self.position(b))
            .unwrap_or(self.activities.len());
        self.activities.insert(to, activity);
        self.update();
        Ok(())
    }

    // ── Beginnings ────────────────────────────────────────────────────────

    /// Record that `id` actually began at `at`.
    ///
    /// # Errors
    ///
    /// [`ScheduleError::OwnershipViolation`] if `id` is not in this schedule;
    /// nothing changes.
    pub fn begin_activity(&mut self, id: ActivityId, at: Offset) -> ScheduleResult<()> {
        let index = self.owned_index(id)?;
        self.activities[index].set_beginning(Some(at));
        self.update();
        Ok(())
    }

    /// Remove the recorded beginning of `id`.
    pub fn clear_beginning(&mut self, id: ActivityId) -> ScheduleResult<()> {
        let index = self.owned_index(id)?;
        self.activities[index].set_beginning(None);
        self.update();
        Ok(())
    }

    // ── Editing ───────────────────────────────────────────────────────────

    /// Mutable access to one activity's desired values.  The schedule is
    /// reconciled when the returned guard drops.
    pub fn edit(&mut self, id: ActivityId) -> ScheduleResult<ActivityMut<'_>> {
        let index = self.owned_index(id)?;
        Ok(ActivityMut { schedule: self, index })
    }

    // ── Reconciliation ────────────────────────────────────────────────────

    /// Recompute every activity's actual start and length.
    pub fn update(&mut self) {
        reconcile(&mut self.activities, self.length);
    }

    pub(crate) fn activities_mut(&mut self) -> &mut Vec<Activity> {
        &mut self.activities
    }

    pub(crate) fn owned_index(&self, id: ActivityId) -> ScheduleResult<usize> {
        self.position(id).ok_or_else(|| self.ownership_violation(id))
    }

    fn ownership_violation(&self, id: ActivityId) -> ScheduleError {
        warn!(activity = %id, schedule = %self.id, "activity does not belong to this schedule");
        ScheduleError::OwnershipViolation { activity: id, schedule: self.id }
    }
}

impl<'a> IntoIterator for &'a Schedule {
    type Item = &'a Activity;
    type IntoIter = std::slice::Iter<'a, Activity>;

    fn into_iter(self) -> Self::IntoIter {
        self.activities.iter()
    }
}

// ── ActivityMut ───────────────────────────────────────────────────────────────

/// Edit guard returned by [`Schedule::edit`].
///
/// Reads go through `Deref<Target = Activity>`.  Only desired values can be
/// changed; identity, ownership and computed values stay with the schedule.
pub struct ActivityMut<'a> {
    schedule: &'a mut Schedule,
    index:    usize,
}

impl ActivityMut<'_> {
    fn activity(&mut self) -> &mut Activity {
        &mut self.schedule.activities[self.index]
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.activity().set_name(name);
        self
    }

    pub fn set_start_mode(&mut self, mode: StartMode) -> &mut Self {
        self.activity().set_start_mode(mode);
        self
    }

    pub fn set_length_mode(&mut self, mode: LengthMode) -> &mut Self {
        self.activity().set_length_mode(mode);
        self
    }

    pub fn set_desired_start(&mut self, start: Offset) -> &mut Self {
        self.activity().set_desired_start(start);
        self
    }

    pub fn set_desired_length(&mut self, length: Duration) -> &mut Self {
        self.activity().set_desired_length(length);
        self
    }
}

impl Deref for ActivityMut<'_> {
    type Target = Activity;

    fn deref(&self) -> &Activity {
        &self.schedule.activities[self.index]
    }
}

impl Drop for ActivityMut<'_> {
    fn drop(&mut self) {
        self.schedule.update();
    }
}
