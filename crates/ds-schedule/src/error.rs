use ds_core::{ActivityId, DsError, Offset, ScheduleId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("{activity} does not belong to {schedule}")]
    OwnershipViolation {
        activity: ActivityId,
        schedule: ScheduleId,
    },

    #[error("{0} is already in this schedule")]
    DuplicateInsertion(ActivityId),

    #[error("there is no unbegun activity to begin")]
    NothingToBegin,

    #[error("a pause cannot be begun")]
    CannotBeginPause,

    #[error("beginning time {begin} is earlier than the active pause at {pause_start}")]
    BeginBeforePause {
        begin:       Offset,
        pause_start: Offset,
    },

    #[error("the schedule is empty")]
    EmptySchedule,

    #[error("pause time {0} is outside of the schedule")]
    PauseOutOfRange(Offset),

    #[error("there is already an active pause in the schedule")]
    PauseAlreadyActive,

    #[error("schedule file error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Offset(#[from] DsError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;
