//! Base error type.
//!
//! Sub-crates define their own error enums and wrap `DsError` as one variant
//! (`ScheduleError::Offset`), so time parsing failures surface unchanged.

use thiserror::Error;

/// The error type for `ds-core`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DsError {
    #[error("invalid time {input:?}: {reason}")]
    Parse {
        input:  String,
        reason: &'static str,
    },
}

impl DsError {
    pub(crate) fn parse(input: &str, reason: &'static str) -> Self {
        DsError::Parse { input: input.to_owned(), reason }
    }
}

/// Shorthand result type for `ds-core`.
pub type DsResult<T> = Result<T, DsError>;
