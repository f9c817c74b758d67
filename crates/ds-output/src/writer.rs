//! The `ScheduleWriter` trait implemented by all output backends.

use ds_schedule::Schedule;

use crate::OutputResult;

/// Trait implemented by the table and CSV writers.
pub trait ScheduleWriter {
    /// Render every activity of `schedule`.
    fn write_schedule(&mut self, schedule: &Schedule) -> OutputResult<()>;

    /// Flush the underlying sink.
    ///
    /// Safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
