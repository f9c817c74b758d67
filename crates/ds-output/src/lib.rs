//! `ds-output`: rendering and export of reconciled schedules.
//!
//! | Backend         | Sink          | Format                                        |
//! |-----------------|---------------|-----------------------------------------------|
//! | [`TableWriter`] | any `Write`   | fixed-width terminal table, pauses inline     |
//! | [`CsvWriter`]   | any `Write`   | one header row, one row per activity          |
//!
//! Both implement [`ScheduleWriter`] and read the schedule through
//! [`rows`], which flattens each activity into an [`ActivityRow`].
//!
//! # Usage
//!
//! ```rust,ignore
//! use ds_output::{ScheduleWriter, TableWriter};
//!
//! let mut table = TableWriter::new(std::io::stdout().lock());
//! table.write_schedule(&schedule)?;
//! table.finish()?;
//! ```

pub mod csv;
pub mod error;
pub mod row;
pub mod table;
pub mod writer;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use row::{mode_flags, rows, ActivityRow};
pub use table::TableWriter;
pub use writer::ScheduleWriter;
