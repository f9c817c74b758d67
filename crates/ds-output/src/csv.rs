//! CSV export backend.
//!
//! One header row, then one row per activity:
//!
//! ```csv
//! index,flags,start,length,name,start_mode,length_mode,desired_start,desired_length,beginning
//! 1,FA --,09:00:00,03:00:00,Work,Fixed-Absolute,Free,09:00:00,01:00:00,
//! ```
//!
//! An activity that has not been begun leaves `beginning` empty.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::Writer;
use ds_schedule::{LengthMode, Schedule, StartMode};

use crate::row::rows;
use crate::writer::ScheduleWriter;
use crate::OutputResult;

const HEADER: [&str; 10] = [
    "index",
    "flags",
    "start",
    "length",
    "name",
    "start_mode",
    "length_mode",
    "desired_start",
    "desired_length",
    "beginning",
];

/// Writes schedules as CSV to any `Write` sink.
pub struct CsvWriter<W: Write> {
    writer:   Writer<W>,
    finished: bool,
}

impl CsvWriter<File> {
    /// Create (or truncate) the file at `path` and write the header row.
    pub fn from_path(path: &Path) -> OutputResult<Self> {
        Self::new(File::create(path)?)
    }
}

impl<W: Write> CsvWriter<W> {
    /// Wrap `sink` and write the header row.
    pub fn new(sink: W) -> OutputResult<Self> {
        let mut writer = Writer::from_writer(sink);
        writer.write_record(HEADER)?;
        Ok(Self { writer, finished: false })
    }

    /// Flush and return the wrapped sink.
    pub fn into_inner(self) -> OutputResult<W> {
        self.writer.into_inner().map_err(|e| e.into_error().into())
    }
}

impl<W: Write> ScheduleWriter for CsvWriter<W> {
    fn write_schedule(&mut self, schedule: &Schedule) -> OutputResult<()> {
        for row in rows(schedule) {
            self.writer.write_record(&[
                row.index.to_string(),
                row.flags,
                row.start.to_string(),
                row.length.to_string(),
                row.name,
                start_mode_label(row.start_mode).to_owned(),
                length_mode_label(row.length_mode).to_owned(),
                row.desired_start.to_string(),
                row.desired_length.to_string(),
                row.beginning.map(|b| b.to_string()).unwrap_or_default(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.writer.flush()?;
        Ok(())
    }
}

fn start_mode_label(mode: StartMode) -> &'static str {
    match mode {
        StartMode::Free => "Free",
        StartMode::FixedAbsolute => "Fixed-Absolute",
        StartMode::FixedRelative => "Fixed-Relative",
    }
}

fn length_mode_label(mode: LengthMode) -> &'static str {
    match mode {
        LengthMode::Free => "Free",
        LengthMode::Fixed => "Fixed",
    }
}
