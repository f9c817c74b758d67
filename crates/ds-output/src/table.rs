//! Fixed-width table rendering for terminals.
//!
//! ```text
//! Length: 04:00:00 | Activities: 3
//! Index | Fixed | Start    | Activity Name | Length   | Desired Start | Desired Length
//!     1   FA --   09:00:00   Work            01:00:00        09:00:00         01:00:00
//!     2   Pause from 10:00:00 to 10:30:00 (Duration: 00:30:00)
//!     3   B- --   10:30:00   Work            02:30:00        00:00:00         00:45:00
//! ```
//!
//! The name column is as wide as the longest name, clamped to 13..=30
//! characters.  Cells that do not fit are cut and end in `...`.

use std::io::Write;

use ds_schedule::{Schedule, StartMode};

use crate::row::{rows, ActivityRow};
use crate::writer::ScheduleWriter;
use crate::OutputResult;

const MIN_NAME_WIDTH: usize = 13;
const MAX_NAME_WIDTH: usize = 30;
const CONTINUATION: &str = "...";

#[derive(Copy, Clone)]
pub(crate) enum Align {
    Left,
    Right,
}

/// Writes schedules as a human-readable table.
pub struct TableWriter<W: Write> {
    out: W,
}

impl<W: Write> TableWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Header plus the single row at 1-based `index`.  Nothing is written
    /// when `index` is out of range.
    pub fn write_activity(&mut self, schedule: &Schedule, index: usize) -> OutputResult<()> {
        let Some(row) = index
            .checked_sub(1)
            .and_then(|i| schedule.get_index(i))
            .map(|activity| ActivityRow::new(index, activity))
        else {
            return Ok(());
        };
        let name_width = name_width(std::slice::from_ref(&row));
        self.write_header(name_width)?;
        self.write_row(&row, name_width)
    }

    fn write_header(&mut self, name_width: usize) -> OutputResult<()> {
        writeln!(
            self.out,
            "{} | {} | {} | {} | {} | {} | {}",
            fixed_width("Index", 5, Align::Left),
            fixed_width("Fixed", 5, Align::Left),
            fixed_width("Start", 8, Align::Left),
            fixed_width("Activity Name", name_width, Align::Left),
            fixed_width("Length", 8, Align::Left),
            fixed_width("Desired Start", 13, Align::Left),
            fixed_width("Desired Length", 14, Align::Left),
        )?;
        Ok(())
    }

    fn write_row(&mut self, row: &ActivityRow, name_width: usize) -> OutputResult<()> {
        write!(self.out, "{}   ", fixed_width(&row.index.to_string(), 5, Align::Right))?;

        if row.is_pause {
            if row.is_active_pause() {
                writeln!(self.out, " Pause initiated at {}", row.start)?;
            } else {
                writeln!(
                    self.out,
                    " Pause from {} to {} (Duration: {})",
                    row.start,
                    row.end(),
                    row.length
                )?;
            }
            return Ok(());
        }

        let relative = if row.start_mode == StartMode::FixedRelative { "R " } else { "" };
        writeln!(
            self.out,
            "{}   {}   {}   {}   {}   {}",
            fixed_width(&row.flags, 5, Align::Left),
            fixed_width(&row.start.to_string(), 8, Align::Right),
            fixed_width(&row.name, name_width, Align::Left),
            fixed_width(&row.length.to_string(), 8, Align::Right),
            fixed_width(&format!("{relative}{}", row.desired_start), 13, Align::Right),
            fixed_width(&row.desired_length.to_string(), 14, Align::Right),
        )?;
        Ok(())
    }
}

impl<W: Write> ScheduleWriter for TableWriter<W> {
    fn write_schedule(&mut self, schedule: &Schedule) -> OutputResult<()> {
        writeln!(self.out, "Length: {} | Activities: {}", schedule.length(), schedule.len())?;
        if schedule.is_empty() {
            return Ok(());
        }

        let rows = rows(schedule);
        let name_width = name_width(&rows);
        self.write_header(name_width)?;
        for row in &rows {
            self.write_row(row, name_width)?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        self.out.flush()?;
        Ok(())
    }
}

fn name_width(rows: &[ActivityRow]) -> usize {
    rows.iter()
        .map(|r| r.name.chars().count())
        .max()
        .unwrap_or(0)
        .clamp(MIN_NAME_WIDTH, MAX_NAME_WIDTH)
}

/// Pad `text` to exactly `width` characters, or cut it and end in `...`.
pub(crate) fn fixed_width(text: &str, width: usize, align: Align) -> String {
    let width = width.max(CONTINUATION.len());
    if text.chars().count() > width {
        let kept: String = text.chars().take(width - CONTINUATION.len()).collect();
        return kept + CONTINUATION;
    }
    match align {
        Align::Left => format!("{text:<width$}"),
        Align::Right => format!("{text:>width$}"),
    }
}
