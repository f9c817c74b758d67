//! JSON schedule file loader and writer.
//!
//! # File format
//!
//! ```json
//! {
//!   "version": "1.0",
//!   "length": "08:00:00",
//!   "activities": [
//!     { "name": "Breakfast", "length": "00:30:00" },
//!     { "name": "Work", "start_mode": "Fixed-Absolute", "start": "09:00:00",
//!       "length_mode": "Fixed", "length": "02:00:00", "beginning": "09:05:00" }
//!   ]
//! }
//! ```
//!
//! Times use the `[-]HH:MM:SS` display form of [`Offset`].
//!
//! | Field         | Written when                 | Missing on read        |
//! |---------------|------------------------------|------------------------|
//! | `name`        | non-empty                    | `"Activity"`           |
//! | `start_mode`  | not free                     | free (unknown: free)   |
//! | `start`       | non-zero                     | 00:00:00               |
//! | `length_mode` | fixed                        | free (unknown: free)   |
//! | `length`      | always                       | 01:00:00               |
//! | `beginning`   | the activity has been begun  | not begun              |
//!
//! Activities are appended in file order, so the loaded schedule is fully
//! reconciled before it is returned.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use ds_core::{Duration, Offset};

use crate::activity::{Activity, LengthMode, StartMode, DEFAULT_DESIRED_LENGTH};
use crate::schedule::{Schedule, DEFAULT_LENGTH};
use crate::ScheduleResult;

/// Version string written to new files.
pub const FILE_VERSION: &str = "1.0";

const FIXED_ABSOLUTE: &str = "Fixed-Absolute";
const FIXED_RELATIVE: &str = "Fixed-Relative";
const FIXED: &str = "Fixed";

// ── File records ──────────────────────────────────────────────────────────────

#[derive(Serialize, Deserialize)]
struct ScheduleRecord {
    #[serde(default)]
    version:    String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    length:     Option<Duration>,
    #[serde(default)]
    activities: Vec<ActivityRecord>,
}

#[derive(Serialize, Deserialize)]
struct ActivityRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name:        Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    start_mode:  Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    start:       Option<Offset>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    length_mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    length:      Option<Duration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    beginning:   Option<Offset>,
}

impl ActivityRecord {
    fn from_activity(activity: &Activity) -> Self {
        let start_mode = match activity.start_mode() {
            StartMode::Free => None,
            StartMode::FixedAbsolute => Some(FIXED_ABSOLUTE.to_owned()),
            StartMode::FixedRelative => Some(FIXED_RELATIVE.to_owned()),
        };
        Self {
            name:        Some(activity.name().to_owned()).filter(|n| !n.is_empty()),
            start_mode,
            start:       Some(activity.desired_start()).filter(|s| !s.is_zero()),
            length_mode: activity.length_mode().is_fixed().then(|| FIXED.to_owned()),
            length:      Some(activity.desired_length()),
            beginning:   activity.beginning(),
        }
    }

    fn into_activity(self) -> Activity {
        let start_mode = match self.start_mode.as_deref() {
            Some(FIXED_ABSOLUTE) => StartMode::FixedAbsolute,
            Some(FIXED_RELATIVE) => StartMode::FixedRelative,
            _ => StartMode::Free,
        };
        let length_mode = match self.length_mode.as_deref() {
            Some(FIXED) => LengthMode::Fixed,
            _ => LengthMode::Free,
        };

        let activity = match self.name {
            Some(name) => Activity::new(name),
            None => Activity::default(),
        }
        .with_start_mode(start_mode)
        .with_length_mode(length_mode)
        .with_desired_start(self.start.unwrap_or(Offset::ZERO))
        .with_desired_length(self.length.unwrap_or(DEFAULT_DESIRED_LENGTH));

        match self.beginning {
            Some(at) => activity.with_beginning(at),
            None => activity,
        }
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a schedule from a JSON file.
pub fn load_schedule(path: &Path) -> ScheduleResult<Schedule> {
    let file = File::open(path)?;
    let schedule = load_schedule_reader(BufReader::new(file))?;
    debug!(path = %path.display(), activities = schedule.len(), "schedule loaded");
    Ok(schedule)
}

/// Like [`load_schedule`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`).
pub fn load_schedule_reader<R: Read>(reader: R) -> ScheduleResult<Schedule> {
    let record: ScheduleRecord = serde_json::from_reader(reader)?;

    let mut schedule = Schedule::new(record.length.unwrap_or(DEFAULT_LENGTH));
    for activity in record.activities {
        schedule.append(activity.into_activity())?;
    }
    Ok(schedule)
}

/// Write `schedule` to a JSON file, replacing it.
pub fn save_schedule(path: &Path, schedule: &Schedule) -> ScheduleResult<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    save_schedule_writer(&mut writer, schedule)?;
    writer.flush()?;
    debug!(path = %path.display(), activities = schedule.len(), "schedule saved");
    Ok(())
}

/// Like [`save_schedule`] but accepts any `Write` sink.
pub fn save_schedule_writer<W: Write>(mut writer: W, schedule: &Schedule) -> ScheduleResult<()> {
    let record = ScheduleRecord {
        version:    FILE_VERSION.to_owned(),
        length:     Some(schedule.length()),
        activities: schedule.iter().map(ActivityRecord::from_activity).collect(),
    };
    serde_json::to_writer_pretty(&mut writer, &record)?;
    writer.write_all(b"\n")?;
    Ok(())
}
