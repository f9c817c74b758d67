//! Command dispatch.
//!
//! Every command loads the schedule file, applies one change, writes the
//! file back, and prints the table unless `--quiet` was given.  `list` and
//! `export` only read.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::{Local, Timelike};
use ds_core::{ActivityId, Offset};
use ds_output::{CsvWriter, ScheduleWriter, TableWriter};
use ds_schedule::{load_schedule, save_schedule, Activity, Schedule};
use tracing::{debug, info};

use crate::cli::{ActivityFields, Cli, Command, SetCommand};

pub fn run(cli: Cli) -> Result<()> {
    let path = cli.file.as_path();
    let mut schedule = open(path)?;

    match cli.command.unwrap_or(Command::List { activity: None }) {
        Command::List { activity } => return list(&schedule, activity),
        Command::Export { output } => return export(&schedule, output.as_deref()),

        Command::Add { before, fields } => {
            let mut activity = Activity::default();
            fields.apply_to(&mut activity);
            match before {
                Some(number) => {
                    let before = activity_id(&schedule, number)?;
                    schedule.insert_before(before, activity)?;
                }
                None => {
                    schedule.append(activity)?;
                }
            }
        }
        Command::Set(SetCommand::Length { length }) => schedule.set_length(length),
        Command::Set(SetCommand::Activity { activity, fields }) => {
            let id = activity_id(&schedule, activity)?;
            fields.apply_to_owned(&mut schedule, id)?;
        }
        Command::Move { activity, before } => {
            let id = activity_id(&schedule, activity)?;
            let before = activity_id(&schedule, before)?;
            schedule.move_before(id, Some(before))?;
        }
        Command::Remove { activity } => {
            let id = activity_id(&schedule, activity)?;
            schedule.remove(id);
        }
        Command::Begin { activity, time } => {
            let target = activity.map(|n| activity_id(&schedule, n)).transpose()?;
            let at = time.unwrap_or_else(now);
            let id = schedule.begin(target, at)?;
            info!(activity = %id, %at, "begun");
        }
        Command::Reset { activity: Some(number) } => {
            let id = activity_id(&schedule, number)?;
            schedule.reset(id)?;
        }
        Command::Reset { activity: None } => schedule.reset_all(),
        Command::Pause { time } => {
            let at = time.unwrap_or_else(now);
            schedule.pause(at)?;
            info!(%at, "paused");
        }
    }

    save_schedule(path, &schedule).with_context(|| format!("writing {}", path.display()))?;
    if !cli.quiet {
        print_table(&schedule)?;
    }
    Ok(())
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Load `path`, or start a new default schedule if it does not exist yet.
fn open(path: &Path) -> Result<Schedule> {
    if !path.exists() {
        debug!(path = %path.display(), "no schedule file, starting a new schedule");
        return Ok(Schedule::default());
    }
    load_schedule(path).with_context(|| format!("reading {}", path.display()))
}

/// Resolve a 1-based activity number shown in the table.
fn activity_id(schedule: &Schedule, number: usize) -> Result<ActivityId> {
    match number.checked_sub(1).and_then(|i| schedule.get_index(i)) {
        Some(activity) => Ok(activity.id()),
        None => bail!("activity number {number} out of range (1..={})", schedule.len()),
    }
}

/// Local time of day.
fn now() -> Offset {
    let time = Local::now().time();
    Offset::from_time_of_day(time.hour().into(), time.minute().into(), time.second().into())
}

fn list(schedule: &Schedule, activity: Option<usize>) -> Result<()> {
    let mut table = TableWriter::new(io::stdout().lock());
    match activity {
        Some(number) => {
            activity_id(schedule, number)?;
            table.write_activity(schedule, number)?;
        }
        None => table.write_schedule(schedule)?,
    }
    table.finish()?;
    Ok(())
}

fn print_table(schedule: &Schedule) -> Result<()> {
    let mut table = TableWriter::new(io::stdout().lock());
    table.write_schedule(schedule)?;
    table.finish()?;
    Ok(())
}

fn export(schedule: &Schedule, output: Option<&Path>) -> Result<()> {
    let sink: Box<dyn Write> = match output {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("creating {}", path.display()))?,
        ),
        None => Box::new(io::stdout().lock()),
    };
    let mut csv = CsvWriter::new(sink)?;
    csv.write_schedule(schedule)?;
    csv.finish()?;
    Ok(())
}

impl ActivityFields {
    /// Apply the given fields to an activity not yet in a schedule.
    fn apply_to(self, activity: &mut Activity) {
        if let Some(name) = self.name {
            activity.set_name(name);
        }
        if let Some(mode) = self.start_mode {
            activity.set_start_mode(mode.into());
        }
        if let Some(start) = self.start {
            activity.set_desired_start(start);
        }
        if let Some(mode) = self.length_mode {
            activity.set_length_mode(mode.into());
        }
        if let Some(length) = self.length {
            activity.set_desired_length(length);
        }
    }

    /// Apply the given fields to an activity in `schedule`.
    fn apply_to_owned(self, schedule: &mut Schedule, id: ActivityId) -> Result<()> {
        let mut activity = schedule.edit(id)?;
        if let Some(name) = self.name {
            activity.set_name(name);
        }
        if let Some(mode) = self.start_mode {
            activity.set_start_mode(mode.into());
        }
        if let Some(start) = self.start {
            activity.set_desired_start(start);
        }
        if let Some(mode) = self.length_mode {
            activity.set_length_mode(mode.into());
        }
        if let Some(length) = self.length {
            activity.set_desired_length(length);
        }
        Ok(())
    }
}
