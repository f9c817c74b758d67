//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use ds_core::Offset;
use ds_schedule::{LengthMode, StartMode};

/// Schedule file used when neither `--file` nor `SCHEDULE_FILE` is given.
pub const DEFAULT_FILE: &str = "default.sch";

#[derive(Parser)]
#[command(name = "schedule", version)]
#[command(about = "Plan a day whose free activities stretch to fill the time", long_about = None)]
pub struct Cli {
    /// Schedule file to read and update
    #[arg(short, long, global = true, env = "SCHEDULE_FILE", default_value = DEFAULT_FILE)]
    pub file: PathBuf,

    /// Do not print the schedule after changing it
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Display the schedule, or a single activity
    List {
        /// Activity number (1-based)
        activity: Option<usize>,
    },
    /// Add an activity at the end, or before another one
    Add {
        /// Insert before this activity number
        #[arg(short, long)]
        before: Option<usize>,
        #[command(flatten)]
        fields: ActivityFields,
    },
    /// Change the schedule length or an activity's details
    #[command(subcommand)]
    Set(SetCommand),
    /// Move an activity before another; equal numbers move it to the end
    Move { activity: usize, before: usize },
    /// Delete an activity
    Remove { activity: usize },
    /// Begin an activity (default: the next unbegun one) and end a running pause
    Begin {
        activity: Option<usize>,
        /// Beginning time (default: now)
        #[arg(requires = "activity", allow_hyphen_values = true)]
        time: Option<Offset>,
    },
    /// Clear beginnings and delete pauses, or clear one activity's beginning
    Reset { activity: Option<usize> },
    /// Insert a pause, splitting the activity it interrupts
    Pause {
        /// Pause time (default: now)
        #[arg(allow_hyphen_values = true)]
        time: Option<Offset>,
    },
    /// Write the schedule as CSV
    Export {
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum SetCommand {
    /// Set the schedule's total length
    Length {
        #[arg(allow_hyphen_values = true)]
        length: Offset,
    },
    /// Set an activity's details
    Activity {
        activity: usize,
        #[command(flatten)]
        fields: ActivityFields,
    },
}

#[derive(Args, Default)]
pub struct ActivityFields {
    /// Name
    #[arg(short, long)]
    pub name: Option<String>,

    /// Start mode
    #[arg(long = "fs", value_enum)]
    pub start_mode: Option<StartModeArg>,

    /// Desired start time ([-]hh:mm:ss)
    #[arg(short, long, allow_hyphen_values = true)]
    pub start: Option<Offset>,

    /// Length mode
    #[arg(long = "fl", value_enum)]
    pub length_mode: Option<LengthModeArg>,

    /// Desired length ([-]hh:mm:ss)
    #[arg(short, long, allow_hyphen_values = true)]
    pub length: Option<Offset>,
}

#[derive(Copy, Clone, ValueEnum)]
pub enum StartModeArg {
    /// Free
    #[value(name = "f")]
    Free,
    /// Fixed-Absolute
    #[value(name = "a")]
    Absolute,
    /// Fixed-Relative
    #[value(name = "r")]
    Relative,
}

impl From<StartModeArg> for StartMode {
    fn from(arg: StartModeArg) -> Self {
        match arg {
            StartModeArg::Free => StartMode::Free,
            StartModeArg::Absolute => StartMode::FixedAbsolute,
            StartModeArg::Relative => StartMode::FixedRelative,
        }
    }
}

#[derive(Copy, Clone, ValueEnum)]
pub enum LengthModeArg {
    /// Free
    #[value(name = "f")]
    Free,
    /// Fixed
    #[value(name = "a")]
    Fixed,
}

impl From<LengthModeArg> for LengthMode {
    fn from(arg: LengthModeArg) -> Self {
        match arg {
            LengthModeArg::Free => LengthMode::Free,
            LengthModeArg::Fixed => LengthMode::Fixed,
        }
    }
}
