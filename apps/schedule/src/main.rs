//! schedule: an elastic day planner for the terminal.
//!
//! Keeps one day's activities in a JSON file.  Free activities stretch or
//! shrink to fill whatever time the fixed ones leave; beginning an activity
//! or pausing re-flows the rest of the day around the real clock.
//!
//! ```text
//! schedule add -n Work -l 2:00:00
//! schedule add -n Lunch --fs a -s 12:00:00 --fl a -l 1:00:00
//! schedule begin
//! schedule pause
//! ```

mod cli;
mod commands;
mod logging;


use anyhow::Result;
use clap::Parser;

use cli::Cli;

fn main() -> Result<()> {
    logging::init();
    commands::run(Cli::parse())
}
