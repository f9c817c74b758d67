//! Unit tests for ds-output.

use ds_core::Offset;
use ds_schedule::{Activity, Schedule, StartMode};

fn hms(h: i64, m: i64, s: i64) -> Offset {
    Offset::new(h, m, s)
}

/// Work 09:00–10:00, closed pause 10:00–10:30, Work (begun) 10:30–13:00.
fn paused_morning() -> Schedule {
    let mut s = Schedule::new(hms(4, 0, 0));
    s.append(Activity::new("Work").starting_at(hms(9, 0, 0))).unwrap();
    s.pause(hms(10, 0, 0)).unwrap();
    s.begin(None, hms(10, 30, 0)).unwrap();
    s
}

// ── Rows ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod row_tests {
    use super::*;
    use crate::row::{mode_flags, rows};

    #[test]
    fn flags() {
        assert_eq!(mode_flags(&Activity::new("x")), "-- --");
        assert_eq!(mode_flags(&Activity::new("x").starting_at(hms(1, 0, 0))), "FA --");
        assert_eq!(
            mode_flags(&Activity::new("x").with_start_mode(StartMode::FixedRelative)),
            "FR --"
        );
        assert_eq!(mode_flags(&Activity::new("x").lasting(hms(1, 0, 0))), "-- FA");
        assert_eq!(
            mode_flags(&Activity::new("x").starting_at(hms(1, 0, 0)).with_beginning(hms(1, 0, 0))),
            "BA --"
        );
    }

    #[test]
    fn rows_are_one_based_and_ordered() {
        let rows = rows(&paused_morning());
        assert_eq!(rows.iter().map(|r| r.index).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert!(!rows[0].is_pause);
        assert!(rows[1].is_pause && !rows[1].is_active_pause());
        assert_eq!(rows[1].end(), hms(10, 30, 0));
        assert_eq!(rows[2].beginning, Some(hms(10, 30, 0)));
        assert_eq!(rows[2].flags, "B- --");
    }
}

// ── Table ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod table_tests {
    use super::*;
    use crate::table::{fixed_width, Align};
    use crate::{ScheduleWriter, TableWriter};

    fn render(schedule: &Schedule) -> String {
        let mut w = TableWriter::new(Vec::new());
        w.write_schedule(schedule).unwrap();
        w.finish().unwrap();
        String::from_utf8(w.into_inner()).unwrap()
    }

    #[test]
    fn fixed_width_pads_and_cuts() {
        assert_eq!(fixed_width("ab", 5, Align::Left), "ab   ");
        assert_eq!(fixed_width("ab", 5, Align::Right), "   ab");
        assert_eq!(fixed_width("abcdefgh", 5, Align::Left), "ab...");
        assert_eq!(fixed_width("abcd", 1, Align::Left), "...");
    }

    #[test]
    fn empty_schedule_prints_only_the_summary() {
        assert_eq!(render(&Schedule::default()), "Length: 06:00:00 | Activities: 0\n");
    }

    #[test]
    fn layout() {
        let text = render(&paused_morning());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "Length: 04:00:00 | Activities: 3");
        assert_eq!(
            lines[1],
            "Index | Fixed | Start    | Activity Name | Length   | Desired Start | Desired Length"
        );
        assert_eq!(
            lines[2],
            "    1   FA --   09:00:00   Work            01:00:00        09:00:00         01:00:00"
        );
        assert_eq!(lines[3], "    2    Pause from 10:00:00 to 10:30:00 (Duration: 00:30:00)");
        assert!(lines[4].starts_with("    3   B- --   10:30:00   Work "));
    }

    #[test]
    fn active_pause_and_relative_start() {
        let mut s = Schedule::new(hms(4, 0, 0));
        s.append(Activity::new("Work").starting_at(hms(9, 0, 0))).unwrap();
        s.append(
            Activity::new("Walk")
                .with_start_mode(StartMode::FixedRelative)
                .with_desired_start(hms(3, 0, 0)),
        )
        .unwrap();
        s.pause(hms(10, 0, 0)).unwrap();

        let text = render(&s);
        assert!(text.contains(" Pause initiated at 10:00:00\n"));
        assert!(text.contains("R 03:00:00"));
    }

    #[test]
    fn single_activity() {
        let schedule = paused_morning();
        let mut w = TableWriter::new(Vec::new());
        w.write_activity(&schedule, 3).unwrap();
        w.write_activity(&schedule, 0).unwrap();
        w.write_activity(&schedule, 4).unwrap();
        let text = String::from_utf8(w.into_inner()).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Index | Fixed"));
        assert!(lines[1].starts_with("    3   B- --"));
    }

    #[test]
    fn name_column_is_clamped() {
        let mut s = Schedule::default();
        s.append(Activity::new("x".repeat(40))).unwrap();
        let text = render(&s);
        let header = text.lines().nth(1).unwrap();
        assert!(header.contains(&format!("| {:<30} |", "Activity Name")));
        assert!(text.contains(&format!("{}...", "x".repeat(27))));
    }
}

// ── CSV ───────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod csv_tests {
    use super::*;
    use crate::{CsvWriter, ScheduleWriter};

    fn records(bytes: &[u8]) -> (Vec<String>, Vec<Vec<String>>) {
        let mut rdr = csv::Reader::from_reader(bytes);
        let headers = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        let rows = rdr
            .records()
            .map(|r| r.unwrap().iter().map(str::to_owned).collect())
            .collect();
        (headers, rows)
    }

    #[test]
    fn header_and_rows() {
        let mut w = CsvWriter::new(Vec::new()).unwrap();
        w.write_schedule(&paused_morning()).unwrap();
        w.finish().unwrap();
        let (headers, rows) = records(&w.into_inner().unwrap());

        assert_eq!(
            headers,
            [
                "index",
                "flags",
                "start",
                "length",
                "name",
                "start_mode",
                "length_mode",
                "desired_start",
                "desired_length",
                "beginning"
            ]
        );
        assert_eq!(rows.len(), 3);
        assert_eq!(
            rows[0],
            ["1", "FA --", "09:00:00", "01:00:00", "Work", "Fixed-Absolute", "Free", "09:00:00", "01:00:00", ""]
        );
        assert_eq!(rows[1][4], "Pause");
        assert_eq!(rows[1][6], "Fixed");
        assert_eq!(rows[2][9], "10:30:00");
    }

    #[test]
    fn empty_schedule_writes_only_the_header() {
        let mut w = CsvWriter::new(Vec::new()).unwrap();
        w.write_schedule(&Schedule::default()).unwrap();
        let (_, rows) = records(&w.into_inner().unwrap());
        assert!(rows.is_empty());
    }

    #[test]
    fn file_backend() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("schedule.csv");

        let mut w = CsvWriter::from_path(&path).unwrap();
        w.write_schedule(&paused_morning()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();

        let bytes = std::fs::read(&path).unwrap();
        let (_, rows) = records(&bytes);
        assert_eq!(rows.len(), 3);
    }
}
