//! `attendance` command

use anyhow::Result;
use colored::*;

use crate::cli::RunArgs;
use crate::config::Config;
use crate::output::print_grid;
use crate::pipeline::{self, AttendanceOutcome, WriteMode};
use crate::sheets;

pub fn handle_attendance_command(args: &RunArgs, config: &Config) -> Result<AttendanceOutcome> {
    let mut store = sheets::open_store(&config.attendance.workbook)?;
    let outcome = pipeline::run_attendance(store.as_mut(), &config.attendance, args.mode())?;

    if let Some(format) = args.print {
        print_grid("Attendance summary", &outcome.summary.to_grid(), format)?;
        print_grid("Presence", &outcome.presence.to_grid(), format)?;
    }

    let verb = match args.mode() {
        WriteMode::Write => "Wrote",
        WriteMode::DryRun => "Dry run:",
    };
    eprintln!(
        "{} {} attendance for {} members across {} events ({})",
        "✓".green(),
        verb,
        outcome.record.members().len().to_string().bold(),
        outcome.record.events().len(),
        store.location().dimmed()
    );
    Ok(outcome)
}
