//! Command handlers

mod attendance;
mod dues;

use anyhow::Result;

use super::Commands;
use crate::config::Config;

pub use attendance::handle_attendance_command;
pub use dues::handle_dues_command;

pub fn dispatch(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Attendance(args) => {
            handle_attendance_command(&args, config)?;
        }
        Commands::Dues(args) => {
            handle_dues_command(&args, config, None)?;
        }
        Commands::Run(args) => {
            let outcome = handle_attendance_command(&args, config)?;
            handle_dues_command(&args, config, Some(outcome.summary_table()))?;
        }
    }
    Ok(())
}
