//! Command-line interface

pub mod commands;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::output::PrintFormat;
use crate::pipeline::WriteMode;

#[derive(Parser, Debug)]
#[command(name = "clubledger", version, about = "Club attendance and dues reconciliation")]
pub struct Cli {
    #[arg(long, global = true, help = "Config file (default: $CLUBLEDGER_CONFIG, ./clubledger.toml, or the user config dir)")]
    pub config: Option<PathBuf>,
    #[arg(short, long, global = true, action = clap::ArgAction::Count, help = "More log output (-v debug, -vv trace)")]
    pub verbose: u8,
    #[arg(short, long, global = true, help = "Only log warnings and errors")]
    pub quiet: bool,
    #[arg(long, global = true, help = "Disable colored output")]
    pub no_color: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Count practices per member and write the summary and presence sheets
    Attendance(RunArgs),
    /// Reconcile payments and trips into the dues ledger
    Dues(RunArgs),
    /// Run attendance, then dues on the fresh summary
    Run(RunArgs),
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    #[arg(long, help = "Compute results without writing any sheet")]
    pub dry_run: bool,
    #[arg(long, value_enum, help = "Print results to stdout")]
    pub print: Option<PrintFormat>,
}

impl RunArgs {
    pub fn mode(&self) -> WriteMode {
        if self.dry_run {
            WriteMode::DryRun
        } else {
            WriteMode::Write
        }
    }
}
