//! `dues` command

use anyhow::Result;
use colored::*;

use crate::cli::RunArgs;
use crate::config::Config;
use crate::dues::Ledger;
use crate::output::print_grid;
use crate::pipeline::{self, WriteMode};
use crate::sheets;
use crate::table::RawTable;

/// Run the dues pipeline; `summary` is read from the configured sheet when not given
pub fn handle_dues_command(
    args: &RunArgs,
    config: &Config,
    summary: Option<RawTable>,
) -> Result<Ledger> {
    let summary = match summary {
        Some(table) => table,
        None => {
            let mut summary_store = sheets::open_store(config.summary_workbook())?;
            pipeline::load_table(summary_store.as_mut(), &config.dues.summary_sheet)?
        }
    };

    let mut store = sheets::open_store(&config.dues.workbook)?;
    let ledger = pipeline::run_dues(store.as_mut(), &summary, &config.dues, args.mode())?;

    if let Some(format) = args.print {
        print_grid("Dues ledger", &ledger.to_grid(), format)?;
    }

    let totals = ledger.totals();
    let verb = match args.mode() {
        WriteMode::Write => "Wrote",
        WriteMode::DryRun => "Dry run:",
    };
    eprintln!(
        "{} {} ledger for {} members; {} owe {} ({})",
        "✓".green(),
        verb,
        totals.members.to_string().bold(),
        totals.owing,
        format!("${:.2}", totals.owed).yellow(),
        store.location().dimmed()
    );
    Ok(ledger)
}
