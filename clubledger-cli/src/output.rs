//! Printing result grids to stdout

use std::io::Write;

use anyhow::{Context, Result};
use clap::ValueEnum;
use colored::*;
use unicode_width::UnicodeWidthStr;

use crate::table::{Grid, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PrintFormat {
    /// Aligned columns
    Table,
    /// Array of objects keyed by header
    Json,
    Csv,
}

/// Print `grid` under a `title` heading
pub fn print_grid(title: &str, grid: &Grid, format: PrintFormat) -> Result<()> {
    match format {
        PrintFormat::Table => {
            println!("{}", title.bold());
            print!("{}", render_table(grid));
            println!();
        }
        PrintFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&grid_to_json(grid))?);
        }
        PrintFormat::Csv => {
            let stdout = std::io::stdout();
            let mut wtr = csv::WriterBuilder::new()
                .flexible(true)
                .from_writer(stdout.lock());
            for row in grid {
                wtr.write_record(row.iter().map(|v| v.to_string()))
                    .context("Failed to write CSV row")?;
            }
            wtr.flush().context("Failed to flush CSV writer")?;
        }
    }
    std::io::stdout().flush()?;
    Ok(())
}

/// Render with columns padded to their widest cell; multi-line cells are
/// joined with " / "
pub fn render_table(grid: &Grid) -> String {
    let cells: Vec<Vec<String>> = grid
        .iter()
        .map(|row| row.iter().map(|v| v.to_string().replace('\n', " / ")).collect())
        .collect();

    let columns = cells.iter().map(Vec::len).max().unwrap_or(0);
    let mut widths = vec![0usize; columns];
    for row in &cells {
        for (col, cell) in row.iter().enumerate() {
            widths[col] = widths[col].max(UnicodeWidthStr::width(cell.as_str()));
        }
    }

    let mut out = String::new();
    for (row_idx, row) in cells.iter().enumerate() {
        let line: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(col, cell)| {
                let pad = widths[col] - UnicodeWidthStr::width(cell.as_str());
                let numeric = grid[row_idx]
                    .get(col)
                    .is_some_and(|v| matches!(v, Value::Int(_) | Value::Float(_)));
                if numeric {
                    format!("{}{}", " ".repeat(pad), cell)
                } else if row_idx == 0 {
                    format!("{}{}", cell.bold(), " ".repeat(pad))
                } else {
                    format!("{}{}", cell, " ".repeat(pad))
                }
            })
            .collect();
        out.push_str(line.join("  ").trim_end());
        out.push('\n');
    }
    out
}

/// Rows after the header as objects keyed by header cell
pub fn grid_to_json(grid: &Grid) -> serde_json::Value {
    let Some((header, rows)) = grid.split_first() else {
        return serde_json::Value::Array(Vec::new());
    };
    let keys: Vec<String> = header.iter().map(|h| h.to_string()).collect();

    let objects = rows
        .iter()
        .map(|row| {
            let map: serde_json::Map<String, serde_json::Value> = keys
                .iter()
                .zip(row.iter())
                .map(|(k, v)| (k.clone(), v.to_json()))
                .collect();
            serde_json::Value::Object(map)
        })
        .collect();
    serde_json::Value::Array(objects)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> Grid {
        vec![
            vec![Value::from("Full-Name"), Value::from("Owed")],
            vec![Value::from("Ada Lovelace"), Value::Float(20.0)],
            vec![Value::from("Bo"), Value::Float(0.0)],
        ]
    }

    #[test]
    fn test_render_table_aligns() {
        colored::control::set_override(false);
        let rendered = render_table(&grid());
        assert_eq!(
            rendered,
            "Full-Name     Owed\nAda Lovelace  20.00\nBo             0.00\n"
        );
    }

    #[test]
    fn test_grid_to_json() {
        let json = grid_to_json(&grid());
        assert_eq!(
            json,
            serde_json::json!([
                {"Full-Name": "Ada Lovelace", "Owed": 20.0},
                {"Full-Name": "Bo", "Owed": 0.0},
            ])
        );
        assert_eq!(grid_to_json(&Vec::new()), serde_json::json!([]));
    }
}
