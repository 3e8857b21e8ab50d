//! Export CLI command

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::{Args, ValueEnum};

use crate::error::{BudgetError, BudgetResult};
use crate::export::{export_expenses_csv, export_full_json, export_full_yaml};
use crate::models::UserId;
use crate::storage::Storage;

/// Export format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// Profile and expenses as JSON
    Json,
    /// Profile and expenses as YAML
    Yaml,
    /// Expenses as CSV
    Csv,
}

/// Arguments of `budget export`
#[derive(Args)]
pub struct ExportArgs {
    /// Output format
    #[arg(value_enum)]
    pub format: ExportFormat,
    /// Output file, defaults to stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

fn write_export<W: Write>(
    storage: &Storage,
    user_id: &UserId,
    format: ExportFormat,
    mut writer: W,
) -> BudgetResult<()> {
    match format {
        ExportFormat::Json => export_full_json(storage, user_id, &mut writer)?,
        ExportFormat::Yaml => export_full_yaml(storage, user_id, &mut writer)?,
        ExportFormat::Csv => export_expenses_csv(storage, user_id, &mut writer)?,
    }
    writer.flush()?;
    Ok(())
}

/// Handle the export command
pub fn handle_export_command(storage: &Storage, user_id: &UserId, args: ExportArgs) -> BudgetResult<()> {
    match args.output {
        Some(path) => {
            let file = File::create(&path).map_err(|e| {
                BudgetError::Export(format!("Failed to create {}: {}", path.display(), e))
            })?;
            write_export(storage, user_id, args.format, BufWriter::new(file))?;
            eprintln!("Exported {:?} data to {}", args.format, path.display());
        }
        None => {
            let stdout = io::stdout();
            write_export(storage, user_id, args.format, stdout.lock())?;
        }
    }

    Ok(())
}
