//! Report CLI commands

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use clap::Subcommand;

use crate::config::Settings;
use crate::error::{BudgetError, BudgetResult};
use crate::models::UserId;
use crate::reports::{DashboardReport, TrendReport};
use crate::storage::Storage;

use super::{reference_date, today};

/// Report subcommands
#[derive(Subcommand)]
pub enum ReportCommands {
    /// Full dashboard: cards, charts and recent transactions
    Dashboard {
        /// Month anchoring the spending trend (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
        /// Also write the dashboard figures to this CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Extra expenses per category
    Categories,
    /// Monthly spending over recent months
    Trend {
        /// Last month of the window (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
        /// Number of months in the window
        #[arg(short = 'n', long)]
        months: Option<u32>,
    },
    /// How monthly income is split
    Allocation,
    /// Fixed expense breakdown
    Fixed,
}

/// Handle a report command
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    user_id: &UserId,
    cmd: ReportCommands,
) -> BudgetResult<()> {
    let currency = settings.currency_symbol.as_str();
    let today = today();

    match cmd {
        ReportCommands::Dashboard { month, output } => {
            let date = reference_date(month.as_deref(), today)?;
            let report = DashboardReport::generate(storage, user_id, date, settings)?;
            print!("{}", report.format_terminal(settings));

            if let Some(path) = output {
                let file = File::create(&path).map_err(|e| {
                    BudgetError::Export(format!("Failed to create {}: {}", path.display(), e))
                })?;
                report.export_csv(BufWriter::new(file))?;
                println!("\nDashboard exported to {}", path.display());
            }
        }
        ReportCommands::Categories => {
            let report = DashboardReport::generate(storage, user_id, today, settings)?;
            print!("{}", report.format_categories(currency));
        }
        ReportCommands::Trend { month, months } => {
            let date = reference_date(month.as_deref(), today)?;
            let window = months.unwrap_or(settings.trend_window_months);
            let report = TrendReport::generate(storage, user_id, date, window)?;
            print!("{}", report.format_terminal(currency));
        }
        ReportCommands::Allocation => {
            let report = DashboardReport::generate(storage, user_id, today, settings)?;
            print!("{}", report.format_allocation(currency));
        }
        ReportCommands::Fixed => {
            let report = DashboardReport::generate(storage, user_id, today, settings)?;
            print!("{}", report.format_fixed(currency));
        }
    }

    Ok(())
}
