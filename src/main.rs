use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};

use budget_tracker::cli::{
    handle_expense_command, handle_export_command, handle_history_command,
    handle_profile_command, handle_report_command, ExpenseCommands, ExportArgs, ProfileCommands,
    ReportCommands,
};
use budget_tracker::config::{BudgetPaths, Settings};
use budget_tracker::logging;
use budget_tracker::models::UserId;
use budget_tracker::storage::Storage;

#[derive(Parser)]
#[command(
    name = "budget",
    author = "Kaylee Beyene",
    version,
    about = "Personal budget tracker for the terminal",
    long_about = "budget-tracker keeps a monthly budget profile (income, mandatory \
                  savings and fixed expenses) next to a log of extra expenses, and \
                  turns both into a dashboard of where the month's money goes."
)]
struct Cli {
    /// User whose data is read and written
    #[arg(long, global = true, env = "BUDGET_USER")]
    user: Option<String>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Budget profile commands
    #[command(subcommand)]
    Profile(ProfileCommands),

    /// Expense commands
    #[command(subcommand, alias = "exp")]
    Expense(ExpenseCommands),

    /// Dashboard and reports
    #[command(subcommand)]
    Report(ReportCommands),

    /// Export a user's data
    Export(ExportArgs),

    /// Show recently logged and deleted expenses
    History {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Initialize the data directory
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose);

    let paths = BudgetPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    let user_name = cli.user.unwrap_or_else(|| settings.default_user.clone());
    let user_id = UserId::new(user_name).context("Invalid --user value")?;

    match cli.command {
        Some(Commands::Profile(cmd)) => {
            handle_profile_command(&storage, &settings, &user_id, cmd)?;
        }
        Some(Commands::Expense(cmd)) => {
            handle_expense_command(&storage, &settings, &user_id, cmd)?;
        }
        Some(Commands::Report(cmd)) => {
            handle_report_command(&storage, &settings, &user_id, cmd)?;
        }
        Some(Commands::Export(args)) => {
            handle_export_command(&storage, &user_id, args)?;
        }
        Some(Commands::History { limit }) => {
            handle_history_command(&storage, &user_id, limit)?;
        }
        Some(Commands::Init) => {
            println!("Initializing budget-tracker at: {}", paths.base_dir().display());
            paths.ensure_directories()?;
            settings.save(&paths)?;
            storage.save_all()?;
            println!("Initialization complete!");
            println!();
            println!("Next steps:");
            println!("  budget profile set --username <name> --income <amount>");
            println!("  budget expense add <amount> --category Shopping");
            println!("  budget report dashboard");
        }
        Some(Commands::Config) => {
            println!("budget-tracker Configuration");
            println!("============================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Audit log:        {}", paths.audit_log().display());
            println!("Initialized:      {}", paths.is_initialized());
            println!();
            println!("Settings:");
            println!("  Currency symbol:     {}", settings.currency_symbol);
            println!("  Date format:         {}", settings.date_format);
            println!("  Default user:        {}", settings.default_user);
            println!("  Trend window:        {} months", settings.trend_window_months);
            println!("  Recent transactions: {}", settings.recent_transactions_limit);
        }
        None => {
            println!("budget-tracker - personal budget tracking");
            println!();
            println!("Run 'budget --help' for usage information.");
            println!("Run 'budget report dashboard' to see where your money goes.");
        }
    }

    Ok(())
}
