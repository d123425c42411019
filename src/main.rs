use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use spendcast::cli::{
    handle_audit_command, handle_budget_command, handle_forecast_command,
    handle_subscription_command, handle_summary_command, handle_transaction_command,
    BudgetCommands, ForecastArgs, SubscriptionCommands, SummaryArgs, TransactionCommands,
};
use spendcast::config::paths::DATA_DIR_ENV;
use spendcast::config::{Settings, SpendcastPaths};
use spendcast::logging::init_tracing;
use spendcast::storage::Storage;

#[derive(Parser)]
#[command(
    name = "spendcast",
    author = "Kaylee Beyene",
    version,
    about = "Budget cycles and month-end spend forecasting",
    long_about = "spendcast tracks income and expenses against recurring or one-off \
                  budget periods, reports what is left in the current cycle, and \
                  projects where this month's spending will end up."
)]
struct Cli {
    /// Directory holding config and data files
    #[arg(long, global = true, env = DATA_DIR_ENV)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Budget period commands
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Transaction commands
    #[command(subcommand, alias = "txn")]
    Transaction(TransactionCommands),

    /// Project this month's total spend
    Forecast(ForecastArgs),

    /// Income, expense and balance totals with recent transactions
    Summary(SummaryArgs),

    /// Subscription commands
    #[command(subcommand, alias = "sub")]
    Subscription(SubscriptionCommands),

    /// Show recent changes from the audit log
    Audit {
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = match cli.data_dir {
        Some(dir) => SpendcastPaths::with_base_dir(dir),
        None => SpendcastPaths::new()?,
    };
    let settings = Settings::load_or_create(&paths)?;
    init_tracing(&settings.log_filter);

    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Budget(cmd)) => handle_budget_command(&storage, &settings, cmd)?,
        Some(Commands::Transaction(cmd)) => handle_transaction_command(&storage, &settings, cmd)?,
        Some(Commands::Forecast(args)) => handle_forecast_command(&storage, &settings, args)?,
        Some(Commands::Summary(args)) => handle_summary_command(&storage, &settings, args)?,
        Some(Commands::Subscription(cmd)) => {
            handle_subscription_command(&storage, &settings, cmd)?
        }
        Some(Commands::Audit { limit }) => handle_audit_command(&storage, limit)?,
        Some(Commands::Config) => {
            if !paths.is_initialized() {
                settings.save(&paths)?;
            }
            println!("spendcast configuration");
            println!("=======================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Data directory: {}", paths.data_dir().display());
            println!("Audit log:      {}", paths.audit_log().display());
            println!();
            println!("Settings ({}):", paths.settings_file().display());
            println!("  Currency symbol:     {}", settings.currency_symbol);
            println!("  Date format:         {}", settings.date_format);
            println!("  Preview window days: {}", settings.preview_window_days);
            println!("  Log filter:          {}", settings.log_filter);
        }
        None => {
            println!("spendcast - budget cycles and spend forecasting");
            println!();
            println!("Run 'spendcast --help' for usage information.");
        }
    }

    Ok(())
}
