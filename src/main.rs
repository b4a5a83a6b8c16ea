use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use fintrack::cli::{
    handle_budget_command, handle_category_command, handle_goal_command, handle_report_command,
    handle_transaction_command,
};
use fintrack::config::{paths::FintrackPaths, settings::Settings};
use fintrack::storage::init::{initialize_storage, needs_initialization};
use fintrack::storage::Storage;

#[derive(Parser)]
#[command(
    name = "fintrack",
    version,
    about = "Personal finance tracker",
    long_about = "fintrack records income and expenses, organizes them into categories, \
                  tracks monthly budgets and savings goals, and summarizes everything \
                  in a monthly dashboard."
)]
struct Cli {
    /// Enable debug logging (RUST_LOG overrides this)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Category management commands
    #[command(subcommand, alias = "cat")]
    Category(fintrack::cli::CategoryCommands),

    /// Transaction management commands
    #[command(subcommand, alias = "txn")]
    Transaction(fintrack::cli::TransactionCommands),

    /// Budget management commands
    #[command(subcommand)]
    Budget(fintrack::cli::BudgetCommands),

    /// Savings goal commands
    #[command(subcommand)]
    Goal(fintrack::cli::GoalCommands),

    /// Dashboard, budget and trend reports
    #[command(subcommand)]
    Report(fintrack::cli::ReportCommands),

    /// Initialize the data directory with default categories
    Init,

    /// Show current configuration and paths
    Config,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

/// Load settings and every repository; first use creates the profile and
/// default categories
fn open_storage(paths: FintrackPaths) -> Result<(Settings, Storage)> {
    let settings = initialize_storage(&paths)?;
    let mut storage = Storage::new(paths, settings.user_id)?;
    storage.load_all()?;
    Ok((settings, storage))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let paths = FintrackPaths::new()?;

    let command = match cli.command {
        Some(command) => command,
        None => {
            println!("fintrack - personal finance tracker");
            println!();
            println!("Run 'fintrack init' to set up your data directory.");
            println!("Run 'fintrack --help' for usage information.");
            return Ok(());
        }
    };

    match command {
        Commands::Init => {
            let fresh = needs_initialization(&paths);
            let settings = initialize_storage(&paths)?;

            if fresh {
                println!("Initialized fintrack at: {}", paths.base_dir().display());
                println!();
                println!("Default categories have been created:");
                println!("  Income:  Salary, Freelance");
                println!(
                    "  Expense: Housing, Groceries, Transportation, Dining Out, Health, \
                     Entertainment"
                );
                println!();
                println!("Run 'fintrack category list' to see all categories.");
            } else {
                println!("fintrack is already initialized at: {}", paths.base_dir().display());
            }
            tracing::debug!(user = %settings.user_id, "profile ready");
        }

        Commands::Config => {
            let settings = Settings::load_or_create(&paths)?;
            println!("fintrack Configuration");
            println!("======================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Initialized:      {}", paths.is_initialized());
            println!();
            println!("Settings:");
            println!("  Currency symbol:      {}", settings.currency_symbol);
            println!("  Date format:          {}", settings.date_format);
            println!("  Recent transactions:  {}", settings.recent_transactions_limit);
            println!("  Trend months:         {}", settings.trend_months);
            println!("  Budget warning at:    {}%", settings.budget_warning_percent);
        }

        Commands::Category(cmd) => {
            let (_, storage) = open_storage(paths)?;
            handle_category_command(&storage, cmd)?;
        }
        Commands::Transaction(cmd) => {
            let (settings, storage) = open_storage(paths)?;
            handle_transaction_command(&storage, &settings, cmd)?;
        }
        Commands::Budget(cmd) => {
            let (settings, storage) = open_storage(paths)?;
            handle_budget_command(&storage, &settings, cmd)?;
        }
        Commands::Goal(cmd) => {
            let (settings, storage) = open_storage(paths)?;
            handle_goal_command(&storage, &settings, cmd)?;
        }
        Commands::Report(cmd) => {
            let (settings, storage) = open_storage(paths)?;
            handle_report_command(&storage, &settings, cmd)?;
        }
    }

    Ok(())
}
