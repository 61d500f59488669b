use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{filter::LevelFilter, prelude::*, EnvFilter};

use finance_tracker::cli::{
    handle_category_command, handle_summary_command, handle_transaction_command,
};
use finance_tracker::config::{paths::TrackerPaths, settings::Settings};
use finance_tracker::services::CategoryService;
use finance_tracker::storage::{initialize_storage, Storage};

#[derive(Parser)]
#[command(
    name = "fintrack",
    version,
    about = "Track income and expenses from the command line",
    long_about = "fintrack records income and expense transactions under \
                  categories and summarizes them: balance, totals, spending by \
                  category and the most recent activity."
)]
struct Cli {
    /// User to act as (defaults to the configured default user)
    #[arg(short, long, global = true, env = "FINTRACK_USER")]
    user: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show balance, totals, spending by category and recent transactions
    Summary {
        /// Also write the category breakdown to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Transaction management commands
    #[command(subcommand, alias = "txn")]
    Transaction(finance_tracker::cli::TransactionCommands),

    /// Category management commands
    #[command(subcommand)]
    Category(finance_tracker::cli::CategoryCommands),

    /// Initialize storage and create the default categories
    Init,

    /// Show current configuration and paths
    Config,
}

/// Log to stderr filtered by `RUST_LOG` (or the configured level), and at
/// debug level to the log file when it can be opened.
fn setup_logging(paths: &TrackerPaths, settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let stderr_log = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(filter);

    let file_log = paths
        .ensure_directories()
        .ok()
        .and_then(|_| {
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(paths.log_file())
                .ok()
        })
        .map(|file| {
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Arc::new(file))
                .with_filter(LevelFilter::DEBUG)
        });

    tracing_subscriber::registry()
        .with(stderr_log)
        .with(file_log)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = TrackerPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    setup_logging(&paths, &settings);

    let user_id = cli
        .user
        .clone()
        .unwrap_or_else(|| settings.default_user.clone());

    match cli.command {
        Some(Commands::Init) => {
            println!("Initializing fintrack at: {}", paths.base_dir().display());
            initialize_storage(&paths)?;

            let mut storage = Storage::new(paths.clone())?;
            storage.load_all()?;
            let created = CategoryService::new(&storage).create_defaults(&user_id)?;

            println!("Initialization complete!");
            if !created.is_empty() {
                println!();
                println!("Created {} default categories for '{}'.", created.len(), user_id);
                println!("Run 'fintrack category list' to see them.");
            }
        }
        Some(Commands::Config) => {
            println!("fintrack Configuration");
            println!("======================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Log file:         {}", paths.log_file().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Date format:     {}", settings.date_format);
            println!("  Default user:    {}", settings.default_user);
            println!("  Log level:       {}", settings.log_level);
            if !paths.is_initialized() {
                println!();
                println!("Not initialized yet. Run 'fintrack init'.");
            }
        }
        Some(command) => {
            let mut storage = Storage::new(paths.clone())?;
            storage.load_all()?;

            match command {
                Commands::Summary { csv } => {
                    handle_summary_command(&storage, &settings, &user_id, csv.as_deref())?;
                }
                Commands::Transaction(cmd) => {
                    handle_transaction_command(&storage, &settings, &user_id, cmd)?;
                }
                Commands::Category(cmd) => {
                    handle_category_command(&storage, &user_id, cmd)?;
                }
                Commands::Init | Commands::Config => {}
            }
        }
        None => {
            println!("fintrack - income and expense tracking");
            println!();
            println!("Run 'fintrack --help' for usage information.");
            println!("Run 'fintrack summary' for your current balance.");
        }
    }

    Ok(())
}
