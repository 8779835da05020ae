use anyhow::Result;
use clap::{Parser, Subcommand};

use fintrack::cli::{handle_report_command, ReportArgs};
use fintrack::config::{FinTrackPaths, Settings};
use fintrack::logging::init_tracing;
use fintrack::storage::{initialize_storage, Storage};

#[derive(Parser)]
#[command(
    name = "fintrack",
    version,
    about = "Financial reporting and settlement for personal and shared spending",
    long_about = "FinTrack builds a consolidated financial report for one user and \
                  date range: spending by category, monthly trends, budget \
                  utilization and who owes whom for shared expenses."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the financial report
    Report(ReportArgs),

    /// Initialize the data directory and default settings
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = FinTrackPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    init_tracing(&settings.log_filter);

    match cli.command {
        Some(Commands::Report(args)) => {
            let mut storage = Storage::new(paths)?;
            storage.load_all()?;
            handle_report_command(&storage, &settings, args)?;
        }
        Some(Commands::Init) => {
            println!("Initializing FinTrack at: {}", paths.base_dir().display());
            let created = initialize_storage(&paths)?;
            settings.save(&paths)?;
            println!("Created {} data files in {}", created, paths.data_dir().display());
            println!("Initialization complete!");
        }
        Some(Commands::Config) => {
            println!("FinTrack Configuration");
            println!("======================");
            println!("Base directory:  {}", paths.base_dir().display());
            println!("Data directory:  {}", paths.data_dir().display());
            println!("Settings file:   {}", paths.settings_file().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:    {}", settings.currency_symbol);
            println!("  Date format:        {}", settings.date_format);
            println!(
                "  Default user:       {}",
                settings.default_user.as_deref().unwrap_or("(none)")
            );
            println!("  Split policy:       {:?}", settings.split_policy);
            println!("  Uncategorized label: {}", settings.uncategorized_label);
            println!("  Unknown category:   {}", settings.unknown_category_label);
            println!("  Log filter:         {}", settings.log_filter);
        }
        None => {
            println!("FinTrack - financial reporting and settlement");
            println!();
            println!("Run 'fintrack --help' for usage information.");
            println!("Run 'fintrack report --user <USER>' to build a report.");
        }
    }

    Ok(())
}
