use std::io::stderr;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use kassebog::cli::{
    handle_categories_command, handle_check_command, handle_months_command, handle_report_command,
    handle_top_command,
};
use kassebog::config::{CategoryRuleSet, KassebogPaths, Settings};

#[derive(Parser)]
#[command(
    name = "kassebog",
    version,
    about = "Transaction normalization and carry-over budget tracking",
    long_about = "Kassebog reads a bank's CSV transaction export, normalizes every \
                  row into a categorized, single-currency record, and reconciles \
                  monthly and weekly spending against a carry-over-aware budget. \
                  Nothing is persisted; every run recomputes from the export."
)]
struct Cli {
    /// Path to the transaction export (overrides the configured path)
    #[arg(short, long, global = true)]
    file: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Budget reconciliation for a month, with the weekly view
    Report(kassebog::cli::ReportArgs),

    /// Totals for the most recent months
    Months(kassebog::cli::MonthsArgs),

    /// Per-category expense breakdown for a month
    Categories(kassebog::cli::CategoriesArgs),

    /// Largest expenses of a month
    Top(kassebog::cli::TopArgs),

    /// Ingest diagnostics: column mapping, row counts, currencies
    Check,

    /// Write default settings and category rules to the config directory
    Init {
        /// Overwrite existing configuration files
        #[arg(long)]
        force: bool,
    },

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(match cli.verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        _ => LevelFilter::DEBUG,
    });

    let paths = KassebogPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    let rules = CategoryRuleSet::load_or_builtin(&paths)?;
    let file = cli.file.as_deref();

    match cli.command {
        Some(Commands::Report(args)) => {
            handle_report_command(&settings, &rules, file, args)?;
        }
        Some(Commands::Months(args)) => {
            handle_months_command(&settings, &rules, file, args)?;
        }
        Some(Commands::Categories(args)) => {
            handle_categories_command(&settings, &rules, file, args)?;
        }
        Some(Commands::Top(args)) => {
            handle_top_command(&settings, &rules, file, args)?;
        }
        Some(Commands::Check) => {
            handle_check_command(&settings, &rules, file)?;
        }
        Some(Commands::Init { force }) => {
            if paths.is_initialized() && !force {
                println!(
                    "Already initialized at {}. Use --force to overwrite.",
                    paths.base_dir().display()
                );
            } else {
                println!("Initializing kassebog at: {}", paths.base_dir().display());
                settings.save(&paths)?;
                rules.save(&paths)?;
                println!("Wrote config.json and rules.json ({} rules).", rules.len());
                println!();
                println!("Edit config.json to set your exchange rates and monthly limits,");
                println!("and rules.json to adjust merchant categorization.");
            }
        }
        Some(Commands::Config) => {
            println!("Kassebog Configuration");
            println!("======================");
            println!("Config directory: {}", paths.base_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Rules file:       {}", paths.rules_file().display());
            println!();
            println!("Settings:");
            println!("  Export path:        {}", settings.csv_path.display());
            println!("  Reporting currency: {}", settings.reporting_currency);
            println!("  Timezone:           {}", settings.timezone);
            println!("  Salary currency:    {}", settings.salary_currency);
            println!("  Cashback token:     {}", settings.cashback_token);
            println!("  Carry-over start:   {}", settings.carry_over_start);
            println!(
                "  Default limit:      {}",
                settings
                    .default_monthly_limit
                    .format_with_code(&settings.reporting_currency)
            );
            println!("  Category rules:     {}", rules.len());
        }
        None => {
            println!("Kassebog - transaction normalization and budget tracking");
            println!();
            println!("Run 'kassebog --help' for usage information.");
            println!("Run 'kassebog report' for this month's budget reconciliation.");
        }
    }

    Ok(())
}

fn setup_logging(level: LevelFilter) {
    // reports go to stdout, so diagnostics must not
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry().with(terminal_log).init();
}
