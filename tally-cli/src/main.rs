//! Tally CLI - Income and expense totals in your terminal

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::{add, color, goal, import, list, months, remove, summary};

/// Environment variable holding the log filter (e.g. `tally_core=debug`)
const LOG_ENV: &str = "TALLY_LOG";

/// Tally - income and expense totals in your terminal
#[derive(Parser)]
#[command(name = "tally", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show totals, balance and category breakdowns
    ///
    /// Reads a JSON array of records from stdin when one is piped in,
    /// otherwise summarizes the stored records.
    Summary {
        /// Restrict to one month (YYYY-MM)
        #[arg(long)]
        period: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List stored records
    List {
        /// Only records of this type (income, expense, receita, despesa, ...)
        #[arg(long = "type")]
        kind: Option<String>,
        /// Restrict to one month (YYYY-MM)
        #[arg(long)]
        period: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Add a record
    Add {
        /// Transaction type (income/receita or expense/despesa)
        kind: String,
        /// Amount, e.g. 1500, "1.000,50" or "R$ 300,00"
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Category label
        #[arg(long, short)]
        category: Option<String>,
        /// Free-form description
        #[arg(long, short)]
        description: Option<String>,
        /// Date (YYYY-MM-DD or DD/MM/YYYY)
        #[arg(long)]
        date: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Remove a record by ID
    Remove {
        /// Record ID
        id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Import records from CSV
    Import {
        /// Path to CSV file
        file: Option<PathBuf>,
        /// Preview without importing
        #[arg(long)]
        preview: bool,
        /// Use saved import profile
        #[arg(long)]
        profile: Option<String>,
        /// Save settings as profile
        #[arg(long)]
        save_profile: Option<String>,
        /// List saved profiles
        #[arg(long)]
        list_profiles: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
        /// Column name for transaction type
        #[arg(long)]
        type_column: Option<String>,
        /// Column name for amount
        #[arg(long)]
        amount_column: Option<String>,
        /// Column name for category
        #[arg(long)]
        category_column: Option<String>,
        /// Column name for date
        #[arg(long)]
        date_column: Option<String>,
        /// Column name for description
        #[arg(long)]
        description_column: Option<String>,
        /// Type for rows without one (e.g. expense for card statements)
        #[arg(long)]
        default_type: Option<String>,
        /// Category for rows without one
        #[arg(long)]
        default_category: Option<String>,
    },

    /// Show income, expenses and balance per month
    Months {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the color descriptor for a type label
    Color {
        /// Type label
        kind: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show progress toward a savings goal
    Goal {
        /// Goal name
        name: String,
        /// Target amount
        target: String,
        /// Amount saved so far (defaults to the current balance)
        #[arg(long)]
        saved: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();

    let result = run(cli);

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Summary { period, json } => summary::run(period.as_deref(), json),
        Commands::List { kind, period, json } => list::run(kind, period, json),
        Commands::Add { kind, amount, category, description, date, json } => {
            add::run(kind, amount, category, description, date, json)
        }
        Commands::Remove { id, json } => remove::run(&id, json),
        Commands::Import { file, preview, profile, save_profile, list_profiles, json,
                           type_column, amount_column, category_column, date_column,
                           description_column, default_type, default_category } => {
            import::run(import::ImportArgs {
                file,
                preview,
                profile,
                save_profile,
                list_profiles,
                json,
                type_column,
                amount_column,
                category_column,
                date_column,
                description_column,
                default_type,
                default_category,
            })
        }
        Commands::Months { json } => months::run(json),
        Commands::Color { kind, json } => color::run(&kind, json),
        Commands::Goal { name, target, saved, json } => goal::run(&name, &target, saved.as_deref(), json),
    }
}
