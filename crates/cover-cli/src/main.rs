#![forbid(unsafe_code)]

mod cmd;
mod notify;
mod output;

use clap::{Parser, Subcommand};
use cover_core::config::Config;
use output::OutputMode;
use std::env;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "cover: warranty tracker",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Override the database path (skips config resolution).
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Derive the output mode from flags.
    fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Collection",
        about = "Record a new warranty",
        long_about = "Record a new warranty with an explicit expiration date or a duration in months.",
        after_help = "EXAMPLES:\n    # Expiration from a duration\n    cvr add --name \"Laptop\" --purchased 2024-01-15 --months 24\n\n    # Explicit expiration date\n    cvr add --name \"Fridge\" --purchased 2024-01-15 --expires 2026-01-15\n\n    # Emit machine-readable output\n    cvr add --name \"Laptop\" --purchased 2024-01-15 --months 24 --json"
    )]
    Add(cmd::add::AddArgs),

    #[command(
        next_help_heading = "Read",
        about = "List warranties",
        long_about = "List warranties sorted by days remaining, with optional status filter and search.",
        after_help = "EXAMPLES:\n    # All warranties\n    cvr list\n\n    # Only ones expiring soon\n    cvr list --filter expiring-soon\n\n    # Search by name, category, or store\n    cvr list --query laptop\n\n    # Emit machine-readable output\n    cvr list --json"
    )]
    List(cmd::list::ListArgs),

    #[command(
        next_help_heading = "Read",
        about = "Show one warranty",
        long_about = "Show full details for a single warranty by id.",
        after_help = "EXAMPLES:\n    # Show a warranty\n    cvr show 3\n\n    # Emit machine-readable output\n    cvr show 3 --json"
    )]
    Show(cmd::show::ShowArgs),

    #[command(
        next_help_heading = "Collection",
        about = "Edit an existing warranty",
        long_about = "Edit fields of an existing warranty. Unspecified fields keep their values.",
        after_help = "EXAMPLES:\n    # Fix the price\n    cvr update 3 --price 199.99\n\n    # Extend the warranty\n    cvr update 3 --months 36"
    )]
    Update(cmd::update::UpdateArgs),

    #[command(
        next_help_heading = "Collection",
        about = "Delete a warranty",
        after_help = "EXAMPLES:\n    # Delete by id\n    cvr rm 3"
    )]
    Rm(cmd::delete::DeleteArgs),

    #[command(
        next_help_heading = "Collection",
        about = "Delete all warranties",
        after_help = "EXAMPLES:\n    # Wipe the collection\n    cvr clear --yes"
    )]
    Clear(cmd::clear::ClearArgs),

    #[command(
        next_help_heading = "Reminders",
        about = "Toggle reminders for a warranty",
        long_about = "Turn expiration reminders on or off for one warranty.",
        after_help = "EXAMPLES:\n    # Enable (the default)\n    cvr remind 3 --on\n\n    # Disable\n    cvr remind 3 --off"
    )]
    Remind(cmd::remind::RemindArgs),

    #[command(
        next_help_heading = "Reminders",
        about = "Run the reminder check now",
        long_about = "Check every reminder-enabled warranty against the notification thresholds.",
        after_help = "EXAMPLES:\n    # Check now\n    cvr check\n\n    # When is the next scheduled daily check?\n    cvr check --next\n\n    # Emit machine-readable output\n    cvr check --json"
    )]
    Check(cmd::check::CheckArgs),

    #[command(
        next_help_heading = "Backup",
        about = "Export the collection as JSON",
        long_about = "Export every warranty as a JSON backup document.",
        after_help = "EXAMPLES:\n    # To stdout\n    cvr export\n\n    # To a file\n    cvr export --output backup.json"
    )]
    Export(cmd::export::ExportArgs),

    #[command(
        next_help_heading = "Backup",
        about = "Import warranties from a backup",
        long_about = "Import warranties from a JSON backup, merging with or replacing the collection.",
        after_help = "EXAMPLES:\n    # Merge into the existing collection\n    cvr import backup.json\n\n    # Replace the collection\n    cvr import backup.json --replace"
    )]
    Import(cmd::import::ImportArgs),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("COVER_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if env::var("DEBUG").is_ok() {
            "cover=debug,info"
        } else {
            "cover=info,warn"
        })
    });

    let format = env::var("COVER_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry.with(fmt::layer().json().with_ansi(false)).init();
        }
        _ => {
            registry.with(fmt::layer().compact()).init();
        }
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let config = Config::load()?;
    let db_path = config.db_path(cli.db.as_deref());
    let output = cli.output_mode();

    match cli.command {
        Commands::Add(ref args) => cmd::add::run_add(args, output, &config, &db_path),
        Commands::List(ref args) => cmd::list::run_list(args, output, &config, &db_path),
        Commands::Show(ref args) => cmd::show::run_show(args, output, &config, &db_path),
        Commands::Update(ref args) => cmd::update::run_update(args, output, &config, &db_path),
        Commands::Rm(ref args) => cmd::delete::run_delete(args, output, &db_path),
        Commands::Clear(ref args) => cmd::clear::run_clear(args, output, &db_path),
        Commands::Remind(ref args) => cmd::remind::run_remind(args, output, &config, &db_path),
        Commands::Check(ref args) => cmd::check::run_check_cmd(args, output, &config, &db_path),
        Commands::Export(ref args) => cmd::export::run_export(args, output, &db_path),
        Commands::Import(ref args) => cmd::import::run_import(args, output, &config, &db_path),
    }
}
