use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use fable::commands;
use fable::config;
use fable::form::FormContext;
use fable::schema;
use fable::store::FileSnapshotStore;
use fable::themes;
use fable::tui;

// Default Configuration Constants
/// Default log level when not specified
const DEFAULT_LOG_LEVEL: &str = "info";

/// Default log file path (no logging to file)
const DEFAULT_LOG_FILE: &str = "/dev/null";

#[derive(Parser)]
#[command(name = "fable")]
#[command(
    about = "Schema-driven adventure settings editor",
    long_about = "Schema-driven adventure settings editor\n\nIf no command is specified, the program opens the interactive editor for the given schema."
)]
struct Cli {
    /// Set log level (trace, debug, info, warn, error)
    #[arg(short = 'L', long, global = true, default_value = DEFAULT_LOG_LEVEL)]
    log_level: String,

    /// Log file path (default: /dev/null for no logging)
    #[arg(short = 'F', long, global = true, default_value = DEFAULT_LOG_FILE)]
    log_file: String,

    /// Schema JSON file describing the form
    #[arg(short, long)]
    schema: Option<PathBuf>,

    /// Snapshot file to edit (default: <schema>.values.json)
    #[arg(short = 'n', long)]
    snapshot: Option<PathBuf>,

    /// Adventure identifier, used in share links on gated fields
    #[arg(long, default_value = "")]
    adventure_id: String,

    /// Treat the user as approved for gated fields
    #[arg(long)]
    approved: bool,

    /// Extra image-theme options file (JSON array of {value, label})
    #[arg(long)]
    themes: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a schema file, and optionally a snapshot against it
    Validate {
        /// Schema JSON file
        schema: PathBuf,

        /// Snapshot file to validate against the schema
        #[arg(short = 'n', long)]
        snapshot: Option<PathBuf>,

        /// Fail on invalid numeric values instead of accepting them
        #[arg(long)]
        strict: bool,
    },
    /// Print a schema file as an indented outline
    Schema {
        /// Schema JSON file
        schema: PathBuf,
    },
    /// Display current configuration
    Config,
}

fn init_logging(log_level: &str, log_file: &str) {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
    {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Failed to open log file {}: {}", log_file, e);
            return;
        }
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Handle the config command - display current configuration
fn handle_config_command() {
    let cfg = config::read();

    let (path_str, exists) = match config::get_config_path() {
        Some(path) => {
            let exists = path.exists();
            (path.display().to_string(), exists)
        }
        None => ("Unable to determine config path".to_string(), false),
    };

    println!(
        "Configuration File: {} (Exists: {})",
        path_str,
        if exists { "yes" } else { "no" }
    );
    println!();
    println!("Current Configuration:");
    println!("=====================");
    println!("log_level: {}", cfg.log_level);
    println!("log_file: {}", cfg.log_file);
    println!("autosave: {}", cfg.autosave);
    println!("numeric_policy: {:?}", cfg.numeric_policy);
    println!("share_base_url: {}", cfg.share_base_url);
    println!();
    println!("[theme]");
    println!("selection_fg: {:?}", cfg.theme.selection_fg);
    println!("gate_fg: {:?}", cfg.theme.gate_fg);
    println!("invalid_fg: {:?}", cfg.theme.invalid_fg);
}

/// Resolve log configuration from CLI args and config file
/// CLI arguments take precedence over config file
fn resolve_log_config<'a>(cli: &'a Cli, config: &'a config::Config) -> (&'a str, &'a str) {
    let log_level = if cli.log_level != DEFAULT_LOG_LEVEL {
        cli.log_level.as_str()
    } else {
        config.log_level.as_str()
    };

    let log_file = if cli.log_file != DEFAULT_LOG_FILE {
        cli.log_file.as_str()
    } else {
        config.log_file.as_str()
    };

    (log_level, log_file)
}

/// Run the interactive editor for the schema named on the command line.
async fn run_editor(cli: &Cli, config: config::Config) -> anyhow::Result<()> {
    let Some(schema_path) = &cli.schema else {
        anyhow::bail!("no schema given; pass --schema <file> or a subcommand (--help for usage)");
    };
    let settings = schema::load(schema_path)?;

    let snapshot_path = cli
        .snapshot
        .clone()
        .unwrap_or_else(|| schema_path.with_extension("values.json"));
    let store = Arc::new(FileSnapshotStore::new(snapshot_path));

    let dynamic_themes = match &cli.themes {
        Some(path) => themes::load(path)?,
        None => themes::builtin_themes(),
    };
    let ctx = FormContext {
        dynamic_themes,
        user_approved: cli.approved,
        adventure_id: cli.adventure_id.clone(),
        share_base_url: config.share_base_url.clone(),
    };

    tui::run(settings, store, ctx, config).await
}

#[tokio::main]
async fn main() {
    let config = config::read();
    let cli = Cli::parse();

    // Resolve and initialize logging
    let (log_level, log_file) = resolve_log_config(&cli, &config);
    if log_file != DEFAULT_LOG_FILE {
        init_logging(log_level, log_file);
    }

    let result = match &cli.command {
        None => run_editor(&cli, config).await,
        Some(Commands::Config) => {
            handle_config_command();
            return;
        }
        Some(Commands::Validate {
            schema,
            snapshot,
            strict,
        }) => commands::validate::run(schema, snapshot.clone(), *strict).await,
        Some(Commands::Schema { schema }) => commands::schema::run(schema),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        tracing::error!("Command failed: {:#}", e);
        std::process::exit(1);
    }
}
