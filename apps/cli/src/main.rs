//! Luver CLI - keeps a local `.lu` model and its LUIS application in step.
//!
//! This CLI provides a `luver` command that imports, trains and publishes a
//! new application version when the local model changes, and exports the
//! remote version back to a `.lu` file.

mod commands;
mod config;
mod progress;

use clap::{CommandFactory, Parser, Subcommand};
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{export, update, ExportArgs, UpdateArgs};

/// Luver CLI - LUIS version synchronization
///
/// Tags the local model by content, imports it as a new version only when it
/// changed, waits for training to converge and optionally publishes.
#[derive(Parser, Debug)]
#[command(
    name = "luver",
    author,
    version,
    about = "Luver - LUIS model version synchronization",
    long_about = "Luver keeps a local .lu model and its LUIS application in step.\nUnchanged models reuse the same remote version, so repeated runs do not create duplicates."
)]
struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn", global = true)]
    log_level: String,

    /// Verbose output (same as --log-level debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Update the application from the supporting .lu file
    ///
    /// Imports the model as a new version when it changed since the last run,
    /// trains it until the service reports convergence, and publishes it when
    /// --publish is given.
    Update(UpdateArgs),

    /// Export a version of the application to a .lu file
    ///
    /// Exports the latest version (or --version-id) and converts it back to
    /// the local text format.
    Export(ExportArgs),
}

fn log_level(args: &Args) -> Level {
    if args.verbose {
        return Level::DEBUG;
    }
    match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "error" => Level::ERROR,
        _ => Level::WARN,
    }
}

/// `Error: <message: cause: ...>` with the label in red.
fn render_error(err: &anyhow::Error) -> String {
    format!("{} {err:#}", "Error:".red().bold())
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Args::parse();

    if let Err(err) = run(args).await {
        eprintln!("{}", render_error(&err));
        std::process::exit(1);
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level(&args))
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // If no command provided, show help
    let Some(command) = args.command else {
        Args::command().print_help()?;
        return Ok(());
    };

    match command {
        Command::Update(cmd) => update::execute(cmd).await?,
        Command::Export(cmd) => export::execute(cmd).await?,
    }

    Ok(())
}
