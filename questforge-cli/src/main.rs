use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

use config::ConfigLoader;

#[derive(Parser)]
#[command(name = "questforge", about = "Roles, permissions and task reviews for QuestForge")]
#[command(version, propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List roles
    Roles,
    /// Show the capability table
    Permissions(commands::permissions::PermissionsArgs),
    /// Show the navigation menu a role sees
    Nav(commands::nav::NavArgs),
    /// Check an ownership-aware permission
    Check(commands::check::CheckArgs),
    /// Manage the signed-in session
    Session(commands::session::SessionArgs),
    /// Run task workflow actions against a task file
    Task(commands::task::TaskArgs),
    /// Manage configuration
    Config(commands::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Roles => commands::roles::run(),
        Commands::Permissions(args) => commands::permissions::run(args),
        Commands::Nav(args) => commands::nav::run(args),
        Commands::Check(args) => commands::check::run(args),
        Commands::Session(args) => commands::session::run(args, &ConfigLoader::load()?).await,
        Commands::Task(args) => commands::task::run(args, &ConfigLoader::load()?).await,
        Commands::Config(args) => commands::config::run(args),
    }
}
