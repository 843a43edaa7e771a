use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod bootstrap;
mod commands;

#[derive(Parser)]
#[command(name = "devlog", version)]
#[command(about = "devlog - session journal with generated introductions and conclusions", long_about = None)]
struct Cli {
    /// Project root holding the reports directory and credential file
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    /// Configuration file (defaults to <root>/devlog.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the next session and write its introduction
    Start {
        /// Commit message describing what this session is about
        message: String,
    },
    /// Close the open session and write its conclusion
    End {
        /// Commit message summarising the session
        message: String,
    },
    /// Show the ledger state
    Status,
    /// Write a narrative report from a unified diff
    Digest {
        /// Commit message that goes with the diff
        message: String,

        /// Unified diff to read
        #[arg(long, default_value = "difference.txt")]
        diff: PathBuf,
    },
    /// Write a default devlog.toml and create the reports directory
    Init,
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "devlog=debug" } else { "devlog=info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Init => commands::init::run(&cli.root, config_path)?,
        Commands::Status => {
            let app = bootstrap::App::load(&cli.root, config_path)?;
            commands::status::run(&app).await?
        }
        Commands::Start { message } => {
            let app = bootstrap::App::load(&cli.root, config_path)?;
            commands::start::run(&app, &message).await?
        }
        Commands::End { message } => {
            let app = bootstrap::App::load(&cli.root, config_path)?;
            commands::end::run(&app, &message).await?
        }
        Commands::Digest { message, diff } => {
            let app = bootstrap::App::load(&cli.root, config_path)?;
            commands::digest::run(&app, &message, &diff).await?
        }
    }

    Ok(())
}
