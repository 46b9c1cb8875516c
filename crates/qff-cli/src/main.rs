//! Quantum Friend Finder command-line interface.
//!
//! ```text
//!   qff search Friend_5            find a friend with Grover's algorithm
//!   qff friends --limit 10         list the directory
//!   qff serve                      start the web dashboard
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{friends, search, serve, version};

/// Find a friend's phone number among 1024 entries with Grover's search
#[derive(Parser)]
#[command(name = "qff")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file (YAML)
    #[arg(short, long, global = true, env = "QFF_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search for a friend
    Search {
        /// Friend name, e.g. Friend_5
        name: String,

        /// Seed for phone numbers and sampling
        #[arg(long)]
        seed: Option<u64>,

        /// Number of shots
        #[arg(short, long)]
        shots: Option<u32>,

        /// Write the top-10 histogram PNG here (file or directory)
        #[arg(long)]
        histogram: Option<PathBuf>,

        /// Print the circuit diagram
        #[arg(long)]
        show_circuit: bool,

        /// Fold width of the circuit diagram (0 disables folding)
        #[arg(long, default_value = "150")]
        fold: usize,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// List friends and their phone numbers
    Friends {
        /// Show at most this many entries
        #[arg(short, long)]
        limit: Option<usize>,

        /// Seed for phone numbers
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Start the web dashboard
    Serve {
        /// Bind address (e.g., 127.0.0.1:8501)
        #[arg(short, long)]
        bind: Option<String>,
    },

    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    let result = match cli.command {
        Commands::Search {
            name,
            seed,
            shots,
            histogram,
            show_circuit,
            fold,
            json,
        } => {
            let args = search::SearchArgs {
                name,
                seed,
                shots,
                histogram,
                show_circuit,
                fold,
                json,
            };
            search::execute(cli.config.as_deref(), args).await
        }

        Commands::Friends { limit, seed } => friends::execute(cli.config.as_deref(), limit, seed),

        Commands::Serve { bind } => serve::execute(cli.config.as_deref(), bind).await,

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
