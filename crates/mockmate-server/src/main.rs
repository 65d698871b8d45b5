//! mockmate — AI interview coaching service.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use mockmate_server::commands;

#[derive(Parser)]
#[command(name = "mockmate", version, about = "AI interview coaching service")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API server
    Serve {
        /// Config file path (default: mockmate.toml)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Listen port override
        #[arg(long)]
        port: Option<u16>,

        /// Question bank file override
        #[arg(long)]
        bank: Option<PathBuf>,

        /// Session store file override
        #[arg(long)]
        sessions: Option<PathBuf>,
    },

    /// Validate the question bank file
    ValidateBank {
        /// Question bank file (default: from config)
        #[arg(long)]
        bank: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create starter config and sample question bank
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("mockmate=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve {
            config,
            port,
            bank,
            sessions,
        } => commands::serve::execute(config, port, bank, sessions).await,
        Commands::ValidateBank { bank, config } => commands::validate_bank::execute(bank, config),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
