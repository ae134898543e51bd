mod commands;
mod config;
mod ledger;

use clap::{Parser, Subcommand};
use config::CliConfig;
use gameshow_betting::{BettingError, ErrorKind};
use gameshow_core::CoreError;
use ledger::Ledger;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "gameshow")]
#[command(about = "Game-show betting ledger: games, bets, payouts and the NGS token")]
#[command(version)]
struct Cli {
    /// Data directory for ledger storage
    #[arg(short, long, global = true)]
    data_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Deploy the token and betting contracts owned by an account
    Deploy {
        /// Owner account name (created if missing) or 0x address
        owner: String,
        /// Replace an existing deployment
        #[arg(short, long)]
        force: bool,
    },
    /// Print the deployed contract addresses as JSON
    Addresses,

    /// Account management commands
    #[command(subcommand)]
    Account(commands::AccountCommands),

    /// Game lifecycle commands
    #[command(subcommand)]
    Game(commands::GameCommands),

    /// Betting commands
    #[command(subcommand)]
    Bet(commands::BetCommands),

    /// NGS token commands
    #[command(subcommand)]
    Token(commands::TokenCommands),

    /// Show recorded contract events
    Events {
        /// Only events of this contract (betting, token)
        #[arg(short, long)]
        contract: Option<String>,
        /// Number of most recent events to show
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Wipe all ledger state
    Reset {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let data_dir = cli.data_dir.unwrap_or_else(config::default_data_dir);

    // Ensure data directory exists
    tokio::fs::create_dir_all(&data_dir).await?;

    let config = CliConfig::load(&data_dir)?;

    // Initialize logging
    let log_level = if cli.verbose || config.verbose {
        "debug"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(format!(
            "gameshow={},gameshow_core={},gameshow_betting={}",
            log_level, log_level, log_level
        )))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut ledger = Ledger::open(config).await?;

    // Execute command
    let result = match cli.command {
        Commands::Deploy { owner, force } => {
            commands::handle_deploy(&mut ledger, &owner, force).await
        }
        Commands::Addresses => commands::handle_addresses(&ledger).await,
        Commands::Account(cmd) => commands::handle_account_command(cmd, &mut ledger).await,
        Commands::Game(cmd) => commands::handle_game_command(cmd, &mut ledger).await,
        Commands::Bet(cmd) => commands::handle_bet_command(cmd, &mut ledger).await,
        Commands::Token(cmd) => commands::handle_token_command(cmd, &mut ledger).await,
        Commands::Events { contract, limit } => {
            commands::handle_events_command(&ledger, contract, limit).await
        }
        Commands::Reset { force } => commands::handle_reset(&mut ledger, force).await,
    };

    if let Err(e) = result {
        report_error(&e);
        std::process::exit(1);
    }

    Ok(())
}

fn report_error(error: &anyhow::Error) {
    if let Some(err) = error.downcast_ref::<BettingError>() {
        tracing::warn!("Rejected call: {:?}", err.kind());
        match err {
            BettingError::InsufficientFunds { need, available } => {
                eprintln!("Error: Insufficient funds");
                eprintln!("Need: {} wei, Available: {} wei", need, available);
            }
            _ if err.kind() == ErrorKind::InvalidState => {
                eprintln!("Error: {}", err);
                eprintln!("Use 'gameshow game show <id>' to check the game's state");
            }
            _ if err.kind() == ErrorKind::Unauthorized => {
                eprintln!("Error: {}", err);
                eprintln!("Only the deploying account can manage games");
            }
            _ => eprintln!("Error: {}", err),
        }
        return;
    }

    match error.downcast_ref::<CoreError>() {
        Some(CoreError::InsufficientFunds { need, available }) => {
            eprintln!("Error: Insufficient funds");
            eprintln!("Need: {}, Available: {}", need, available);
        }
        Some(CoreError::InvalidAddress(addr)) => {
            eprintln!("Error: Invalid address: {}", addr);
        }
        _ => eprintln!("Error: {:#}", error),
    }
}
