use crate::ledger::Ledger;
use anyhow::Result;
use clap::Subcommand;
use comfy_table::{presets::UTF8_FULL, Table};
use gameshow_betting::{GameId, OptionId};

#[derive(Subcommand)]
pub enum GameCommands {
    /// Create a new game (owner only)
    Create {
        /// Calling account
        caller: String,
        /// Game description
        description: String,
    },
    /// Add a bet option to an open game (owner only)
    AddOption {
        /// Calling account
        caller: String,
        /// Game ID
        game_id: GameId,
        /// Option description
        description: String,
    },
    /// Remove a bet option nobody has bet on (owner only)
    RemoveOption {
        /// Calling account
        caller: String,
        /// Game ID
        game_id: GameId,
        /// Option ID
        option_id: OptionId,
    },
    /// Close betting on a game (owner only)
    Close {
        /// Calling account
        caller: String,
        /// Game ID
        game_id: GameId,
    },
    /// Declare the winning option of a closed game (owner only)
    Declare {
        /// Calling account
        caller: String,
        /// Game ID
        game_id: GameId,
        /// Winning option ID
        option_id: OptionId,
    },
    /// Pay the pool out to the winning bettors (owner only)
    Distribute {
        /// Calling account
        caller: String,
        /// Game ID
        game_id: GameId,
    },
    /// Show a game's details
    Show {
        /// Game ID
        game_id: GameId,
    },
    /// List the bet options of a game
    Options {
        /// Game ID
        game_id: GameId,
    },
    /// List all games
    List,
}

pub async fn handle_game_command(cmd: GameCommands, ledger: &mut Ledger) -> Result<()> {
    match cmd {
        GameCommands::Create {
            caller,
            description,
        } => {
            let caller = ledger.resolve(&caller)?;
            let game_id = ledger
                .deployment_mut()?
                .registry
                .create_game(&caller, &description)?;
            ledger.commit().await?;

            println!("Created game {}: {}", game_id, description.trim());
            println!("Add options with: gameshow game add-option <caller> {} <description>", game_id);
        }

        GameCommands::AddOption {
            caller,
            game_id,
            description,
        } => {
            let caller = ledger.resolve(&caller)?;
            let option_id = ledger
                .deployment_mut()?
                .registry
                .add_game_bet_option(&caller, game_id, &description)?;
            ledger.commit().await?;

            println!("Added option {} to game {}: {}", option_id, game_id, description.trim());
        }

        GameCommands::RemoveOption {
            caller,
            game_id,
            option_id,
        } => {
            let caller = ledger.resolve(&caller)?;
            ledger
                .deployment_mut()?
                .registry
                .remove_game_bet_option(&caller, game_id, option_id)?;
            ledger.commit().await?;

            println!("Removed option {} from game {}", option_id, game_id);
        }

        GameCommands::Close { caller, game_id } => {
            let caller = ledger.resolve(&caller)?;
            let registry = &mut ledger.deployment_mut()?.registry;
            registry.close_game(&caller, game_id)?;
            let total = registry.games(game_id)?.total_bet_amount;
            ledger.commit().await?;

            println!("Game {} closed with {} staked", game_id, total);
        }

        GameCommands::Declare {
            caller,
            game_id,
            option_id,
        } => {
            let caller = ledger.resolve(&caller)?;
            ledger
                .deployment_mut()?
                .registry
                .declare_winners(&caller, game_id, option_id)?;
            ledger.commit().await?;

            println!("Game {}: option {} declared the winner", game_id, option_id);
        }

        GameCommands::Distribute { caller, game_id } => {
            let caller = ledger.resolve(&caller)?;
            let deployment = ledger.deployment_mut()?;
            let payouts = deployment.registry.distribute_winnings(
                &mut deployment.balances,
                &caller,
                game_id,
            )?;
            ledger.commit().await?;

            if payouts.is_empty() {
                println!("Game {} paid out: no bets were placed", game_id);
                return Ok(());
            }

            let mut table = Table::new();
            table.load_preset(UTF8_FULL);
            table.set_header(vec!["Bettor", "Bet", "Payout"]);
            for payout in &payouts {
                table.add_row(vec![
                    ledger.label(&payout.bettor),
                    payout.bet_id.to_string(),
                    payout.amount.to_string(),
                ]);
            }

            println!("Game {} paid out:", game_id);
            println!("{}", table);
        }

        GameCommands::Show { game_id } => {
            let registry = &ledger.deployment()?.registry;
            let info = registry.games(game_id)?;

            println!("Game {}:", info.id);
            println!("  Description: {}", info.description);
            println!("  State: {} ({})", info.state, info.state.code());
            println!("  Total staked: {}", info.total_bet_amount);
            match info.winning_option_id {
                Some(option_id) => println!("  Winning option: {}", option_id),
                None => println!("  Winning option: -"),
            }
            if info.state.is_terminal() {
                println!("  Paid out: {}", info.total_paid_out);
            }

            println!();
            println!("Stakes:");
            for (option_id, staked) in registry.stake_by_option(game_id)? {
                println!("  Option {}: {}", option_id, staked);
            }
        }

        GameCommands::Options { game_id } => {
            let options = ledger.deployment()?.registry.get_game_bet_options(game_id)?;

            if options.is_empty() {
                println!("Game {} has no bet options.", game_id);
                return Ok(());
            }

            let mut table = Table::new();
            table.load_preset(UTF8_FULL);
            table.set_header(vec!["ID", "Description"]);
            for option in options {
                table.add_row(vec![option.id.to_string(), option.description]);
            }

            println!("{}", table);
        }

        GameCommands::List => {
            let games = ledger.deployment()?.registry.all_games();

            if games.is_empty() {
                println!("No games found.");
                println!("Create a new game with: gameshow game create <owner> <description>");
                return Ok(());
            }

            let mut table = Table::new();
            table.load_preset(UTF8_FULL);
            table.set_header(vec!["ID", "Description", "State", "Options", "Staked"]);
            for info in games {
                table.add_row(vec![
                    info.id.to_string(),
                    info.description,
                    info.state.to_string(),
                    info.option_count.to_string(),
                    info.total_bet_amount.to_string(),
                ]);
            }

            println!("{}", table);
        }
    }

    Ok(())
}
