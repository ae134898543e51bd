use super::wei;
use crate::ledger::Ledger;
use anyhow::Result;
use clap::Subcommand;
use comfy_table::{presets::UTF8_FULL, Table};
use gameshow_betting::{GameId, OptionId};

#[derive(Subcommand)]
pub enum BetCommands {
    /// Stake native funds on a bet option of an open game
    Place {
        /// Betting account
        caller: String,
        /// Game ID
        game_id: GameId,
        /// Option ID
        option_id: OptionId,
        /// Amount in wei
        amount: u64,
    },
    /// Show one of the caller's bets by index
    Show {
        /// Betting account
        caller: String,
        /// Bet index within the caller's history
        index: u64,
    },
    /// List the caller's bets, or every bet on a game
    List {
        /// Betting account
        #[arg(conflicts_with = "game")]
        caller: Option<String>,
        /// Game ID
        #[arg(short, long)]
        game: Option<GameId>,
    },
}

pub async fn handle_bet_command(cmd: BetCommands, ledger: &mut Ledger) -> Result<()> {
    match cmd {
        BetCommands::Place {
            caller,
            game_id,
            option_id,
            amount,
        } => {
            let bettor = ledger.resolve(&caller)?;
            let deployment = ledger.deployment_mut()?;
            let bet_id = deployment.registry.place_bet(
                &mut deployment.balances,
                &bettor,
                game_id,
                option_id,
                wei(amount),
            )?;
            let remaining = deployment.balances.balance_of(&bettor);
            ledger.commit().await?;

            println!(
                "Placed bet {} of {} on option {} of game {}",
                bet_id,
                wei(amount),
                option_id,
                game_id
            );
            println!("  Remaining balance: {}", remaining);
        }

        BetCommands::Show { caller, index } => {
            let bettor = ledger.resolve(&caller)?;
            let bet = ledger.deployment()?.registry.get_bet(&bettor, index)?;

            println!("Bet {} of '{}':", bet.id, caller);
            println!("  Bettor: {}", bet.bettor);
            println!("  Game: {}", bet.game_id);
            println!("  Option: {}", bet.bet_option_id);
            println!("  Amount: {}", bet.amount);
        }

        BetCommands::List { caller, game } => {
            let registry = &ledger.deployment()?.registry;
            let bets = match (caller, game) {
                (Some(caller), _) => registry.bets_of(&ledger.resolve(&caller)?),
                (None, Some(game_id)) => registry.bets_for_game(game_id)?,
                (None, None) => anyhow::bail!("Specify a caller or --game <id>"),
            };

            if bets.is_empty() {
                println!("No bets found.");
                return Ok(());
            }

            let mut table = Table::new();
            table.load_preset(UTF8_FULL);
            table.set_header(vec!["Bettor", "Index", "Game", "Option", "Amount"]);
            for bet in bets {
                table.add_row(vec![
                    ledger.label(&bet.bettor),
                    bet.id.to_string(),
                    bet.game_id.to_string(),
                    bet.bet_option_id.to_string(),
                    bet.amount.to_string(),
                ]);
            }

            println!("{}", table);
        }
    }

    Ok(())
}
