pub mod account;
pub mod bet;
pub mod deploy;
pub mod events;
pub mod game;
pub mod token;

pub use account::{handle_account_command, AccountCommands};
pub use bet::{handle_bet_command, BetCommands};
pub use deploy::{handle_addresses, handle_deploy, handle_reset};
pub use events::handle_events_command;
pub use game::{handle_game_command, GameCommands};
pub use token::{handle_token_command, TokenCommands};

use gameshow_core::Amount;

pub(crate) fn wei(amount: u64) -> Amount {
    Amount::from_wei(amount)
}
