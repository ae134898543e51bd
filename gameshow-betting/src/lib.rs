//! Game-show betting registry
//!
//! An owner creates games and their bet options, bettors stake native funds
//! on options, and once a game is closed and its winner declared the escrowed
//! pool is split across the winning stakes.

pub mod bet;
pub mod deployment;
pub mod error;
pub mod event;
pub mod game;
pub mod payout;
pub mod registry;

pub use bet::{Bet, Payout};
pub use deployment::{AddressBook, Deployment};
pub use error::{BettingError, ErrorKind, Result};
pub use event::BettingEvent;
pub use game::{BetOption, Game, GameId, GameInfo, GameState, OptionId};
pub use registry::GameRegistry;
