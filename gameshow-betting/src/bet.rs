use crate::game::{GameId, OptionId};
use gameshow_core::{Address, Amount};
use serde::{Deserialize, Serialize};

/// A placed bet. Never mutated or removed once recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bet {
    /// Index within the bettor's own history.
    pub id: u64,
    pub bettor: Address,
    pub game_id: GameId,
    pub bet_option_id: OptionId,
    pub amount: Amount,
}

/// Funds sent to a bettor when a game is paid out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payout {
    pub bettor: Address,
    pub bet_id: u64,
    pub amount: Amount,
}
