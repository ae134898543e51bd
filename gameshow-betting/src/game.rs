use gameshow_core::Amount;
use serde::{Deserialize, Serialize};
use std::fmt;

pub type GameId = u64;
pub type OptionId = u64;

/// Lifecycle of a game. Transitions only move forward, one step at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GameState {
    Open,
    Closed,
    WinnerDeclared,
    PaidOut,
}

impl GameState {
    /// Numeric code as exposed to callers: Open=0 .. PaidOut=3.
    pub fn code(self) -> u8 {
        match self {
            GameState::Open => 0,
            GameState::Closed => 1,
            GameState::WinnerDeclared => 2,
            GameState::PaidOut => 3,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(GameState::Open),
            1 => Some(GameState::Closed),
            2 => Some(GameState::WinnerDeclared),
            3 => Some(GameState::PaidOut),
            _ => None,
        }
    }

    pub fn next(self) -> Option<Self> {
        Self::from_code(self.code() + 1)
    }

    pub fn is_terminal(self) -> bool {
        self == GameState::PaidOut
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            GameState::Open => "Open",
            GameState::Closed => "Closed",
            GameState::WinnerDeclared => "WinnerDeclared",
            GameState::PaidOut => "PaidOut",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BetOption {
    pub id: OptionId,
    pub game_id: GameId,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    pub(crate) id: GameId,
    pub(crate) description: String,
    pub(crate) state: GameState,
    pub(crate) bet_options: Vec<BetOption>,
    pub(crate) next_option_id: OptionId,
    pub(crate) total_bet_amount: Amount,
    pub(crate) winning_option_id: Option<OptionId>,
    pub(crate) total_paid_out: Amount,
}

impl Game {
    pub(crate) fn new(id: GameId, description: String) -> Self {
        Self {
            id,
            description,
            state: GameState::Open,
            bet_options: Vec::new(),
            next_option_id: 0,
            total_bet_amount: Amount::ZERO,
            winning_option_id: None,
            total_paid_out: Amount::ZERO,
        }
    }

    pub fn id(&self) -> GameId {
        self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn bet_options(&self) -> &[BetOption] {
        &self.bet_options
    }

    pub fn total_bet_amount(&self) -> Amount {
        self.total_bet_amount
    }

    pub fn winning_option_id(&self) -> Option<OptionId> {
        self.winning_option_id
    }

    pub fn bet_option(&self, option_id: OptionId) -> Option<&BetOption> {
        self.bet_options.iter().find(|option| option.id == option_id)
    }

    pub fn has_option(&self, option_id: OptionId) -> bool {
        self.bet_option(option_id).is_some()
    }

    /// Move to the next lifecycle state if the game is currently in `from`.
    pub(crate) fn advance(&mut self, from: GameState) -> bool {
        if self.state != from {
            return false;
        }
        match self.state.next() {
            Some(next) => {
                self.state = next;
                true
            }
            None => false,
        }
    }

    pub fn get_info(&self) -> GameInfo {
        GameInfo {
            id: self.id,
            description: self.description.clone(),
            state: self.state,
            total_bet_amount: self.total_bet_amount,
            winning_option_id: self.winning_option_id,
            option_count: self.bet_options.len(),
            total_paid_out: self.total_paid_out,
        }
    }
}

/// Public snapshot of a game's fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameInfo {
    pub id: GameId,
    pub description: String,
    pub state: GameState,
    pub total_bet_amount: Amount,
    pub winning_option_id: Option<OptionId>,
    pub option_count: usize,
    pub total_paid_out: Amount,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_codes() {
        assert_eq!(GameState::Open.code(), 0);
        assert_eq!(GameState::Closed.code(), 1);
        assert_eq!(GameState::WinnerDeclared.code(), 2);
        assert_eq!(GameState::PaidOut.code(), 3);
        assert_eq!(GameState::from_code(4), None);
    }

    #[test]
    fn test_advance_only_from_expected_state() {
        let mut game = Game::new(0, "Test Game".to_string());

        assert!(!game.advance(GameState::Closed));
        assert_eq!(game.state(), GameState::Open);

        assert!(game.advance(GameState::Open));
        assert!(game.advance(GameState::Closed));
        assert!(game.advance(GameState::WinnerDeclared));
        assert_eq!(game.state(), GameState::PaidOut);

        assert!(!game.advance(GameState::PaidOut));
        assert!(game.state().is_terminal());
    }
}
