use crate::game::{GameId, OptionId};
use gameshow_core::ContractEvent;
use serde::{Deserialize, Serialize};

/// Events emitted by the registry, fields in emission order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum BettingEvent {
    NewGame {
        game_id: GameId,
        description: String,
    },
    NewGameBetOption {
        game_id: GameId,
        option_id: OptionId,
        description: String,
    },
    RemoveGameBetOption {
        game_id: GameId,
        option_id: OptionId,
    },
    NewBet {
        game_id: GameId,
        bet_option_id: OptionId,
    },
    GameClosed {
        game_id: GameId,
    },
    WinnerDeclared {
        game_id: GameId,
        winning_option_id: OptionId,
    },
    WinnersPaidOut {
        game_id: GameId,
    },
}

impl ContractEvent for BettingEvent {
    fn name(&self) -> &'static str {
        match self {
            BettingEvent::NewGame { .. } => "NewGame",
            BettingEvent::NewGameBetOption { .. } => "NewGameBetOption",
            BettingEvent::RemoveGameBetOption { .. } => "RemoveGameBetOption",
            BettingEvent::NewBet { .. } => "NewBet",
            BettingEvent::GameClosed { .. } => "GameClosed",
            BettingEvent::WinnerDeclared { .. } => "WinnerDeclared",
            BettingEvent::WinnersPaidOut { .. } => "WinnersPaidOut",
        }
    }
}
