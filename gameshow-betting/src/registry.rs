use crate::bet::{Bet, Payout};
use crate::error::{BettingError, Result};
use crate::event::BettingEvent;
use crate::game::{BetOption, Game, GameId, GameInfo, GameState, OptionId};
use crate::payout::compute_payouts;
use gameshow_core::{Address, Amount, Balances, EventLog, LedgerConfig};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Authoritative ledger of games, their bet options and placed bets.
///
/// Every mutating call takes the calling address explicitly. Preconditions are
/// checked before anything is written, so a rejected call leaves both the
/// registry and the balance book untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameRegistry {
    address: Address,
    owner: Address,
    max_description_len: usize,
    min_bet: Amount,
    games: Vec<Game>,
    /// Every bet in placement order.
    bets: Vec<Bet>,
    /// Positions in `bets` per bettor; a bet's id is its position here.
    bets_by_bettor: BTreeMap<Address, Vec<usize>>,
    #[serde(skip)]
    events: EventLog<BettingEvent>,
}

impl GameRegistry {
    pub fn new(address: Address, owner: Address, config: &LedgerConfig) -> Self {
        Self {
            address,
            owner,
            max_description_len: config.max_description_len,
            min_bet: config.min_bet,
            games: Vec::new(),
            bets: Vec::new(),
            bets_by_bettor: BTreeMap::new(),
            events: EventLog::new(),
        }
    }

    /// Address holding the escrowed stakes.
    pub fn address(&self) -> Address {
        self.address
    }

    pub fn owner(&self) -> Address {
        self.owner
    }

    pub fn num_games(&self) -> u64 {
        self.games.len() as u64
    }

    pub fn games(&self, game_id: GameId) -> Result<GameInfo> {
        Ok(self.game(game_id)?.get_info())
    }

    pub fn all_games(&self) -> Vec<GameInfo> {
        self.games.iter().map(Game::get_info).collect()
    }

    pub fn get_game_bet_options(&self, game_id: GameId) -> Result<Vec<BetOption>> {
        Ok(self.game(game_id)?.bet_options().to_vec())
    }

    /// The caller's bet at `index` within their own history.
    pub fn get_bet(&self, caller: &Address, index: u64) -> Result<&Bet> {
        self.bets_by_bettor
            .get(caller)
            .and_then(|positions| positions.get(index as usize))
            .map(|&position| &self.bets[position])
            .ok_or_else(|| BettingError::not_found(format!("bet {} for {}", index, caller)))
    }

    pub fn bets_of(&self, caller: &Address) -> Vec<&Bet> {
        self.bets_by_bettor
            .get(caller)
            .map(|positions| positions.iter().map(|&p| &self.bets[p]).collect())
            .unwrap_or_default()
    }

    pub fn bets_for_game(&self, game_id: GameId) -> Result<Vec<&Bet>> {
        self.game(game_id)?;
        Ok(self.bets.iter().filter(|bet| bet.game_id == game_id).collect())
    }

    /// Total stake per option of a game, in option order.
    pub fn stake_by_option(&self, game_id: GameId) -> Result<Vec<(OptionId, Amount)>> {
        let game = self.game(game_id)?;
        let bets = self.bets_for_game(game_id)?;

        Ok(game
            .bet_options()
            .iter()
            .map(|option| {
                let staked = bets
                    .iter()
                    .filter(|bet| bet.bet_option_id == option.id)
                    .map(|bet| bet.amount)
                    .sum();
                (option.id, staked)
            })
            .collect())
    }

    pub fn events(&self) -> &[BettingEvent] {
        self.events.entries()
    }

    pub fn take_events(&mut self) -> Vec<BettingEvent> {
        self.events.take()
    }

    pub fn create_game(&mut self, caller: &Address, description: &str) -> Result<GameId> {
        self.only_owner(caller)?;
        let description = self.validate_description(description)?;

        let game_id = self.num_games();
        self.games.push(Game::new(game_id, description.clone()));
        self.events.emit(BettingEvent::NewGame {
            game_id,
            description,
        });

        tracing::info!("Created game {}", game_id);
        Ok(game_id)
    }

    pub fn add_game_bet_option(
        &mut self,
        caller: &Address,
        game_id: GameId,
        description: &str,
    ) -> Result<OptionId> {
        self.only_owner(caller)?;
        self.ensure_state(game_id, GameState::Open, "add a bet option to")?;
        let description = self.validate_description(description)?;

        let game = self.game_mut(game_id)?;
        let option_id = game.next_option_id;
        game.next_option_id += 1;
        game.bet_options.push(BetOption {
            id: option_id,
            game_id,
            description: description.clone(),
        });

        self.events.emit(BettingEvent::NewGameBetOption {
            game_id,
            option_id,
            description,
        });

        tracing::info!("Added bet option {} to game {}", option_id, game_id);
        Ok(option_id)
    }

    /// Remove an option that nobody has bet on yet.
    pub fn remove_game_bet_option(
        &mut self,
        caller: &Address,
        game_id: GameId,
        option_id: OptionId,
    ) -> Result<()> {
        self.only_owner(caller)?;
        self.ensure_state(game_id, GameState::Open, "remove a bet option from")?;
        self.ensure_option(game_id, option_id)?;

        if self
            .bets
            .iter()
            .any(|bet| bet.game_id == game_id && bet.bet_option_id == option_id)
        {
            return Err(BettingError::invalid_state(format!(
                "bet option {} of game {} already has bets",
                option_id, game_id
            )));
        }

        let game = self.game_mut(game_id)?;
        game.bet_options.retain(|option| option.id != option_id);

        self.events
            .emit(BettingEvent::RemoveGameBetOption { game_id, option_id });

        tracing::info!("Removed bet option {} from game {}", option_id, game_id);
        Ok(())
    }

    /// Stake `value` from the caller's balance on an option; returns the
    /// caller-scoped bet index.
    pub fn place_bet(
        &mut self,
        bank: &mut Balances,
        caller: &Address,
        game_id: GameId,
        bet_option_id: OptionId,
        value: Amount,
    ) -> Result<u64> {
        if *caller == self.address {
            return Err(BettingError::invalid_argument(
                "the registry cannot bet against its own escrow",
            ));
        }
        self.ensure_state(game_id, GameState::Open, "bet on")?;
        self.ensure_option(game_id, bet_option_id)?;

        if value.is_zero() {
            return Err(BettingError::invalid_argument("bet amount must be greater than 0"));
        }
        if value < self.min_bet {
            return Err(BettingError::invalid_argument(format!(
                "bet amount {} is below the minimum of {}",
                value, self.min_bet
            )));
        }

        let total = self
            .game(game_id)?
            .total_bet_amount
            .checked_add(value)
            .ok_or_else(|| BettingError::Overflow(format!("total bet amount of game {}", game_id)))?;

        bank.transfer(caller, &self.address, value)?;

        let game = self.game_mut(game_id)?;
        game.total_bet_amount = total;

        let positions = self.bets_by_bettor.entry(*caller).or_default();
        let bet_id = positions.len() as u64;
        positions.push(self.bets.len());
        self.bets.push(Bet {
            id: bet_id,
            bettor: *caller,
            game_id,
            bet_option_id,
            amount: value,
        });

        self.events.emit(BettingEvent::NewBet {
            game_id,
            bet_option_id,
        });

        tracing::info!(
            "{} bet {} on option {} of game {}",
            caller,
            value,
            bet_option_id,
            game_id
        );
        Ok(bet_id)
    }

    pub fn close_game(&mut self, caller: &Address, game_id: GameId) -> Result<()> {
        self.only_owner(caller)?;
        self.transition(game_id, GameState::Open, "close")?;

        self.events.emit(BettingEvent::GameClosed { game_id });

        tracing::info!("Closed game {}", game_id);
        Ok(())
    }

    pub fn declare_winners(
        &mut self,
        caller: &Address,
        game_id: GameId,
        winning_option_id: OptionId,
    ) -> Result<()> {
        self.only_owner(caller)?;
        self.ensure_state(game_id, GameState::Closed, "declare winners of")?;

        if !self.game(game_id)?.has_option(winning_option_id) {
            return Err(BettingError::invalid_argument(format!(
                "bet option {} does not belong to game {}",
                winning_option_id, game_id
            )));
        }

        self.transition(game_id, GameState::Closed, "declare winners of")?;
        self.game_mut(game_id)?.winning_option_id = Some(winning_option_id);

        self.events.emit(BettingEvent::WinnerDeclared {
            game_id,
            winning_option_id,
        });

        tracing::info!("Game {} winner declared: option {}", game_id, winning_option_id);
        Ok(())
    }

    /// Pay the game's pool out of escrow to the winning bettors.
    pub fn distribute_winnings(
        &mut self,
        bank: &mut Balances,
        caller: &Address,
        game_id: GameId,
    ) -> Result<Vec<Payout>> {
        self.only_owner(caller)?;
        self.ensure_state(game_id, GameState::WinnerDeclared, "distribute winnings of")?;

        let game = self.game(game_id)?;
        let pool = game.total_bet_amount;
        let winning_option_id = game.winning_option_id.ok_or_else(|| {
            BettingError::invalid_state(format!("game {} has no declared winner", game_id))
        })?;

        let bets = self.bets_for_game(game_id)?;
        let payouts = compute_payouts(pool, winning_option_id, &bets)?;

        // Apply to a staged copy so a failing transfer cannot leave a partial payout.
        let mut staged = bank.clone();
        for payout in &payouts {
            staged.transfer(&self.address, &payout.bettor, payout.amount)?;
        }
        *bank = staged;

        self.transition(game_id, GameState::WinnerDeclared, "distribute winnings of")?;
        self.game_mut(game_id)?.total_paid_out = payouts.iter().map(|p| p.amount).sum();

        self.events.emit(BettingEvent::WinnersPaidOut { game_id });

        tracing::info!(
            "Game {} paid out {} to {} bets",
            game_id,
            pool,
            payouts.len()
        );
        Ok(payouts)
    }

    fn game(&self, game_id: GameId) -> Result<&Game> {
        self.games
            .get(game_id as usize)
            .ok_or_else(|| BettingError::not_found(format!("game {}", game_id)))
    }

    fn game_mut(&mut self, game_id: GameId) -> Result<&mut Game> {
        self.games
            .get_mut(game_id as usize)
            .ok_or_else(|| BettingError::not_found(format!("game {}", game_id)))
    }

    fn ensure_state(&self, game_id: GameId, expected: GameState, action: &str) -> Result<()> {
        let state = self.game(game_id)?.state();
        if state != expected {
            return Err(BettingError::invalid_state(format!(
                "cannot {} game {} while it is {}",
                action, game_id, state
            )));
        }
        Ok(())
    }

    fn ensure_option(&self, game_id: GameId, option_id: OptionId) -> Result<()> {
        if !self.game(game_id)?.has_option(option_id) {
            return Err(BettingError::not_found(format!(
                "bet option {} of game {}",
                option_id, game_id
            )));
        }
        Ok(())
    }

    fn transition(&mut self, game_id: GameId, from: GameState, action: &str) -> Result<()> {
        self.ensure_state(game_id, from, action)?;
        let game = self.game_mut(game_id)?;
        if !game.advance(from) {
            return Err(BettingError::invalid_state(format!(
                "game {} cannot leave {}",
                game_id, from
            )));
        }
        Ok(())
    }

    fn only_owner(&self, caller: &Address) -> Result<()> {
        if *caller != self.owner {
            return Err(BettingError::Unauthorized(format!(
                "{} is not the registry owner",
                caller
            )));
        }
        Ok(())
    }

    fn validate_description(&self, description: &str) -> Result<String> {
        let trimmed = description.trim();
        if trimmed.is_empty() {
            return Err(BettingError::invalid_argument("description cannot be empty"));
        }
        if trimmed.chars().count() > self.max_description_len {
            return Err(BettingError::invalid_argument(format!(
                "description longer than {} characters",
                self.max_description_len
            )));
        }
        Ok(trimmed.to_string())
    }
}
