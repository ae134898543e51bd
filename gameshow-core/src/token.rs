//! Fungible companion token issued next to the betting registry.

use crate::config::TokenConfig;
use crate::error::{CoreError, Result};
use crate::event::{ContractEvent, EventLog};
use crate::types::{Address, Amount};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum TokenEvent {
    /// `from` is `None` on mint, `to` is `None` on burn.
    Transfer {
        from: Option<Address>,
        to: Option<Address>,
        amount: Amount,
    },
    Approval {
        owner: Address,
        spender: Address,
        amount: Amount,
    },
    OwnershipTransferred {
        previous_owner: Address,
        new_owner: Address,
    },
}

impl ContractEvent for TokenEvent {
    fn name(&self) -> &'static str {
        match self {
            TokenEvent::Transfer { .. } => "Transfer",
            TokenEvent::Approval { .. } => "Approval",
            TokenEvent::OwnershipTransferred { .. } => "OwnershipTransferred",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameShowToken {
    address: Address,
    name: String,
    symbol: String,
    decimals: u8,
    owner: Address,
    total_supply: Amount,
    balances: BTreeMap<Address, Amount>,
    allowances: BTreeMap<Address, BTreeMap<Address, Amount>>,
    #[serde(skip)]
    events: EventLog<TokenEvent>,
}

impl GameShowToken {
    pub fn new(address: Address, owner: Address, config: &TokenConfig) -> Self {
        Self {
            address,
            name: config.name.clone(),
            symbol: config.symbol.clone(),
            decimals: config.decimals,
            owner,
            total_supply: Amount::ZERO,
            balances: BTreeMap::new(),
            allowances: BTreeMap::new(),
            events: EventLog::new(),
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn decimals(&self) -> u8 {
        self.decimals
    }

    pub fn owner(&self) -> Address {
        self.owner
    }

    pub fn total_supply(&self) -> Amount {
        self.total_supply
    }

    pub fn balance_of(&self, account: &Address) -> Amount {
        self.balances.get(account).copied().unwrap_or(Amount::ZERO)
    }

    pub fn allowance(&self, owner: &Address, spender: &Address) -> Amount {
        self.allowances
            .get(owner)
            .and_then(|spenders| spenders.get(spender))
            .copied()
            .unwrap_or(Amount::ZERO)
    }

    pub fn holders(&self) -> impl Iterator<Item = (&Address, &Amount)> {
        self.balances.iter().filter(|(_, amount)| !amount.is_zero())
    }

    pub fn events(&self) -> &[TokenEvent] {
        self.events.entries()
    }

    pub fn take_events(&mut self) -> Vec<TokenEvent> {
        self.events.take()
    }

    pub fn mint(&mut self, caller: &Address, to: &Address, amount: Amount) -> Result<()> {
        self.only_owner(caller)?;
        if to.is_zero() {
            return Err(CoreError::invalid_argument("cannot mint to the zero address"));
        }

        let supply = self
            .total_supply
            .checked_add(amount)
            .ok_or_else(|| CoreError::overflow("total supply"))?;
        let balance = self
            .balance_of(to)
            .checked_add(amount)
            .ok_or_else(|| CoreError::overflow(format!("token balance of {}", to)))?;

        self.total_supply = supply;
        self.balances.insert(*to, balance);
        self.events.emit(TokenEvent::Transfer {
            from: None,
            to: Some(*to),
            amount,
        });

        tracing::info!("Minted {} {} to {}", amount.to_wei(), self.symbol, to);
        Ok(())
    }

    pub fn burn(&mut self, caller: &Address, amount: Amount) -> Result<()> {
        let balance = self.balance_of(caller);
        let remaining = balance
            .checked_sub(amount)
            .ok_or(CoreError::InsufficientFunds {
                need: amount.to_wei(),
                available: balance.to_wei(),
            })?;

        self.balances.insert(*caller, remaining);
        self.total_supply = self.total_supply.saturating_sub(amount);
        self.events.emit(TokenEvent::Transfer {
            from: Some(*caller),
            to: None,
            amount,
        });

        tracing::info!("Burned {} {} from {}", amount.to_wei(), self.symbol, caller);
        Ok(())
    }

    pub fn transfer(&mut self, caller: &Address, to: &Address, amount: Amount) -> Result<()> {
        self.move_tokens(caller, to, amount)?;
        self.events.emit(TokenEvent::Transfer {
            from: Some(*caller),
            to: Some(*to),
            amount,
        });
        Ok(())
    }

    pub fn approve(&mut self, caller: &Address, spender: &Address, amount: Amount) -> Result<()> {
        if spender.is_zero() {
            return Err(CoreError::invalid_argument("cannot approve the zero address"));
        }

        self.allowances
            .entry(*caller)
            .or_default()
            .insert(*spender, amount);
        self.events.emit(TokenEvent::Approval {
            owner: *caller,
            spender: *spender,
            amount,
        });
        Ok(())
    }

    /// Move `amount` from `from` to `to`, spending the caller's allowance.
    pub fn transfer_from(
        &mut self,
        caller: &Address,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<()> {
        let allowed = self.allowance(from, caller);
        let remaining = allowed
            .checked_sub(amount)
            .ok_or_else(|| {
                CoreError::unauthorized(format!(
                    "{} may spend {} of {}'s tokens, requested {}",
                    caller,
                    allowed.to_wei(),
                    from,
                    amount.to_wei()
                ))
            })?;

        self.move_tokens(from, to, amount)?;
        self.allowances
            .entry(*from)
            .or_default()
            .insert(*caller, remaining);
        self.events.emit(TokenEvent::Transfer {
            from: Some(*from),
            to: Some(*to),
            amount,
        });
        Ok(())
    }

    pub fn transfer_ownership(&mut self, caller: &Address, new_owner: &Address) -> Result<()> {
        self.only_owner(caller)?;
        if new_owner.is_zero() {
            return Err(CoreError::invalid_argument(
                "new owner cannot be the zero address",
            ));
        }

        let previous_owner = self.owner;
        self.owner = *new_owner;
        self.events.emit(TokenEvent::OwnershipTransferred {
            previous_owner,
            new_owner: *new_owner,
        });

        tracing::info!("Token ownership moved from {} to {}", previous_owner, new_owner);
        Ok(())
    }

    fn move_tokens(&mut self, from: &Address, to: &Address, amount: Amount) -> Result<()> {
        if to.is_zero() {
            return Err(CoreError::invalid_argument(
                "cannot transfer to the zero address",
            ));
        }

        let from_balance = self.balance_of(from);
        let debited = from_balance
            .checked_sub(amount)
            .ok_or(CoreError::InsufficientFunds {
                need: amount.to_wei(),
                available: from_balance.to_wei(),
            })?;
        self.balances.insert(*from, debited);

        let credited = self
            .balance_of(to)
            .checked_add(amount)
            .ok_or_else(|| CoreError::overflow(format!("token balance of {}", to)))?;
        self.balances.insert(*to, credited);

        Ok(())
    }

    fn only_owner(&self, caller: &Address) -> Result<()> {
        if *caller != self.owner {
            return Err(CoreError::unauthorized(format!(
                "{} is not the token owner",
                caller
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deploy() -> (GameShowToken, Address) {
        let owner = Address::from_label("owner");
        let token = GameShowToken::new(
            Address::contract(&owner, 0),
            owner,
            &TokenConfig::default(),
        );
        (token, owner)
    }

    #[test]
    fn test_deployment_metadata() {
        let (token, owner) = deploy();

        assert_eq!(token.name(), "Nouns Game Show");
        assert_eq!(token.symbol(), "NGS");
        assert_eq!(token.decimals(), 18);
        assert_eq!(token.owner(), owner);
        assert_eq!(token.total_supply(), Amount::ZERO);
    }

    #[test]
    fn test_mint_is_owner_only() {
        let (mut token, owner) = deploy();
        let bettor = Address::from_label("bettor1");

        let err = token
            .mint(&bettor, &bettor, Amount::from_wei(10))
            .unwrap_err();
        assert!(matches!(err, CoreError::Unauthorized(_)));

        token.mint(&owner, &bettor, Amount::from_wei(10)).unwrap();
        assert_eq!(token.balance_of(&bettor), Amount::from_wei(10));
        assert_eq!(token.total_supply(), Amount::from_wei(10));
        assert_eq!(
            token.events().last(),
            Some(&TokenEvent::Transfer {
                from: None,
                to: Some(bettor),
                amount: Amount::from_wei(10),
            })
        );
    }

    #[test]
    fn test_transfer_and_allowance() {
        let (mut token, owner) = deploy();
        let alice = Address::from_label("alice");
        let bob = Address::from_label("bob");
        token.mint(&owner, &alice, Amount::from_wei(100)).unwrap();

        token.transfer(&alice, &bob, Amount::from_wei(30)).unwrap();
        assert_eq!(token.balance_of(&alice), Amount::from_wei(70));
        assert_eq!(token.balance_of(&bob), Amount::from_wei(30));

        token.approve(&alice, &bob, Amount::from_wei(20)).unwrap();
        token
            .transfer_from(&bob, &alice, &bob, Amount::from_wei(15))
            .unwrap();
        assert_eq!(token.allowance(&alice, &bob), Amount::from_wei(5));
        assert_eq!(token.balance_of(&bob), Amount::from_wei(45));

        let err = token
            .transfer_from(&bob, &alice, &bob, Amount::from_wei(6))
            .unwrap_err();
        assert!(matches!(err, CoreError::Unauthorized(_)));
        assert_eq!(token.balance_of(&alice), Amount::from_wei(55));
    }

    #[test]
    fn test_transfer_insufficient_balance() {
        let (mut token, _owner) = deploy();
        let alice = Address::from_label("alice");
        let bob = Address::from_label("bob");

        let err = token.transfer(&alice, &bob, Amount::from_wei(1)).unwrap_err();
        assert!(matches!(err, CoreError::InsufficientFunds { need: 1, available: 0 }));
        assert!(token.events().is_empty());
    }

    #[test]
    fn test_burn_reduces_supply() {
        let (mut token, owner) = deploy();
        token.mint(&owner, &owner, Amount::from_wei(50)).unwrap();

        token.burn(&owner, Amount::from_wei(20)).unwrap();
        assert_eq!(token.total_supply(), Amount::from_wei(30));
        assert!(token.burn(&owner, Amount::from_wei(31)).is_err());
    }

    #[test]
    fn test_transfer_ownership() {
        let (mut token, owner) = deploy();
        let next = Address::from_label("next");

        token.transfer_ownership(&owner, &next).unwrap();
        assert_eq!(token.owner(), next);
        assert!(token.mint(&owner, &owner, Amount::from_wei(1)).is_err());
        assert!(token.mint(&next, &owner, Amount::from_wei(1)).is_ok());
    }
}
