use crate::error::{CoreError, Result};
use crate::types::{Address, Amount};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Native-currency account book.
///
/// Contracts hold escrow as the balance of their own address, so moving value
/// into or out of a contract is an ordinary [`Balances::transfer`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Balances {
    accounts: BTreeMap<Address, Amount>,
}

impl Balances {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn balance_of(&self, address: &Address) -> Amount {
        self.accounts.get(address).copied().unwrap_or(Amount::ZERO)
    }

    /// Credit an account out of thin air, the way a dev chain pre-funds its signers.
    pub fn fund(&mut self, address: &Address, amount: Amount) -> Result<Amount> {
        let current = self.balance_of(address);
        let updated = current
            .checked_add(amount)
            .ok_or_else(|| CoreError::overflow(format!("balance of {}", address)))?;
        self.accounts.insert(*address, updated);

        tracing::debug!("Funded {} with {}, balance now {}", address, amount, updated);
        Ok(updated)
    }

    /// Check that `from` can cover `amount` without moving anything.
    pub fn ensure_available(&self, from: &Address, amount: Amount) -> Result<()> {
        let available = self.balance_of(from);
        if available < amount {
            return Err(CoreError::InsufficientFunds {
                need: amount.to_wei(),
                available: available.to_wei(),
            });
        }
        Ok(())
    }

    pub fn transfer(&mut self, from: &Address, to: &Address, amount: Amount) -> Result<()> {
        self.ensure_available(from, amount)?;

        let debited = self.balance_of(from).saturating_sub(amount);
        let credited = if from == to {
            debited
        } else {
            self.balance_of(to)
        }
        .checked_add(amount)
        .ok_or_else(|| CoreError::overflow(format!("balance of {}", to)))?;

        self.accounts.insert(*from, debited);
        self.accounts.insert(*to, credited);

        tracing::debug!("Transferred {} from {} to {}", amount, from, to);
        Ok(())
    }

    pub fn accounts(&self) -> impl Iterator<Item = (&Address, &Amount)> {
        self.accounts.iter()
    }

    pub fn total(&self) -> Amount {
        self.accounts.values().copied().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fund_and_transfer() {
        let alice = Address::from_label("alice");
        let bob = Address::from_label("bob");
        let mut balances = Balances::new();

        balances.fund(&alice, Amount::from_wei(100)).unwrap();
        balances.transfer(&alice, &bob, Amount::from_wei(40)).unwrap();

        assert_eq!(balances.balance_of(&alice), Amount::from_wei(60));
        assert_eq!(balances.balance_of(&bob), Amount::from_wei(40));
        assert_eq!(balances.total(), Amount::from_wei(100));
    }

    #[test]
    fn test_transfer_insufficient_funds_leaves_state() {
        let alice = Address::from_label("alice");
        let bob = Address::from_label("bob");
        let mut balances = Balances::new();
        balances.fund(&alice, Amount::from_wei(10)).unwrap();

        let err = balances
            .transfer(&alice, &bob, Amount::from_wei(11))
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::InsufficientFunds {
                need: 11,
                available: 10
            }
        ));
        assert_eq!(balances.balance_of(&alice), Amount::from_wei(10));
        assert_eq!(balances.balance_of(&bob), Amount::ZERO);
    }

    #[test]
    fn test_self_transfer_is_noop() {
        let alice = Address::from_label("alice");
        let mut balances = Balances::new();
        balances.fund(&alice, Amount::from_wei(10)).unwrap();

        balances.transfer(&alice, &alice, Amount::from_wei(10)).unwrap();
        assert_eq!(balances.balance_of(&alice), Amount::from_wei(10));
    }
}
