use crate::bet::{Bet, Payout};
use crate::error::{BettingError, Result};
use crate::game::OptionId;
use gameshow_core::Amount;

/// Split `pool` across the bets staked on `winning_option`.
///
/// Each winning bet gets `pool * stake / winning_stake`, rounded down. The
/// rounding dust goes to the earliest winning bet so the whole pool is paid.
/// With no stake on the winner every bet is refunded as placed.
pub fn compute_payouts(pool: Amount, winning_option: OptionId, bets: &[&Bet]) -> Result<Vec<Payout>> {
    let winners: Vec<&Bet> = bets
        .iter()
        .copied()
        .filter(|bet| bet.bet_option_id == winning_option)
        .collect();

    let winning_stake: u128 = winners.iter().map(|bet| bet.amount.to_wei() as u128).sum();

    if winning_stake == 0 {
        return Ok(bets
            .iter()
            .map(|bet| Payout {
                bettor: bet.bettor,
                bet_id: bet.id,
                amount: bet.amount,
            })
            .collect());
    }

    let pool_wei = pool.to_wei() as u128;
    let mut payouts = Vec::with_capacity(winners.len());
    let mut distributed: u128 = 0;

    for bet in &winners {
        let share = pool_wei * bet.amount.to_wei() as u128 / winning_stake;
        distributed += share;
        payouts.push(Payout {
            bettor: bet.bettor,
            bet_id: bet.id,
            amount: to_amount(share)?,
        });
    }

    let dust = pool_wei
        .checked_sub(distributed)
        .ok_or_else(|| BettingError::Overflow("payouts exceed pool".to_string()))?;
    if dust > 0 {
        if let Some(first) = payouts.first_mut() {
            first.amount = first
                .amount
                .checked_add(to_amount(dust)?)
                .ok_or_else(|| BettingError::Overflow("payout dust".to_string()))?;
        }
    }

    Ok(payouts)
}

fn to_amount(wei: u128) -> Result<Amount> {
    u64::try_from(wei)
        .map(Amount::from_wei)
        .map_err(|_| BettingError::Overflow(format!("{} wei does not fit an amount", wei)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use gameshow_core::Address;

    fn bet(label: &str, id: u64, option: OptionId, amount: u64) -> Bet {
        Bet {
            id,
            bettor: Address::from_label(label),
            game_id: 0,
            bet_option_id: option,
            amount: Amount::from_wei(amount),
        }
    }

    fn total(payouts: &[Payout]) -> u64 {
        payouts.iter().map(|p| p.amount.to_wei()).sum()
    }

    #[test]
    fn test_sole_winner_takes_pool() {
        let a = bet("bettor1", 0, 0, 50);
        let b = bet("bettor2", 0, 1, 25);

        let payouts = compute_payouts(Amount::from_wei(75), 0, &[&a, &b]).unwrap();
        assert_eq!(payouts.len(), 1);
        assert_eq!(payouts[0].bettor, Address::from_label("bettor1"));
        assert_eq!(payouts[0].amount, Amount::from_wei(75));
    }

    #[test]
    fn test_proportional_split() {
        let a = bet("a", 0, 0, 30);
        let b = bet("b", 0, 0, 10);
        let c = bet("c", 0, 1, 60);

        let payouts = compute_payouts(Amount::from_wei(100), 0, &[&a, &b, &c]).unwrap();
        assert_eq!(payouts[0].amount, Amount::from_wei(75));
        assert_eq!(payouts[1].amount, Amount::from_wei(25));
    }

    #[test]
    fn test_dust_goes_to_first_winner() {
        let a = bet("a", 0, 0, 1);
        let b = bet("b", 0, 0, 1);
        let c = bet("c", 0, 0, 1);
        let d = bet("d", 0, 1, 7);

        let payouts = compute_payouts(Amount::from_wei(10), 0, &[&a, &b, &c, &d]).unwrap();
        assert_eq!(payouts[0].amount, Amount::from_wei(4));
        assert_eq!(payouts[1].amount, Amount::from_wei(3));
        assert_eq!(payouts[2].amount, Amount::from_wei(3));
        assert_eq!(total(&payouts), 10);
    }

    #[test]
    fn test_refund_when_nobody_backed_winner() {
        let a = bet("a", 0, 1, 20);
        let b = bet("b", 0, 2, 5);

        let payouts = compute_payouts(Amount::from_wei(25), 0, &[&a, &b]).unwrap();
        assert_eq!(payouts.len(), 2);
        assert_eq!(payouts[0].amount, Amount::from_wei(20));
        assert_eq!(payouts[1].amount, Amount::from_wei(5));
    }

    #[test]
    fn test_large_amounts_do_not_overflow() {
        let a = bet("a", 0, 0, u64::MAX / 2);
        let b = bet("b", 0, 1, u64::MAX / 2);

        let pool = Amount::from_wei(u64::MAX - 1);
        let payouts = compute_payouts(pool, 0, &[&a, &b]).unwrap();
        assert_eq!(payouts[0].amount, pool);
    }

    #[test]
    fn test_no_bets_no_payouts() {
        let payouts = compute_payouts(Amount::ZERO, 0, &[]).unwrap();
        assert!(payouts.is_empty());
    }
}
