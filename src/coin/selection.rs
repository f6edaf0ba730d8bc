//! Minimal-count coin selection

use super::{sort_by_balance, total_balance, Coin};
use crate::error::{EstimatorError, EstimatorResult};

use tracing::debug;

/// Select a minimal set of coins whose combined balance is at least `amount`.
///
/// Coins whose object id appears in `exclude` are never selected. The result
/// is sorted ascending by balance. Fails when no coins remain or their total
/// falls short of `amount`.
pub fn select_coin_set_with_combined_balance_ge(
    coins: &[Coin],
    amount: u64,
    exclude: &[String],
) -> EstimatorResult<Vec<Coin>> {
    let candidates: Vec<Coin> = coins
        .iter()
        .filter(|c| match &c.object_id {
            Some(id) => !exclude.contains(id),
            None => true,
        })
        .cloned()
        .collect();
    let mut sorted = sort_by_balance(&candidates);
    let total = total_balance(&sorted);

    if sorted.is_empty() || total < amount as u128 {
        return Err(EstimatorError::CoinSelection {
            requested: amount,
            available: total,
        });
    }
    if total == amount as u128 {
        return Ok(sorted);
    }

    let mut sum: u128 = 0;
    let mut selected = Vec::new();
    while sum < total {
        let target = amount as u128 - sum;
        // smallest coin that covers the rest on its own
        if let Some(pos) = sorted.iter().position(|c| c.balance as u128 >= target) {
            selected.push(sorted.swap_remove(pos));
            break;
        }
        match sorted.pop() {
            Some(largest) => {
                sum += largest.balance as u128;
                selected.push(largest);
            }
            None => break,
        }
    }

    debug!(
        "Selected {} of {} coins to cover {}",
        selected.len(),
        candidates.len(),
        amount
    );
    Ok(sort_by_balance(&selected))
}

/// Smallest single coin whose balance is at least `amount`
pub fn select_coin_with_balance_ge(coins: &[Coin], amount: u64) -> Option<Coin> {
    sort_by_balance(coins)
        .into_iter()
        .find(|c| c.balance >= amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_err, assert_ok};

    fn balances(coins: &[Coin]) -> Vec<u64> {
        coins.iter().map(|c| c.balance).collect()
    }

    #[test]
    fn picks_smallest_sufficient_coin() {
        let coins = vec![Coin::native(50), Coin::native(5), Coin::native(20)];
        let selected = assert_ok!(select_coin_set_with_combined_balance_ge(&coins, 15, &[]));
        assert_eq!(balances(&selected), vec![20]);
    }

    #[test]
    fn takes_largest_coins_until_remainder_fits() {
        let coins = vec![
            Coin::native(1),
            Coin::native(2),
            Coin::native(3),
            Coin::native(10),
        ];
        // 10 is taken first, then 2 covers the remaining 2
        let selected = assert_ok!(select_coin_set_with_combined_balance_ge(&coins, 12, &[]));
        assert_eq!(balances(&selected), vec![2, 10]);
    }

    #[test]
    fn exact_total_returns_every_coin() {
        let coins = vec![Coin::native(7), Coin::native(3)];
        let selected = assert_ok!(select_coin_set_with_combined_balance_ge(&coins, 10, &[]));
        assert_eq!(balances(&selected), vec![3, 7]);
    }

    #[test]
    fn empty_coin_list_fails() {
        let err = assert_err!(select_coin_set_with_combined_balance_ge(&[], 0, &[]));
        assert_eq!(
            err,
            EstimatorError::CoinSelection {
                requested: 0,
                available: 0
            }
        );
    }

    #[test]
    fn insufficient_total_fails() {
        let coins = vec![Coin::native(4), Coin::native(5)];
        let err = assert_err!(select_coin_set_with_combined_balance_ge(&coins, 10, &[]));
        assert_eq!(
            err,
            EstimatorError::CoinSelection {
                requested: 10,
                available: 9
            }
        );
    }

    #[test]
    fn excluded_coins_are_skipped() {
        let coins = vec![
            Coin::native(100).with_object_id("0xa"),
            Coin::native(30).with_object_id("0xb"),
        ];
        let selected = assert_ok!(select_coin_set_with_combined_balance_ge(
            &coins,
            25,
            &["0xb".to_string()]
        ));
        assert_eq!(selected, vec![Coin::native(100).with_object_id("0xa")]);

        assert_err!(select_coin_set_with_combined_balance_ge(
            &coins,
            110,
            &["0xa".to_string()]
        ));
    }

    #[test]
    fn single_coin_selection() {
        let coins = vec![Coin::native(9), Coin::native(30), Coin::native(12)];
        assert_eq!(select_coin_with_balance_ge(&coins, 10), Some(Coin::native(12)));
        assert_eq!(select_coin_with_balance_ge(&coins, 31), None);
    }
}
