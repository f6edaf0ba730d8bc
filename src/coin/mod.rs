//! Coin objects and coin selection
//!
//! Coins arrive already normalized by the caller's RPC client; this module
//! only reads them.

mod selection;

pub use selection::{
    select_coin_set_with_combined_balance_ge, select_coin_with_balance_ge,
};

use serde::{Deserialize, Serialize};

/// Type tag of the chain's native gas currency
pub const NATIVE_COIN_TYPE: &str = "0x2::sui::SUI";

/// A balance-bearing coin object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coin {
    /// Object id, used for selection exclusions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_id: Option<String>,
    /// Full coin type tag, e.g. `0x2::sui::SUI`
    #[serde(rename = "type")]
    pub coin_type: String,
    pub balance: u64,
}

impl Coin {
    pub fn new(coin_type: impl Into<String>, balance: u64) -> Self {
        Self {
            object_id: None,
            coin_type: coin_type.into(),
            balance,
        }
    }

    /// Native coin with the given balance
    pub fn native(balance: u64) -> Self {
        Self::new(NATIVE_COIN_TYPE, balance)
    }

    pub fn with_object_id(mut self, object_id: impl Into<String>) -> Self {
        self.object_id = Some(object_id.into());
        self
    }

    /// Whether this coin is of the given native coin type
    pub fn is_native(&self, native_coin_type: &str) -> bool {
        self.coin_type == native_coin_type
    }
}

/// Sum of all balances
pub fn total_balance(coins: &[Coin]) -> u128 {
    coins.iter().map(|c| c.balance as u128).sum()
}

/// Coins sorted ascending by balance
pub fn sort_by_balance(coins: &[Coin]) -> Vec<Coin> {
    let mut sorted = coins.to_vec();
    sorted.sort_by_key(|c| c.balance);
    sorted
}

/// Largest balance held by a single coin of `coin_type`
pub fn max_balance_of_type(coins: &[Coin], coin_type: &str) -> Option<u64> {
    coins
        .iter()
        .filter(|c| c.coin_type == coin_type)
        .map(|c| c.balance)
        .max()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_balance_does_not_overflow() {
        let coins = vec![Coin::native(u64::MAX), Coin::native(u64::MAX)];
        assert_eq!(total_balance(&coins), 2 * u64::MAX as u128);
    }

    #[test]
    fn max_balance_ignores_other_types() {
        let coins = vec![
            Coin::native(40),
            Coin::new("0xabc::usdc::USDC", 9_000),
            Coin::native(75),
        ];
        assert_eq!(max_balance_of_type(&coins, NATIVE_COIN_TYPE), Some(75));
        assert_eq!(max_balance_of_type(&coins, "0x1::missing::X"), None);
    }

    #[test]
    fn coin_deserializes_from_rpc_shape() {
        let coin: Coin =
            serde_json::from_str(r#"{"objectId":"0x11","type":"0x2::sui::SUI","balance":42}"#)
                .unwrap();
        assert_eq!(coin, Coin::native(42).with_object_id("0x11"));
        assert!(coin.is_native(NATIVE_COIN_TYPE));
    }
}
