//! Gas budget estimation for wallet transactions

use crate::coin::{self, Coin, NATIVE_COIN_TYPE};
use crate::error::{EstimatorError, EstimatorResult};
use crate::tx::{PayParams, TransactionKind};

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Smallest budget ever proposed
pub const MIN_GAS_BUDGET: u64 = 10;
/// Largest budget ever proposed
pub const MAX_GAS_BUDGET: u64 = 1_000_000;
/// Fee charged per input coin of a pay transaction
pub const PAY_GAS_FEE_PER_COIN: u64 = 150;
/// Budget for calls, publishes, merges and splits
pub const DEFAULT_CALL_GAS_BUDGET: u64 = 10_000;
/// Budget for plain object and native transfers
pub const DEFAULT_TRANSFER_GAS_BUDGET: u64 = 100;

/// Whether the budget is for a transaction expected to succeed, or for
/// simulating one expected to fail.
///
/// An error probe skips every adjustment that caps the budget to what the
/// wallet can pay, so the simulation reports the real failure instead of an
/// out-of-gas one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EstimationMode {
    #[default]
    Normal,
    ErrorProbe,
}

impl EstimationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            EstimationMode::Normal => "normal",
            EstimationMode::ErrorProbe => "error_probe",
        }
    }
}

/// Constants driving the estimate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GasSchedule {
    pub native_coin_type: String,
    pub min_budget: u64,
    pub max_budget: u64,
    pub pay_fee_per_coin: u64,
    pub call_budget: u64,
    pub transfer_budget: u64,
}

impl GasSchedule {
    pub fn validate(&self) -> EstimatorResult<()> {
        if self.native_coin_type.is_empty() {
            return Err(EstimatorError::Config(
                "native coin type must not be empty".to_string(),
            ));
        }
        if self.min_budget == 0 {
            return Err(EstimatorError::Config(
                "min budget must be at least 1".to_string(),
            ));
        }
        if self.min_budget > self.max_budget {
            return Err(EstimatorError::Config(format!(
                "min budget {} exceeds max budget {}",
                self.min_budget, self.max_budget
            )));
        }
        Ok(())
    }
}

impl Default for GasSchedule {
    fn default() -> Self {
        Self {
            native_coin_type: NATIVE_COIN_TYPE.to_string(),
            min_budget: MIN_GAS_BUDGET,
            max_budget: MAX_GAS_BUDGET,
            pay_fee_per_coin: PAY_GAS_FEE_PER_COIN,
            call_budget: DEFAULT_CALL_GAS_BUDGET,
            transfer_budget: DEFAULT_TRANSFER_GAS_BUDGET,
        }
    }
}

/// Gas budget estimator for wallet transactions
#[derive(Debug, Clone, Default)]
pub struct GasEstimator {
    schedule: GasSchedule,
}

impl GasEstimator {
    /// Create an estimator with the protocol default schedule
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an estimator with a custom schedule
    pub fn with_schedule(schedule: GasSchedule) -> EstimatorResult<Self> {
        schedule.validate()?;
        Ok(Self { schedule })
    }

    pub fn schedule(&self) -> &GasSchedule {
        &self.schedule
    }

    /// Budget for a transaction expected to succeed.
    ///
    /// `max_gas_coin_balance` is the largest single gas coin the wallet holds;
    /// `None` while it is unknown, in which case it does not cap the budget.
    pub fn estimate(
        &self,
        kind: &TransactionKind,
        max_gas_coin_balance: Option<u64>,
    ) -> EstimatorResult<u64> {
        self.estimate_with_mode(kind, EstimationMode::Normal, max_gas_coin_balance)
    }

    /// Budget for simulating a transaction expected to fail
    pub fn estimate_for_error_probe(&self, kind: &TransactionKind) -> EstimatorResult<u64> {
        self.estimate_with_mode(kind, EstimationMode::ErrorProbe, None)
    }

    pub fn estimate_with_mode(
        &self,
        kind: &TransactionKind,
        mode: EstimationMode,
        max_gas_coin_balance: Option<u64>,
    ) -> EstimatorResult<u64> {
        let guess = match kind {
            TransactionKind::MergeCoins
            | TransactionKind::MoveCall
            | TransactionKind::Publish
            | TransactionKind::SplitCoin => self.schedule.call_budget,
            TransactionKind::TransferObject | TransactionKind::TransferNative => {
                self.schedule.transfer_budget
            }
            TransactionKind::Pay(params)
            | TransactionKind::PayNative(params)
            | TransactionKind::PayAllNative(params) => self.pay_budget_guess(params, mode)?,
        };

        let mut budget = guess.min(self.schedule.max_budget);
        if mode == EstimationMode::Normal {
            if let Some(max_balance) = max_gas_coin_balance {
                budget = budget.min(max_balance);
            }
        }
        let budget = budget.max(self.schedule.min_budget);

        debug!(
            "Gas budget for {} ({}): guess {}, final {}",
            kind.tag(),
            mode.as_str(),
            guess,
            budget
        );
        Ok(budget)
    }

    /// Guess for a pay transaction, before the final clamp
    fn pay_budget_guess(&self, params: &PayParams, mode: EstimationMode) -> EstimatorResult<u64> {
        let PayParams { coins, amount } = params;
        let coin_type = homogeneous_coin_type(coins, *amount)?;

        let num_input_coins =
            coin::select_coin_set_with_combined_balance_ge(coins, *amount, &[])?.len() as u64;
        // fee * clamp(n / 2, 2, 100), kept in integers
        let mut guess = (self
            .schedule
            .pay_fee_per_coin
            .saturating_mul(num_input_coins.clamp(4, 200))
            / 2)
        .min(self.schedule.max_budget);

        if coin_type == self.schedule.native_coin_type && mode == EstimationMode::Normal {
            // balance must cover amount + gas, otherwise lower the budget
            let total = coin::total_balance(coins);
            let needed = *amount as u128 + guess as u128;
            if total < needed {
                let spendable = total.saturating_sub(*amount as u128);
                guess = u64::try_from(spendable)
                    .unwrap_or(u64::MAX)
                    .max(self.schedule.min_budget);
            }
        }

        Ok(guess)
    }
}

/// Whether the largest gas coin cannot cover `gas_budget` on its own.
///
/// `None` when either side is still unknown.
pub fn is_insufficient_gas(max_gas_coin_balance: Option<u64>, gas_budget: Option<u64>) -> Option<bool> {
    match (max_gas_coin_balance, gas_budget) {
        (Some(balance), Some(budget)) => Some(balance < budget),
        _ => None,
    }
}

/// Coin type shared by every coin in a pay transaction
fn homogeneous_coin_type(coins: &[Coin], amount: u64) -> EstimatorResult<&str> {
    let Some(first) = coins.first() else {
        return Err(EstimatorError::CoinSelection {
            requested: amount,
            available: 0,
        });
    };
    if let Some(other) = coins.iter().find(|c| c.coin_type != first.coin_type) {
        return Err(EstimatorError::MixedCoinTypes {
            expected: first.coin_type.clone(),
            found: other.coin_type.clone(),
        });
    }
    Ok(&first.coin_type)
}
