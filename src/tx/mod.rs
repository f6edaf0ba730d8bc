//! Transaction kinds and gas budget estimation

mod gas;
mod kind;

pub use gas::{
    is_insufficient_gas, EstimationMode, GasEstimator, GasSchedule, DEFAULT_CALL_GAS_BUDGET,
    DEFAULT_TRANSFER_GAS_BUDGET, MAX_GAS_BUDGET, MIN_GAS_BUDGET, PAY_GAS_FEE_PER_COIN,
};
pub use kind::{PayParams, TransactionKind, TxKindTag};
