//! Gas budget estimation for Sui wallet transactions
//!
//! Given a transaction kind and the coins funding it, proposes a gas budget
//! bounded by the protocol minimum and maximum. The `api` module serves the
//! estimator over HTTP for wallet and explorer front-ends.

pub mod api;
pub mod coin;
pub mod config;
pub mod error;
pub mod metrics;
pub mod tx;

pub use coin::{Coin, NATIVE_COIN_TYPE};
pub use error::{EstimatorError, EstimatorResult};
pub use tx::{EstimationMode, GasEstimator, GasSchedule, PayParams, TransactionKind, TxKindTag};
