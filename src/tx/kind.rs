//! Transaction kinds the estimator understands

use crate::coin::Coin;
use crate::error::EstimatorError;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Parameters shared by the pay-style kinds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayParams {
    /// All the coins of the type being sent
    pub coins: Vec<Coin>,
    /// Amount to send
    pub amount: u64,
}

/// A transaction to budget, carrying only what its estimate needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum TransactionKind {
    #[serde(alias = "mergeCoin")]
    MergeCoins,
    #[serde(alias = "moveCall")]
    MoveCall,
    Pay(PayParams),
    #[serde(alias = "paySui")]
    PayNative(PayParams),
    #[serde(alias = "payAllSui")]
    PayAllNative(PayParams),
    Publish,
    #[serde(alias = "splitCoin")]
    SplitCoin,
    #[serde(alias = "transferObject")]
    TransferObject,
    #[serde(alias = "transferSui")]
    TransferNative,
}

impl TransactionKind {
    pub fn tag(&self) -> TxKindTag {
        match self {
            TransactionKind::MergeCoins => TxKindTag::MergeCoins,
            TransactionKind::MoveCall => TxKindTag::MoveCall,
            TransactionKind::Pay(_) => TxKindTag::Pay,
            TransactionKind::PayNative(_) => TxKindTag::PayNative,
            TransactionKind::PayAllNative(_) => TxKindTag::PayAllNative,
            TransactionKind::Publish => TxKindTag::Publish,
            TransactionKind::SplitCoin => TxKindTag::SplitCoin,
            TransactionKind::TransferObject => TxKindTag::TransferObject,
            TransactionKind::TransferNative => TxKindTag::TransferNative,
        }
    }

    /// Pay parameters for the pay-style kinds
    pub fn pay_params(&self) -> Option<&PayParams> {
        match self {
            TransactionKind::Pay(params)
            | TransactionKind::PayNative(params)
            | TransactionKind::PayAllNative(params) => Some(params),
            _ => None,
        }
    }
}

/// Parameterless transaction kind, as it appears in string tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TxKindTag {
    MergeCoins,
    MoveCall,
    Pay,
    PayNative,
    PayAllNative,
    Publish,
    SplitCoin,
    TransferObject,
    TransferNative,
}

impl TxKindTag {
    pub const ALL: [TxKindTag; 9] = [
        TxKindTag::MergeCoins,
        TxKindTag::MoveCall,
        TxKindTag::Pay,
        TxKindTag::PayNative,
        TxKindTag::PayAllNative,
        TxKindTag::Publish,
        TxKindTag::SplitCoin,
        TxKindTag::TransferObject,
        TxKindTag::TransferNative,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TxKindTag::MergeCoins => "merge-coins",
            TxKindTag::MoveCall => "move-call",
            TxKindTag::Pay => "pay",
            TxKindTag::PayNative => "pay-native",
            TxKindTag::PayAllNative => "pay-all-native",
            TxKindTag::Publish => "publish",
            TxKindTag::SplitCoin => "split-coin",
            TxKindTag::TransferObject => "transfer-object",
            TxKindTag::TransferNative => "transfer-native",
        }
    }
}

impl fmt::Display for TxKindTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TxKindTag {
    type Err = EstimatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = match s {
            "merge-coins" | "mergeCoin" => TxKindTag::MergeCoins,
            "move-call" | "moveCall" => TxKindTag::MoveCall,
            "pay" => TxKindTag::Pay,
            "pay-native" | "paySui" => TxKindTag::PayNative,
            "pay-all-native" | "payAllSui" => TxKindTag::PayAllNative,
            "publish" => TxKindTag::Publish,
            "split-coin" | "splitCoin" => TxKindTag::SplitCoin,
            "transfer-object" | "transferObject" => TxKindTag::TransferObject,
            "transfer-native" | "transferSui" => TxKindTag::TransferNative,
            other => return Err(EstimatorError::UnknownKind(other.to_string())),
        };
        Ok(tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_round_trip_through_display() {
        for tag in TxKindTag::ALL {
            assert_eq!(tag.as_str().parse::<TxKindTag>().unwrap(), tag);
        }
    }

    #[test]
    fn legacy_sdk_names_are_accepted() {
        assert_eq!("paySui".parse::<TxKindTag>().unwrap(), TxKindTag::PayNative);
        assert_eq!(
            "transferSui".parse::<TxKindTag>().unwrap(),
            TxKindTag::TransferNative
        );
    }

    #[test]
    fn unknown_tag_is_rejected() {
        assert_eq!(
            "stake".parse::<TxKindTag>(),
            Err(EstimatorError::UnknownKind("stake".to_string()))
        );
    }

    #[test]
    fn pay_variant_deserializes_with_params() {
        let kind: TransactionKind = serde_json::from_str(
            r#"{"kind":"paySui","coins":[{"type":"0x2::sui::SUI","balance":10}],"amount":4}"#,
        )
        .unwrap();
        assert_eq!(kind.tag(), TxKindTag::PayNative);
        assert_eq!(kind.pay_params().map(|p| p.amount), Some(4));

        let kind: TransactionKind = serde_json::from_str(r#"{"kind":"publish"}"#).unwrap();
        assert_eq!(kind, TransactionKind::Publish);
        assert!(kind.pay_params().is_none());
    }
}
