//! Domain Models
//!
//! Plan participant data: holdings, transactions and the balance history.
//! Uses `rust_decimal` for all monetary values - never use f64 for money!

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Asset class of a plan fund
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AssetClass {
    Stock,
    Bond,
    Blended,
    #[serde(rename = "Short Term")]
    ShortTerm,
}

impl AssetClass {
    pub fn label(self) -> &'static str {
        match self {
            AssetClass::Stock => "Stock",
            AssetClass::Bond => "Bond",
            AssetClass::Blended => "Blended",
            AssetClass::ShortTerm => "Short Term",
        }
    }
}

impl std::fmt::Display for AssetClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A position in one plan fund
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    pub id: String,

    /// Fund display name (e.g., "FID 500 INDEX")
    pub name: String,

    /// Ticker symbol (e.g., "FXAIX")
    pub ticker: String,

    pub asset_class: AssetClass,

    /// Current balance in USD
    pub balance: Decimal,

    /// Units held
    pub units: Decimal,

    /// Unit price in USD
    pub price: Decimal,

    /// Percentage change for the period (1.2 means +1.2%)
    pub change_percent: Decimal,
}

impl Holding {
    /// `units × price`; the balance should be close to this but is not forced to match
    pub fn implied_balance(&self) -> Decimal {
        self.units * self.price
    }

    /// Difference between the stated balance and `units × price`
    pub fn balance_drift(&self) -> Decimal {
        self.balance - self.implied_balance()
    }

    /// Dollar change implied by the percentage change
    pub fn change_amount(&self) -> Decimal {
        self.balance * self.change_percent / Decimal::ONE_HUNDRED
    }
}

/// Kind of account activity
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    Contribution,
    #[serde(rename = "Gain/Loss")]
    GainLoss,
    Fee,
    Transfer,
}

impl TransactionKind {
    pub fn label(self) -> &'static str {
        match self {
            TransactionKind::Contribution => "Contribution",
            TransactionKind::GainLoss => "Gain/Loss",
            TransactionKind::Fee => "Fee",
            TransactionKind::Transfer => "Transfer",
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A posted account transaction. Immutable once created.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub date: NaiveDate,
    pub description: String,

    /// Signed amount in USD (fees are negative)
    pub amount: Decimal,

    pub kind: TransactionKind,
}

/// Month-end balance in the yearly history series
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PerformancePoint {
    /// Period label (e.g., "Jan")
    pub period: String,
    pub balance: Decimal,
}

/// Plan and participant identity
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlanInfo {
    pub participant_name: String,
    pub plan_name: String,
    pub plan_id: String,
}

impl PlanInfo {
    /// First word of the participant name
    pub fn first_name(&self) -> &str {
        self.participant_name
            .split_whitespace()
            .next()
            .unwrap_or(&self.participant_name)
    }
}

/// Everything the dashboard and assistant read. Loaded once, never mutated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AccountSnapshot {
    pub plan: PlanInfo,
    pub holdings: Vec<Holding>,
    pub transactions: Vec<Transaction>,
    pub performance: Vec<PerformancePoint>,
}

impl AccountSnapshot {
    /// Transactions newest first; equal dates keep their original order
    pub fn recent_transactions(&self, limit: usize) -> Vec<&Transaction> {
        let mut sorted: Vec<&Transaction> = self.transactions.iter().collect();
        sorted.sort_by(|a, b| b.date.cmp(&a.date));
        sorted.truncate(limit);
        sorted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn holding(balance: Decimal, units: Decimal, price: Decimal) -> Holding {
        Holding {
            id: "1".into(),
            name: "FID 500 INDEX".into(),
            ticker: "FXAIX".into(),
            asset_class: AssetClass::Stock,
            balance,
            units,
            price,
            change_percent: dec!(1.2),
        }
    }

    #[test]
    fn test_balance_drift_is_advisory() {
        let h = holding(dec!(145230.50), dec!(842.12), dec!(172.46));
        assert_eq!(h.implied_balance(), dec!(145232.0152));
        assert_eq!(h.balance_drift(), dec!(-1.5152));
    }

    #[test]
    fn test_change_amount() {
        let h = holding(dec!(1000), dec!(10), dec!(100));
        assert_eq!(h.change_amount(), dec!(12));
    }

    #[test]
    fn test_labels_match_serde_names() {
        assert_eq!(serde_json::to_string(&AssetClass::ShortTerm).unwrap(), "\"Short Term\"");
        assert_eq!(serde_json::to_string(&TransactionKind::GainLoss).unwrap(), "\"Gain/Loss\"");
        assert_eq!(AssetClass::ShortTerm.to_string(), "Short Term");
        assert_eq!(TransactionKind::GainLoss.to_string(), "Gain/Loss");
    }

    #[test]
    fn test_first_name() {
        let plan = PlanInfo {
            participant_name: "Alexander J. Investor".into(),
            plan_name: "ACME CORP 401(K) SAVINGS PLAN".into(),
            plan_id: "84291-01".into(),
        };
        assert_eq!(plan.first_name(), "Alexander");
    }
}
