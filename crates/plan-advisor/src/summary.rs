//! Portfolio Summary
//!
//! Aggregate metrics over the plan's holdings. Pure functions of their
//! input; holding order never affects the result.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::{AdvisorError, Result};
use crate::model::{AssetClass, Holding};

/// Flat vested fraction of the balance.
///
/// A display placeholder, not a vesting schedule: there is no tenure or
/// contribution-date logic behind it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VestingPolicy {
    factor: Decimal,
}

impl VestingPolicy {
    pub const DEFAULT_FACTOR: Decimal = dec!(0.95);

    /// Factor must lie in `[0, 1]`
    pub fn new(factor: Decimal) -> Result<Self> {
        if factor < Decimal::ZERO || factor > Decimal::ONE {
            return Err(AdvisorError::InvalidVestingFactor(factor));
        }
        Ok(Self { factor })
    }

    pub fn factor(&self) -> Decimal {
        self.factor
    }

    pub fn vested(&self, balance: Decimal) -> Decimal {
        balance * self.factor
    }
}

impl Default for VestingPolicy {
    fn default() -> Self {
        Self { factor: Self::DEFAULT_FACTOR }
    }
}

/// Headline figures for the Summary tab
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    /// Sum of all balances
    pub total_balance: Decimal,

    /// Sum of `balance × change% / 100`
    pub total_change_amount: Decimal,

    /// Balance-weighted change; zero when the total balance is zero
    pub total_change_percent: Decimal,

    /// `total_balance × vesting factor`
    pub vested_balance: Decimal,
}

impl PortfolioSummary {
    pub fn from_holdings(holdings: &[Holding], policy: &VestingPolicy) -> Self {
        let total_balance: Decimal = holdings.iter().map(|h| h.balance).sum();
        let total_change_amount: Decimal = holdings.iter().map(Holding::change_amount).sum();

        let total_change_percent = if total_balance.is_zero() {
            Decimal::ZERO
        } else {
            total_change_amount / total_balance * Decimal::ONE_HUNDRED
        };

        Self {
            total_balance,
            total_change_amount,
            total_change_percent,
            vested_balance: policy.vested(total_balance),
        }
    }
}

/// Share of the balance held in one asset class
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationSlice {
    pub asset_class: AssetClass,
    pub balance: Decimal,
    pub percent: Decimal,
    pub holdings: usize,
}

/// Balance per asset class, largest first. Empty when the total is zero.
pub fn allocation_by_class(holdings: &[Holding]) -> Vec<AllocationSlice> {
    let total: Decimal = holdings.iter().map(|h| h.balance).sum();
    if total.is_zero() {
        return Vec::new();
    }

    let mut by_class: std::collections::BTreeMap<AssetClass, (Decimal, usize)> =
        std::collections::BTreeMap::new();
    for h in holdings {
        let entry = by_class.entry(h.asset_class).or_insert((Decimal::ZERO, 0));
        entry.0 += h.balance;
        entry.1 += 1;
    }

    let mut slices: Vec<AllocationSlice> = by_class
        .into_iter()
        .map(|(asset_class, (balance, count))| AllocationSlice {
            asset_class,
            balance,
            percent: balance / total * Decimal::ONE_HUNDRED,
            holdings: count,
        })
        .collect();

    slices.sort_by(|a, b| b.balance.cmp(&a.balance).then(a.asset_class.cmp(&b.asset_class)));
    slices
}

#[cfg(test)]
mod tests {
    use super::*;

    fn holding(id: &str, asset_class: AssetClass, balance: Decimal, change: Decimal) -> Holding {
        Holding {
            id: id.into(),
            name: format!("FUND {id}"),
            ticker: format!("T{id}"),
            asset_class,
            balance,
            units: balance,
            price: Decimal::ONE,
            change_percent: change,
        }
    }

    #[test]
    fn test_offsetting_changes() {
        let holdings = vec![
            holding("1", AssetClass::Stock, dec!(100), dec!(10)),
            holding("2", AssetClass::Bond, dec!(200), dec!(-5)),
        ];

        let summary = PortfolioSummary::from_holdings(&holdings, &VestingPolicy::default());
        assert_eq!(summary.total_balance, dec!(300));
        assert_eq!(summary.total_change_amount, Decimal::ZERO);
        assert_eq!(summary.total_change_percent, Decimal::ZERO);
        assert_eq!(summary.vested_balance, dec!(285));
    }

    #[test]
    fn test_order_independent() {
        let mut holdings = vec![
            holding("1", AssetClass::Stock, dec!(145230.50), dec!(1.2)),
            holding("2", AssetClass::Stock, dec!(42100.25), dec!(-0.4)),
            holding("3", AssetClass::Bond, dec!(25000), dec!(0.1)),
        ];
        let forward = PortfolioSummary::from_holdings(&holdings, &VestingPolicy::default());
        holdings.reverse();
        let backward = PortfolioSummary::from_holdings(&holdings, &VestingPolicy::default());

        assert_eq!(forward, backward);
        assert_eq!(forward.total_balance, dec!(212330.75));
    }

    #[test]
    fn test_zero_balance_guard() {
        let holdings = vec![holding("1", AssetClass::Stock, Decimal::ZERO, dec!(3))];
        let summary = PortfolioSummary::from_holdings(&holdings, &VestingPolicy::default());
        assert_eq!(summary.total_change_percent, Decimal::ZERO);

        let empty = PortfolioSummary::from_holdings(&[], &VestingPolicy::default());
        assert_eq!(empty.total_balance, Decimal::ZERO);
        assert_eq!(empty.vested_balance, Decimal::ZERO);
    }

    #[test]
    fn test_vesting_scales_linearly() {
        let holdings = vec![holding("1", AssetClass::Stock, dec!(1000), Decimal::ZERO)];

        let default = PortfolioSummary::from_holdings(&holdings, &VestingPolicy::default());
        assert_eq!(default.vested_balance, dec!(950));

        let half = VestingPolicy::new(dec!(0.5)).unwrap();
        assert_eq!(PortfolioSummary::from_holdings(&holdings, &half).vested_balance, dec!(500));

        let full = VestingPolicy::new(Decimal::ONE).unwrap();
        assert_eq!(PortfolioSummary::from_holdings(&holdings, &full).vested_balance, dec!(1000));
    }

    #[test]
    fn test_vesting_factor_bounds() {
        assert!(matches!(
            VestingPolicy::new(dec!(1.01)),
            Err(AdvisorError::InvalidVestingFactor(_))
        ));
        assert!(VestingPolicy::new(dec!(-0.1)).is_err());
        assert!(VestingPolicy::new(Decimal::ZERO).is_ok());
    }

    #[test]
    fn test_allocation_by_class() {
        let holdings = vec![
            holding("1", AssetClass::Stock, dec!(300), Decimal::ZERO),
            holding("2", AssetClass::Bond, dec!(100), Decimal::ZERO),
            holding("3", AssetClass::Stock, dec!(100), Decimal::ZERO),
        ];

        let slices = allocation_by_class(&holdings);
        assert_eq!(slices.len(), 2);
        assert_eq!(slices[0].asset_class, AssetClass::Stock);
        assert_eq!(slices[0].balance, dec!(400));
        assert_eq!(slices[0].percent, dec!(80));
        assert_eq!(slices[0].holdings, 2);
        assert_eq!(slices[1].percent, dec!(20));

        let total: Decimal = slices.iter().map(|s| s.percent).sum();
        assert_eq!(total, dec!(100));
    }

    #[test]
    fn test_allocation_empty_when_no_balance() {
        assert!(allocation_by_class(&[]).is_empty());
    }
}
