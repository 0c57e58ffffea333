//! Sample Account Data
//!
//! The static data set the dashboard and assistant run against. Built once
//! at startup and shared read-only.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::model::{
    AccountSnapshot, AssetClass, Holding, PerformancePoint, PlanInfo, Transaction,
    TransactionKind,
};

pub const PARTICIPANT_NAME: &str = "Alexander J. Investor";
pub const PLAN_NAME: &str = "ACME CORP 401(K) SAVINGS PLAN";
pub const PLAN_ID: &str = "84291-01";

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

#[allow(clippy::too_many_arguments)]
fn holding(
    id: &str,
    name: &str,
    ticker: &str,
    asset_class: AssetClass,
    balance: Decimal,
    units: Decimal,
    price: Decimal,
    change_percent: Decimal,
) -> Holding {
    Holding {
        id: id.into(),
        name: name.into(),
        ticker: ticker.into(),
        asset_class,
        balance,
        units,
        price,
        change_percent,
    }
}

fn transaction(
    id: &str,
    date: NaiveDate,
    description: &str,
    amount: Decimal,
    kind: TransactionKind,
) -> Transaction {
    Transaction {
        id: id.into(),
        date,
        description: description.into(),
        amount,
        kind,
    }
}

pub fn sample_holdings() -> Vec<Holding> {
    vec![
        holding("1", "FID 500 INDEX", "FXAIX", AssetClass::Stock,
            dec!(145230.50), dec!(842.12), dec!(172.46), dec!(1.2)),
        holding("2", "VANGUARD TOT INTL", "VXUS", AssetClass::Stock,
            dec!(42100.25), dec!(750.45), dec!(56.10), dec!(-0.4)),
        holding("3", "FID US BOND IDX", "FXNAX", AssetClass::Bond,
            dec!(25000.00), dec!(2314.81), dec!(10.80), dec!(0.1)),
        holding("4", "TRP RETIRE 2050", "TRRMX", AssetClass::Blended,
            dec!(85600.75), dec!(3200.15), dec!(26.75), dec!(0.8)),
        holding("5", "GOVT CASH RSRVS", "FDRXX", AssetClass::ShortTerm,
            dec!(5000.00), dec!(5000.00), dec!(1.00), dec!(0.0)),
    ]
}

pub fn sample_transactions() -> Vec<Transaction> {
    use TransactionKind::*;

    vec![
        transaction("t1", date(2023, 10, 27), "EMPLOYEE DEFERRAL", dec!(850.00), Contribution),
        transaction("t2", date(2023, 10, 27), "EMPLOYER MATCH", dec!(425.00), Contribution),
        transaction("t3", date(2023, 10, 13), "EMPLOYEE DEFERRAL", dec!(850.00), Contribution),
        transaction("t4", date(2023, 10, 13), "EMPLOYER MATCH", dec!(425.00), Contribution),
        transaction("t5", date(2023, 9, 30), "DIVIDEND REINVESTMENT", dec!(1240.50), GainLoss),
        transaction("t6", date(2023, 9, 15), "RECORDKEEPING FEE", dec!(-12.50), Fee),
    ]
}

pub fn sample_performance() -> Vec<PerformancePoint> {
    [
        ("Jan", dec!(245000)),
        ("Feb", dec!(248000)),
        ("Mar", dec!(246500)),
        ("Apr", dec!(252000)),
        ("May", dec!(258000)),
        ("Jun", dec!(265000)),
        ("Jul", dec!(270000)),
        ("Aug", dec!(268000)),
        ("Sep", dec!(262000)),
        ("Oct", dec!(275000)),
        ("Nov", dec!(289000)),
        ("Dec", dec!(302931)),
    ]
    .into_iter()
    .map(|(period, balance)| PerformancePoint { period: period.into(), balance })
    .collect()
}

/// The full sample account
pub fn sample_snapshot() -> AccountSnapshot {
    AccountSnapshot {
        plan: PlanInfo {
            participant_name: PARTICIPANT_NAME.into(),
            plan_name: PLAN_NAME.into(),
            plan_id: PLAN_ID.into(),
        },
        holdings: sample_holdings(),
        transactions: sample_transactions(),
        performance: sample_performance(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summary::{PortfolioSummary, VestingPolicy};

    #[test]
    fn test_dates_are_valid() {
        let default = NaiveDate::default();
        assert!(sample_transactions().iter().all(|t| t.date != default));
    }

    #[test]
    fn test_sample_totals() {
        let snapshot = sample_snapshot();
        let summary = PortfolioSummary::from_holdings(&snapshot.holdings, &VestingPolicy::default());

        assert_eq!(summary.total_balance, dec!(302931.50));
        assert_eq!(summary.total_change_amount, dec!(2284.171));
        assert_eq!(summary.vested_balance, dec!(287784.925));
    }

    #[test]
    fn test_recent_transactions_keep_fixture_order_on_ties() {
        let snapshot = sample_snapshot();
        let ids: Vec<&str> = snapshot
            .recent_transactions(3)
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(ids, ["t1", "t2", "t3"]);
    }

    #[test]
    fn test_performance_series() {
        let series = sample_performance();
        assert_eq!(series.len(), 12);
        assert_eq!(series[0].balance, dec!(245000));
        assert_eq!(series[11].period, "Dec");
    }
}
