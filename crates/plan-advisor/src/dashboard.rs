//! Dashboard Tabs
//!
//! Tab selection and the per-tab view payloads. Views carry display-ready
//! strings so every client renders identical figures.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{AdvisorError, Result};
use crate::format;
use crate::model::{AccountSnapshot, Holding, PerformancePoint, PlanInfo, Transaction};
use crate::summary::{allocation_by_class, AllocationSlice, PortfolioSummary, VestingPolicy};

/// Holdings shown on the Summary tab
pub const SUMMARY_HOLDINGS: usize = 3;

/// Transactions shown on the Summary tab
pub const SUMMARY_TRANSACTIONS: usize = 4;

/// Fixed label on the Activity tab; the list itself is not filtered
pub const ACTIVITY_WINDOW_LABEL: &str = "Activity for the last 90 days";

/// Dashboard tab
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TabView {
    #[default]
    Summary,
    Investments,
    Activity,
    Analysis,
}

impl TabView {
    pub const ALL: [TabView; 4] = [
        TabView::Summary,
        TabView::Investments,
        TabView::Activity,
        TabView::Analysis,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TabView::Summary => "Summary",
            TabView::Investments => "Investments",
            TabView::Activity => "Activity",
            TabView::Analysis => "Analysis",
        }
    }
}

impl fmt::Display for TabView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TabView {
    type Err = AdvisorError;

    fn from_str(s: &str) -> Result<Self> {
        TabView::ALL
            .into_iter()
            .find(|tab| tab.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| AdvisorError::UnknownTab(s.to_string()))
    }
}

/// Sign of a change, for colouring
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Flat,
}

impl Trend {
    pub fn of(value: Decimal) -> Self {
        if value > Decimal::ZERO {
            Trend::Up
        } else if value < Decimal::ZERO {
            Trend::Down
        } else {
            Trend::Flat
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HoldingRow {
    pub id: String,
    pub name: String,
    pub ticker: String,
    pub asset_class: String,
    pub units: String,
    pub price: String,
    pub change: String,
    pub trend: Trend,
    pub balance: String,
}

impl From<&Holding> for HoldingRow {
    fn from(h: &Holding) -> Self {
        Self {
            id: h.id.clone(),
            name: h.name.clone(),
            ticker: h.ticker.clone(),
            asset_class: h.asset_class.to_string(),
            units: format::units(h.units),
            price: format::usd(h.price),
            change: format::change(h.change_percent),
            trend: Trend::of(h.change_percent),
            balance: format::usd(h.balance),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransactionRow {
    pub id: String,
    pub date: String,
    pub description: String,
    pub kind: String,
    pub amount: String,
    pub trend: Trend,
}

impl From<&Transaction> for TransactionRow {
    fn from(t: &Transaction) -> Self {
        Self {
            id: t.id.clone(),
            date: t.date.format("%Y-%m-%d").to_string(),
            description: t.description.clone(),
            kind: t.kind.to_string(),
            amount: format::usd(t.amount),
            trend: Trend::of(t.amount),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AllocationRow {
    pub asset_class: String,
    pub holdings: usize,
    pub balance: String,
    pub percent: String,
}

impl From<&AllocationSlice> for AllocationRow {
    fn from(s: &AllocationSlice) -> Self {
        Self {
            asset_class: s.asset_class.to_string(),
            holdings: s.holdings,
            balance: format::usd(s.balance),
            percent: format::percent(s.percent, 1),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SummaryView {
    pub plan: PlanInfo,
    pub summary: PortfolioSummary,
    pub total_balance: String,
    /// `+$2,284.17 (0.75%)`
    pub total_change: String,
    pub trend: Trend,
    pub vested_balance: String,
    pub top_holdings: Vec<HoldingRow>,
    pub recent_transactions: Vec<TransactionRow>,
    pub performance: Vec<PerformancePoint>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InvestmentsView {
    pub holdings: Vec<HoldingRow>,
    pub total_balance: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActivityView {
    pub window_label: String,
    pub transactions: Vec<TransactionRow>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnalysisView {
    pub allocation: Vec<AllocationRow>,
    pub total_balance: String,
}

/// Rendered content of one tab
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tab", rename_all = "lowercase")]
pub enum TabPayload {
    Summary(SummaryView),
    Investments(InvestmentsView),
    Activity(ActivityView),
    Analysis(AnalysisView),
}

impl TabPayload {
    pub fn tab(&self) -> TabView {
        match self {
            TabPayload::Summary(_) => TabView::Summary,
            TabPayload::Investments(_) => TabView::Investments,
            TabPayload::Activity(_) => TabView::Activity,
            TabPayload::Analysis(_) => TabView::Analysis,
        }
    }
}

/// Active tab plus the vesting policy used for the Summary figures
#[derive(Clone, Debug, Default)]
pub struct Dashboard {
    active: TabView,
    policy: VestingPolicy,
}

impl Dashboard {
    pub fn new(policy: VestingPolicy) -> Self {
        Self { active: TabView::default(), policy }
    }

    pub fn active(&self) -> TabView {
        self.active
    }

    pub fn policy(&self) -> &VestingPolicy {
        &self.policy
    }

    /// Make `tab` the single active tab
    pub fn select(&mut self, tab: TabView) {
        if self.active != tab {
            tracing::debug!(from = %self.active, to = %tab, "tab selected");
        }
        self.active = tab;
    }

    /// Render the active tab
    pub fn render_active(&self, snapshot: &AccountSnapshot) -> TabPayload {
        self.render(self.active, snapshot)
    }

    /// Render any tab. Does not change the selection.
    pub fn render(&self, tab: TabView, snapshot: &AccountSnapshot) -> TabPayload {
        match tab {
            TabView::Summary => TabPayload::Summary(self.summary_view(snapshot)),
            TabView::Investments => TabPayload::Investments(investments_view(snapshot)),
            TabView::Activity => TabPayload::Activity(activity_view(snapshot)),
            TabView::Analysis => TabPayload::Analysis(analysis_view(snapshot)),
        }
    }

    fn summary_view(&self, snapshot: &AccountSnapshot) -> SummaryView {
        let summary = PortfolioSummary::from_holdings(&snapshot.holdings, &self.policy);

        SummaryView {
            plan: snapshot.plan.clone(),
            total_balance: format::usd(summary.total_balance),
            total_change: format!(
                "{} ({})",
                format::signed_usd(summary.total_change_amount),
                format::percent(summary.total_change_percent, 2)
            ),
            trend: Trend::of(summary.total_change_amount),
            vested_balance: format::usd(summary.vested_balance),
            top_holdings: snapshot
                .holdings
                .iter()
                .take(SUMMARY_HOLDINGS)
                .map(HoldingRow::from)
                .collect(),
            recent_transactions: snapshot
                .recent_transactions(SUMMARY_TRANSACTIONS)
                .into_iter()
                .map(TransactionRow::from)
                .collect(),
            performance: snapshot.performance.clone(),
            summary,
        }
    }
}

fn total_balance(snapshot: &AccountSnapshot) -> String {
    format::usd(snapshot.holdings.iter().map(|h| h.balance).sum())
}

fn investments_view(snapshot: &AccountSnapshot) -> InvestmentsView {
    InvestmentsView {
        holdings: snapshot.holdings.iter().map(HoldingRow::from).collect(),
        total_balance: total_balance(snapshot),
    }
}

fn activity_view(snapshot: &AccountSnapshot) -> ActivityView {
    ActivityView {
        window_label: ACTIVITY_WINDOW_LABEL.into(),
        transactions: snapshot
            .recent_transactions(snapshot.transactions.len())
            .into_iter()
            .map(TransactionRow::from)
            .collect(),
    }
}

fn analysis_view(snapshot: &AccountSnapshot) -> AnalysisView {
    AnalysisView {
        allocation: allocation_by_class(&snapshot.holdings)
            .iter()
            .map(AllocationRow::from)
            .collect(),
        total_balance: total_balance(snapshot),
    }
}
