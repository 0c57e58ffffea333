//! UI Components

use leptos::prelude::*;

use crate::api::{AllocationRow, ChatMessage, HoldingRow, PerformancePoint, Tab, TransactionRow};

/// Message bubble component
#[component]
pub fn MessageBubble(message: ChatMessage) -> impl IntoView {
    let class = format!("message message-{}", message.role);

    view! {
        <div class=class>
            <p class="content">{message.content}</p>
        </div>
    }
}

/// Single-selection tab bar
#[component]
pub fn TabBar(active: ReadSignal<Tab>, on_select: WriteSignal<Tab>) -> impl IntoView {
    view! {
        <nav class="tabs" aria-label="Tabs">
            {Tab::ALL
                .into_iter()
                .map(|tab| {
                    view! {
                        <button
                            class="tab"
                            class:active=move || active.get() == tab
                            on:click=move |_| on_select.set(tab)
                        >
                            {tab.label()}
                        </button>
                    }
                })
                .collect_view()}
        </nav>
    }
}

#[component]
pub fn HoldingsTable(
    holdings: Vec<HoldingRow>,
    #[prop(optional)] total: Option<String>,
) -> impl IntoView {
    view! {
        <table class="holdings">
            <thead>
                <tr>
                    <th>"Name / Ticker"</th>
                    <th>"Asset Class"</th>
                    <th class="num">"Units"</th>
                    <th class="num">"Price"</th>
                    <th class="num">"Change"</th>
                    <th class="num">"Balance"</th>
                </tr>
            </thead>
            <tbody>
                {holdings
                    .into_iter()
                    .map(|h| {
                        view! {
                            <tr>
                                <td>
                                    <span class="fund">{h.name}</span>
                                    <span class="ticker">{h.ticker}</span>
                                </td>
                                <td><span class="badge">{h.asset_class}</span></td>
                                <td class="num">{h.units}</td>
                                <td class="num">{h.price}</td>
                                <td class=format!("num {}", h.trend.class())>{h.change}</td>
                                <td class="num strong">{h.balance}</td>
                            </tr>
                        }
                    })
                    .collect_view()}
            </tbody>
            {total.map(|total| view! {
                <tfoot>
                    <tr>
                        <td colspan="5" class="num strong">"Total Account Balance:"</td>
                        <td class="num strong">{total}</td>
                    </tr>
                </tfoot>
            })}
        </table>
    }
}

#[component]
pub fn TransactionList(transactions: Vec<TransactionRow>) -> impl IntoView {
    view! {
        <table class="transactions">
            <thead>
                <tr>
                    <th>"Date"</th>
                    <th>"Description"</th>
                    <th>"Type"</th>
                    <th class="num">"Amount"</th>
                </tr>
            </thead>
            <tbody>
                {transactions
                    .into_iter()
                    .map(|t| {
                        view! {
                            <tr>
                                <td>{t.date}</td>
                                <td>{t.description}</td>
                                <td><span class="badge">{t.kind}</span></td>
                                <td class=format!("num {}", t.trend.class())>{t.amount}</td>
                            </tr>
                        }
                    })
                    .collect_view()}
            </tbody>
        </table>
    }
}

/// Monthly balances as horizontal bars scaled to the largest value
#[component]
pub fn PerformanceBars(points: Vec<PerformancePoint>) -> impl IntoView {
    let values: Vec<f64> = points
        .iter()
        .map(|p| p.balance.parse::<f64>().unwrap_or(0.0))
        .collect();
    let max = values.iter().copied().fold(0.0_f64, f64::max);

    view! {
        <div class="performance">
            {points
                .into_iter()
                .zip(values)
                .map(|(point, value)| {
                    let width = if max > 0.0 { value / max * 100.0 } else { 0.0 };
                    view! {
                        <div class="bar-row">
                            <span class="period">{point.period}</span>
                            <div class="bar" style=format!("width: {width:.1}%")></div>
                        </div>
                    }
                })
                .collect_view()}
        </div>
    }
}

#[component]
pub fn AllocationList(allocation: Vec<AllocationRow>) -> impl IntoView {
    view! {
        <ul class="allocation">
            {allocation
                .into_iter()
                .map(|row| {
                    view! {
                        <li>
                            <span class="class">{row.asset_class}</span>
                            <span class="count">{format!("{} holdings", row.holdings)}</span>
                            <span class="num">{row.balance}</span>
                            <span class="num strong">{row.percent}</span>
                        </li>
                    }
                })
                .collect_view()}
        </ul>
    }
}
