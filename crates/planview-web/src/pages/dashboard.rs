//! Dashboard Page

use leptos::prelude::*;

use crate::api::{self, PlanInfo, RequestSeq, Tab, TabPayload};
use crate::components::{AllocationList, HoldingsTable, PerformanceBars, TabBar, TransactionList};
use crate::pages::AssistantWidget;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let (tab, set_tab) = signal(Tab::default());
    let (plan, set_plan) = signal(None::<PlanInfo>);
    let (payload, set_payload) = signal(None::<Result<TabPayload, String>>);

    leptos::task::spawn_local(async move {
        if let Ok(info) = api::fetch_account().await {
            set_plan.set(Some(info));
        }
    });

    // Refetch whenever the active tab changes; only the newest response lands
    let seq = StoredValue::new(RequestSeq::default());
    Effect::new(move |_| {
        let current = tab.get();
        let mut ticket = 0;
        seq.update_value(|s| ticket = s.issue());
        set_payload.set(None);
        leptos::task::spawn_local(async move {
            let result = api::fetch_view(current).await;
            if seq.with_value(|s| s.is_latest(ticket)) {
                set_payload.set(Some(result));
            }
        });
    });

    view! {
        <div class="dashboard">
            <header class="page-title">
                {move || plan.get().map(|p| view! {
                    <h1>{p.plan_name}</h1>
                    <p class="muted">{format!("Plan ID: {}", p.plan_id)}</p>
                })}
            </header>

            <TabBar active=tab on_select=set_tab />

            <section class="tab-content">
                {move || match payload.get() {
                    None => view! { <p class="loading">"Loading..."</p> }.into_any(),
                    Some(Err(e)) => view! { <p class="error">{e}</p> }.into_any(),
                    Some(Ok(payload)) => render_payload(payload, set_tab),
                }}
            </section>

            <AssistantWidget />
        </div>
    }
}

fn render_payload(payload: TabPayload, set_tab: WriteSignal<Tab>) -> AnyView {
    match payload {
        TabPayload::Summary(view) => view! {
            <div class="summary">
                <div class="cards">
                    <div class="card">
                        <p class="muted">"Total Balance"</p>
                        <p class="figure">{view.total_balance}</p>
                        <p class=view.trend.class()>{view.total_change}</p>
                    </div>
                    <div class="card">
                        <p class="muted">"Vested Balance"</p>
                        <p class="figure">{view.vested_balance}</p>
                    </div>
                </div>

                <div class="card">
                    <h3>"Balance History"</h3>
                    <PerformanceBars points=view.performance />
                </div>

                <div class="card">
                    <div class="card-header">
                        <h3>"Investments"</h3>
                        <button class="link" on:click=move |_| set_tab.set(Tab::Investments)>"View all"</button>
                    </div>
                    <HoldingsTable holdings=view.top_holdings />
                </div>

                <div class="card">
                    <div class="card-header">
                        <h3>"Recent Activity"</h3>
                        <button class="link" on:click=move |_| set_tab.set(Tab::Activity)>"View all"</button>
                    </div>
                    <TransactionList transactions=view.recent_transactions />
                </div>
            </div>
        }
        .into_any(),

        TabPayload::Investments(view) => view! {
            <div class="card">
                <h2>"Investments"</h2>
                <HoldingsTable holdings=view.holdings total=view.total_balance />
            </div>
        }
        .into_any(),

        TabPayload::Activity(view) => view! {
            <div class="card">
                <h2>"Transaction History"</h2>
                <p class="muted">{view.window_label}</p>
                <TransactionList transactions=view.transactions />
            </div>
        }
        .into_any(),

        TabPayload::Analysis(view) => view! {
            <div class="card">
                <h2>"Portfolio Analysis"</h2>
                <p class="muted">{format!("Asset allocation of {}", view.total_balance)}</p>
                <AllocationList allocation=view.allocation />
            </div>
        }
        .into_any(),
    }
}
