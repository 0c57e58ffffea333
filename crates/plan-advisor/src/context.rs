//! Assistant Context
//!
//! Builds the system instruction the assistant sends with every request:
//! persona, a plain-text summary of the account, goals and constraints.
//!
//! ```text
//! User Name: Alexander J. Investor
//! Plan Name: ACME CORP 401(K) SAVINGS PLAN
//! Total Balance: $302,931.50
//!
//! Holdings:
//! - FID 500 INDEX (FXAIX): $145,230.50 (Stock)
//! ...
//!
//! Recent Transactions:
//! - 2023-10-27: EMPLOYEE DEFERRAL $850.00
//! ...
//! ```

use std::fmt::Write;

use agent_core::{AssistantConfig, GenerationOptions, DEFAULT_FALLBACK_REPLY};
use rust_decimal::Decimal;

use crate::format;
use crate::model::{AccountSnapshot, PlanInfo};

/// Name the assistant introduces itself with
pub const DEFAULT_PERSONA: &str = "Planview Virtual Assistant";

/// Transactions included in the context
pub const CONTEXT_TRANSACTIONS: usize = 3;

const GOALS: &str = r#"Your goal is to explain financial concepts, help users understand their 401(k) performance, and define terms like "Vesting", "Expense Ratio", or "Asset Allocation"."#;

const CONSTRAINTS: &str = r#"Tone: Professional, reassuring, clear, and concise.
Do not give specific investment advice (e.g., "Buy stock X"). Instead, explain principles (e.g., "Diversification helps manage risk").
If asked about specific account actions (withdrawals, loans), explain the general rules but advise checking the plan document.

Keep responses relatively short (under 150 words) unless asked for a detailed explanation."#;

/// Plain-text account summary for the model
pub fn context_blob(snapshot: &AccountSnapshot) -> String {
    let total: Decimal = snapshot.holdings.iter().map(|h| h.balance).sum();

    let mut out = String::new();
    let _ = writeln!(out, "User Name: {}", snapshot.plan.participant_name);
    let _ = writeln!(out, "Plan Name: {}", snapshot.plan.plan_name);
    let _ = writeln!(out, "Total Balance: {}", format::usd(total));

    out.push_str("\nHoldings:\n");
    for h in &snapshot.holdings {
        let _ = writeln!(
            out,
            "- {} ({}): {} ({})",
            h.name,
            h.ticker,
            format::usd(h.balance),
            h.asset_class
        );
    }

    out.push_str("\nRecent Transactions:\n");
    for t in snapshot.recent_transactions(CONTEXT_TRANSACTIONS) {
        let _ = writeln!(
            out,
            "- {}: {} {}",
            t.date.format("%Y-%m-%d"),
            t.description,
            format::usd(t.amount)
        );
    }

    out
}

/// Full system instruction: persona, context, goals, constraints
pub fn system_instruction(persona: &str, snapshot: &AccountSnapshot) -> String {
    format!(
        "You are \"{persona}\", a helpful, professional, and secure financial assistant \
         for the plan dashboard.\n\nUser Context:\n{context}\n{GOALS}\n\n{CONSTRAINTS}",
        context = context_blob(snapshot),
    )
}

/// First assistant turn of a new session
pub fn greeting(persona: &str, plan: &PlanInfo) -> String {
    format!(
        "Hello {}! I'm your {}. I can help you understand your {} account, explain \
         financial terms, or analyze your current holdings. How can I assist you today?",
        plan.first_name(),
        persona,
        plan.plan_name
    )
}

/// Assistant configuration for this account
pub fn assistant_config(
    snapshot: &AccountSnapshot,
    generation: GenerationOptions,
    history_window: usize,
) -> AssistantConfig {
    AssistantConfig {
        system_prompt: system_instruction(DEFAULT_PERSONA, snapshot),
        history_window,
        generation,
        fallback_reply: DEFAULT_FALLBACK_REPLY.into(),
        greeting: Some(greeting(DEFAULT_PERSONA, &snapshot.plan)),
    }
}
