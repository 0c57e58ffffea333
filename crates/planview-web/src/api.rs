//! API Client

use serde::{Deserialize, Serialize};

/// Dashboard tab, as named in `/api/views/{tab}`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Summary,
    Investments,
    Activity,
    Analysis,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Summary, Tab::Investments, Tab::Activity, Tab::Analysis];

    pub fn label(self) -> &'static str {
        match self {
            Tab::Summary => "Summary",
            Tab::Investments => "Investments",
            Tab::Activity => "Activity",
            Tab::Analysis => "Analysis",
        }
    }

    fn slug(self) -> &'static str {
        match self {
            Tab::Summary => "summary",
            Tab::Investments => "investments",
            Tab::Activity => "activity",
            Tab::Analysis => "analysis",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct PlanInfo {
    pub participant_name: String,
    pub plan_name: String,
    pub plan_id: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct PerformancePoint {
    pub period: String,
    /// Decimal serialized as a string
    pub balance: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Flat,
}

impl Trend {
    pub fn class(self) -> &'static str {
        match self {
            Trend::Up => "trend-up",
            Trend::Down => "trend-down",
            Trend::Flat => "trend-flat",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
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

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct TransactionRow {
    pub id: String,
    pub date: String,
    pub description: String,
    pub kind: String,
    pub amount: String,
    pub trend: Trend,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct AllocationRow {
    pub asset_class: String,
    pub holdings: usize,
    pub balance: String,
    pub percent: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SummaryView {
    pub plan: PlanInfo,
    pub total_balance: String,
    pub total_change: String,
    pub trend: Trend,
    pub vested_balance: String,
    pub top_holdings: Vec<HoldingRow>,
    pub recent_transactions: Vec<TransactionRow>,
    pub performance: Vec<PerformancePoint>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct InvestmentsView {
    pub holdings: Vec<HoldingRow>,
    pub total_balance: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ActivityView {
    pub window_label: String,
    pub transactions: Vec<TransactionRow>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct AnalysisView {
    pub allocation: Vec<AllocationRow>,
    pub total_balance: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "tab", rename_all = "lowercase")]
pub enum TabPayload {
    Summary(SummaryView),
    Investments(InvestmentsView),
    Activity(ActivityView),
    Analysis(AnalysisView),
}

/// Chat message for display
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub role: String,
    pub content: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetState {
    #[default]
    Closed,
    Expanded,
    Minimized,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SessionView {
    pub id: String,
    pub widget: WidgetState,
    pub is_loading: bool,
    pub messages: Vec<ChatMessage>,
}

#[derive(Clone, Copy, Debug)]
pub enum WidgetAction {
    Open,
    Toggle,
    Close,
}

impl WidgetAction {
    fn as_str(self) -> &'static str {
        match self {
            WidgetAction::Open => "open",
            WidgetAction::Toggle => "toggle",
            WidgetAction::Close => "close",
        }
    }
}

/// Numbers fetches so that only the newest response is applied.
///
/// Switching A -> B -> A issues three tickets; the first A response is stale
/// even though it names the currently active tab.
#[derive(Clone, Copy, Debug, Default)]
pub struct RequestSeq(u64);

impl RequestSeq {
    pub fn issue(&mut self) -> u64 {
        self.0 += 1;
        self.0
    }

    pub fn is_latest(self, ticket: u64) -> bool {
        self.0 == ticket
    }
}

/// Absolute URL for an API path; the browser client rejects relative URLs
fn url(path: &str) -> String {
    let origin = web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_else(|| "http://localhost:3000".into());
    join(&origin, path)
}

fn join(origin: &str, path: &str) -> String {
    format!("{}/{}", origin.trim_end_matches('/'), path.trim_start_matches('/'))
}

async fn parse<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> Result<T, String> {
    if response.status().is_success() {
        response.json().await.map_err(|e| e.to_string())
    } else {
        let data: serde_json::Value = response.json().await.unwrap_or_default();
        Err(data["error"].as_str().unwrap_or("Request failed").to_string())
    }
}

pub async fn fetch_account() -> Result<PlanInfo, String> {
    let response = reqwest::get(url("/api/account")).await.map_err(|e| e.to_string())?;
    parse(response).await
}

pub async fn fetch_view(tab: Tab) -> Result<TabPayload, String> {
    let response = reqwest::get(url(&format!("/api/views/{}", tab.slug())))
        .await
        .map_err(|e| e.to_string())?;
    parse(response).await
}

pub async fn create_session() -> Result<SessionView, String> {
    let response = reqwest::Client::new()
        .post(url("/api/assistant/sessions"))
        .send()
        .await
        .map_err(|e| e.to_string())?;
    parse(response).await
}

pub async fn update_widget(session_id: &str, action: WidgetAction) -> Result<SessionView, String> {
    let response = reqwest::Client::new()
        .post(url(&format!("/api/assistant/sessions/{session_id}/widget")))
        .json(&serde_json::json!({ "action": action.as_str() }))
        .send()
        .await
        .map_err(|e| e.to_string())?;
    parse(response).await
}

/// Send a chat message; resolves once the assistant turn is in the transcript
pub async fn send_message(session_id: &str, text: &str) -> Result<SessionView, String> {
    let response = reqwest::Client::new()
        .post(url(&format!("/api/assistant/sessions/{session_id}/messages")))
        .json(&serde_json::json!({ "text": text }))
        .send()
        .await
        .map_err(|e| e.to_string())?;
    parse(response).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join() {
        assert_eq!(join("http://localhost:3000", "/api/account"), "http://localhost:3000/api/account");
        assert_eq!(join("https://plan.example/", "api/views/summary"), "https://plan.example/api/views/summary");
    }

    #[test]
    fn test_request_seq_keeps_only_newest() {
        let mut seq = RequestSeq::default();
        let first_summary = seq.issue();
        let investments = seq.issue();
        let second_summary = seq.issue();

        assert!(!seq.is_latest(first_summary));
        assert!(!seq.is_latest(investments));
        assert!(seq.is_latest(second_summary));
    }

    #[test]
    fn test_tagged_payload() {
        let json = r#"{
            "tab": "activity",
            "window_label": "Activity for the last 90 days",
            "transactions": [{
                "id": "t6", "date": "2023-09-15", "description": "RECORDKEEPING FEE",
                "kind": "Fee", "amount": "-$12.50", "trend": "down"
            }]
        }"#;

        let TabPayload::Activity(view) = serde_json::from_str(json).unwrap() else {
            panic!("expected activity payload");
        };
        assert_eq!(view.transactions[0].trend, Trend::Down);
    }

    #[test]
    fn test_session_view_ignores_extra_fields() {
        let json = r#"{
            "id": "abc", "widget": "minimized", "is_loading": true, "history_window": 10,
            "messages": [{"id": "m1", "role": "assistant", "content": "Hello!", "timestamp": "2024-01-01T00:00:00Z"}]
        }"#;

        let view: SessionView = serde_json::from_str(json).unwrap();
        assert_eq!(view.widget, WidgetState::Minimized);
        assert_eq!(view.messages[0].content, "Hello!");
    }
}
