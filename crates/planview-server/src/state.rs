//! Application State

use std::sync::Arc;

use agent_core::{Assistant, MemorySessionStore};
use plan_advisor::{AccountSnapshot, Dashboard};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Exchange service with the injected provider
    pub assistant: Arc<Assistant>,

    /// Live chat sessions
    pub sessions: Arc<MemorySessionStore>,

    /// Read-only account data
    pub snapshot: Arc<AccountSnapshot>,

    /// Tab renderer carrying the vesting policy
    pub dashboard: Arc<Dashboard>,
}

impl AppState {
    pub fn new(assistant: Assistant, snapshot: AccountSnapshot, dashboard: Dashboard) -> Self {
        Self {
            assistant: Arc::new(assistant),
            sessions: Arc::new(MemorySessionStore::new()),
            snapshot: Arc::new(snapshot),
            dashboard: Arc::new(dashboard),
        }
    }
}
