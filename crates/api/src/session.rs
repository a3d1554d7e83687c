//! Shared group state synced between clients.

use billsplit_core::split::{Bill, Person};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

/// Base currency of a fresh session.
const INITIAL_BASE_CURRENCY: &str = "TWD";

/// The last group state pushed by a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    /// Group members.
    #[serde(default)]
    pub people: Vec<Person>,
    /// Shared expenses.
    #[serde(default)]
    pub bills: Vec<Bill>,
    /// Base currency selected by the client.
    #[serde(default)]
    pub base_currency: String,
    /// Epoch milliseconds of the last write.
    #[serde(default)]
    pub last_updated: i64,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            people: Vec::new(),
            bills: Vec::new(),
            base_currency: INITIAL_BASE_CURRENCY.to_string(),
            last_updated: Utc::now().timestamp_millis(),
        }
    }
}

/// Holds one `SessionState` behind an async mutex.
#[derive(Debug, Default)]
pub struct SessionStore {
    state: Mutex<SessionState>,
}

impl SessionStore {
    /// Creates an empty session stamped with the current time.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the current state.
    pub async fn snapshot(&self) -> SessionState {
        self.state.lock().await.clone()
    }

    /// Replaces the state, stamping `last_updated`, and returns what was stored.
    pub async fn replace(&self, mut next: SessionState) -> SessionState {
        let mut state = self.state.lock().await;
        next.last_updated = Utc::now().timestamp_millis();
        *state = next;
        state.clone()
    }
}
