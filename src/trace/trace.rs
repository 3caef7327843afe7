use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::store::ResultKind;

/// User-facing action a trace event records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceAction {
    GenerateLocators,
    AddElement,
    CollectRegion,
    GeneratePageObject,
    Refine,
}

#[derive(Debug, Serialize)]
pub struct TraceEvent {
    pub timestamp_ms: u128,
    pub action: TraceAction,
    pub session: Option<String>,

    pub page_digest: Option<String>,
    pub element_count: usize,

    pub result_kind: Option<ResultKind>,
    pub success: bool,
    pub error: Option<String>,
}

impl TraceEvent {
    pub fn now(action: TraceAction) -> Self {
        Self {
            timestamp_ms: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or_default(),
            action,
            session: None,
            page_digest: None,
            element_count: 0,
            result_kind: None,
            success: true,
            error: None,
        }
    }

    pub fn with_session(mut self, session: impl ToString) -> Self {
        self.session = Some(session.to_string());
        self
    }

    pub fn with_page(mut self, digest: impl ToString) -> Self {
        self.page_digest = Some(digest.to_string());
        self
    }

    pub fn with_elements(mut self, count: usize) -> Self {
        self.element_count = count;
        self
    }

    pub fn with_result(mut self, kind: ResultKind) -> Self {
        self.result_kind = Some(kind);
        self
    }

    pub fn with_error(mut self, error: impl ToString) -> Self {
        self.success = false;
        self.error = Some(error.to_string());
        self
    }
}
