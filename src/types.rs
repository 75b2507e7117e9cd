//! Common types and data structures

use crate::constants::*;
use serde::{Deserialize, Serialize};

/// Which response contract the comparison service speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseMode {
    /// Single JSON document with a fenced `roast` field
    #[default]
    Json,
    /// Newline-delimited `data: {"content": ...}` events
    Stream,
}

impl ResponseMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "stream" | "sse" => Some(Self::Stream),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Json => "JSON",
            Self::Stream => "Stream",
        }
    }
}

/// State shared between the UI and the request/progress tasks
#[derive(Debug, Clone)]
pub struct RoastState {
    pub loading: bool,
    pub progress: f32,
    pub phrase_index: usize,
    pub result: String,
    /// Notice raised by a background task, picked up by the UI as a toast
    pub pending_notice: Option<String>,
}

impl Default for RoastState {
    fn default() -> Self {
        Self {
            loading: false,
            progress: 0.0,
            phrase_index: 0,
            result: String::new(),
            pending_notice: None,
        }
    }
}

impl RoastState {
    /// Reset for a new request
    pub fn begin(&mut self) {
        self.loading = true;
        self.progress = 0.0;
        self.phrase_index = 0;
        self.result.clear();
        self.pending_notice = None;
    }

    pub fn finish(&mut self) {
        self.loading = false;
        self.progress = PROGRESS_DONE;
    }

    pub fn phrase(&self) -> &'static str {
        MEME_PHRASES[self.phrase_index % MEME_PHRASES.len()]
    }
}

/// Request body for `POST /compare-users`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompareRequest {
    pub user1: String,
    pub user2: String,
}

impl CompareRequest {
    pub fn new(user1: &str, user2: &str) -> Self {
        Self {
            user1: user1.trim().to_string(),
            user2: user2.trim().to_string(),
        }
    }
}

/// JSON contract response
#[derive(Debug, Deserialize)]
pub struct CompareResponse {
    pub success: bool,
    #[serde(default)]
    pub roast: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// One event of the streaming contract
#[derive(Debug, Deserialize)]
pub struct StreamEvent {
    #[serde(default)]
    pub content: Option<String>,
}
