//! Comparison service client
//!
//! Validates usernames, posts them to `<endpoint>/compare-users` and
//! extracts the roast from either response contract.

mod error;
mod events;
#[cfg(test)]
pub(crate) mod mock;

pub use error::{RoastError, RoastResult};
pub use events::EventDecoder;

use crate::constants::*;
use crate::types::{CompareRequest, CompareResponse};
use futures::StreamExt;
use tracing::{debug, warn};

/// Both names must be at least `MIN_USERNAME_LEN` characters once trimmed.
pub fn validate_usernames(user1: &str, user2: &str) -> RoastResult<()> {
    let valid = |name: &str| name.trim().chars().count() >= MIN_USERNAME_LEN;
    if valid(user1) && valid(user2) {
        Ok(())
    } else {
        Err(RoastError::Validation(VALIDATION_MESSAGE.to_string()))
    }
}

/// Drop the first and last line of a fenced block (```html ... ```).
pub fn strip_fence(raw: &str) -> String {
    let lines: Vec<&str> = raw.split('\n').collect();
    if lines.len() <= 2 {
        return String::new();
    }
    lines[1..lines.len() - 1].join("\n")
}

#[derive(Clone)]
pub struct RoastClient {
    http: reqwest::Client,
    endpoint: String,
}

impl RoastClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_http(reqwest::Client::new(), endpoint)
    }

    pub fn with_http(http: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
        }
    }

    pub fn compare_url(&self) -> String {
        format!("{}/{}", self.endpoint.trim_end_matches('/'), COMPARE_PATH)
    }

    /// JSON contract: one document with a fenced `roast`.
    ///
    /// The body is decoded whatever the HTTP status, since the service
    /// reports failures through `success: false`.
    pub async fn compare(&self, req: &CompareRequest) -> RoastResult<String> {
        let url = self.compare_url();
        debug!(url = %url, user1 = %req.user1, user2 = %req.user2, "Posting comparison");

        let response = self.http.post(&url).json(req).send().await?;
        debug!(status = %response.status(), "Comparison response received");

        let body = response.bytes().await?;
        let data: CompareResponse = serde_json::from_slice(&body)?;

        if !data.success {
            let message = data
                .message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| SERVICE_DEFAULT_MESSAGE.to_string());
            warn!(message = %message, "Service reported failure");
            return Err(RoastError::Service(message));
        }

        let roast = data.roast.ok_or(RoastError::MissingRoast)?;
        Ok(strip_fence(&roast))
    }

    /// Streaming contract: `on_fragment` sees every `content` fragment in
    /// arrival order. Returns the full concatenation.
    pub async fn compare_streaming<F>(&self, req: &CompareRequest, mut on_fragment: F) -> RoastResult<String>
    where
        F: FnMut(&str),
    {
        let url = self.compare_url();
        debug!(url = %url, user1 = %req.user1, user2 = %req.user2, "Posting streaming comparison");

        let response = self.http.post(&url).json(req).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(RoastError::Status(status));
        }

        let mut stream = response.bytes_stream();
        let mut decoder = EventDecoder::new();
        let mut roast = String::new();
        let mut events = 0usize;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            for fragment in decoder.push(&chunk)? {
                on_fragment(&fragment);
                roast.push_str(&fragment);
                events += 1;
            }
        }
        if let Some(fragment) = decoder.finish()? {
            on_fragment(&fragment);
            roast.push_str(&fragment);
            events += 1;
        }

        debug!(events, bytes = roast.len(), "Stream finished");
        Ok(roast)
    }
}
