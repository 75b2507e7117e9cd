//! Comparison request flow

use super::progress::{Jitter, ProgressTask};
use super::{lock_state, App};
use crate::constants::*;
use crate::roast::{validate_usernames, RoastClient, RoastResult};
use crate::types::{CompareRequest, ResponseMode, RoastState};
use eframe::egui;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{error, info, warn};

/// Issue the request and write the outcome into `state`. Loading stays set;
/// `drive_compare` clears it once the ticker is gone.
pub async fn run_compare<R>(
    client: RoastClient,
    mode: ResponseMode,
    req: CompareRequest,
    state: Arc<Mutex<RoastState>>,
    repaint: R,
) where
    R: Fn() + Send + Sync + 'static,
{
    let outcome = match mode {
        ResponseMode::Json => client.compare(&req).await,
        ResponseMode::Stream => {
            let sink = state.clone();
            let repaint = &repaint;
            client
                .compare_streaming(&req, |fragment| {
                    lock_state(&sink).result.push_str(fragment);
                    repaint();
                })
                .await
        }
    };

    settle(&state, &req, outcome);
    repaint();
}

fn settle(state: &Mutex<RoastState>, req: &CompareRequest, outcome: RoastResult<String>) {
    let mut s = lock_state(state);
    match outcome {
        Ok(roast) => {
            info!(user1 = %req.user1, user2 = %req.user2, bytes = roast.len(), "Roast received");
            s.result = roast;
        }
        Err(e) => {
            if e.is_service() {
                warn!(error = %e, "Roast refused by service");
            } else {
                error!(error = %e, "Roast request failed");
            }
            s.pending_notice = e.notice();
            s.result = e.result_text().to_string();
        }
    }
}

/// Run one request with its progress ticker. Whatever happens to the
/// request task, the ticker is stopped and then loading is cleared.
pub async fn drive_compare<R>(
    client: RoastClient,
    mode: ResponseMode,
    req: CompareRequest,
    state: Arc<Mutex<RoastState>>,
    tick_interval: Duration,
    repaint: R,
) where
    R: Fn() + Clone + Send + Sync + 'static,
{
    let progress = ProgressTask::spawn(state.clone(), tick_interval, Jitter::from_clock(), repaint.clone());

    let request = tokio::spawn(run_compare(client, mode, req, state.clone(), repaint.clone()));
    let joined = request.await;

    // Once loading clears a new request may start; this ticker must not see it
    progress.stop().await;
    {
        let mut s = lock_state(&state);
        if let Err(e) = joined {
            error!(error = %e, "Roast task aborted");
            s.result = TRANSPORT_FAILURE_FALLBACK.to_string();
        }
        s.finish();
    }
    repaint();
}

impl App {
    /// Validate the form and kick off a comparison. Returns false when
    /// nothing was sent.
    pub fn start_compare(&mut self, ctx: &egui::Context) -> bool {
        if lock_state(&self.state).loading {
            return false;
        }

        if let Err(e) = validate_usernames(&self.user1, &self.user2) {
            info!(user1 = %self.user1, user2 = %self.user2, "Rejected usernames");
            if let Some(msg) = e.notice() {
                self.show_toast(msg);
            }
            return false;
        }

        let req = CompareRequest::new(&self.user1, &self.user2);
        let mode = self.response_mode;
        let tick_interval = self.settings.tick_interval();
        let client = self.client.clone();

        lock_state(&self.state).begin();
        info!(user1 = %req.user1, user2 = %req.user2, mode = mode.label(), "Starting roast");

        let state = self.state.clone();
        let repaint_ctx = ctx.clone();
        let repaint = move || repaint_ctx.request_repaint();
        self.runtime
            .spawn(drive_compare(client, mode, req, state, tick_interval, repaint));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roast::mock::{self, MockResponse};
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    fn client(base: &str) -> RoastClient {
        let http = reqwest::Client::builder().no_proxy().build().unwrap();
        RoastClient::with_http(http, base)
    }

    fn started() -> Arc<Mutex<RoastState>> {
        let mut s = RoastState::default();
        s.result = "stale result".into();
        s.begin();
        Arc::new(Mutex::new(s))
    }

    async fn drive(base: &str, mode: ResponseMode) -> RoastState {
        let state = started();
        drive_compare(
            client(base),
            mode,
            CompareRequest::new("alice", "bob"),
            state.clone(),
            Duration::from_millis(5),
            || {},
        )
        .await;
        let s = lock_state(&state).clone();
        s
    }

    #[tokio::test]
    async fn json_success_shows_unfenced_roast() {
        let body = r#"{"success":true,"roast":"```html\n<h2>Verdict</h2>\n<p>alice wins</p>\n```"}"#;
        let server = mock::serve(MockResponse::json(200, body)).await;

        let s = drive(&server.base_url, ResponseMode::Json).await;
        assert_eq!(s.result, "<h2>Verdict</h2>\n<p>alice wins</p>");
        assert!(!s.loading);
        assert_eq!(s.progress, PROGRESS_DONE);
        assert!(s.pending_notice.is_none());
    }

    #[tokio::test]
    async fn service_failure_shows_placeholder_and_notice() {
        let body = r#"{"success":false,"message":"GitHub rate limit exceeded"}"#;
        let server = mock::serve(MockResponse::json(200, body)).await;

        let s = drive(&server.base_url, ResponseMode::Json).await;
        assert_eq!(s.result, SERVICE_FAILURE_PLACEHOLDER);
        assert_eq!(s.pending_notice.as_deref(), Some("GitHub rate limit exceeded"));
        assert!(!s.loading);
    }

    #[tokio::test]
    async fn network_failure_shows_fallback() {
        let base = mock::unreachable_base_url().await;

        let s = drive(&base, ResponseMode::Json).await;
        assert_eq!(s.result, TRANSPORT_FAILURE_FALLBACK);
        assert!(s.pending_notice.is_none());
        assert!(!s.loading);
        assert_eq!(s.progress, PROGRESS_DONE);
    }

    #[tokio::test]
    async fn stream_result_is_concatenation_of_fragments() {
        let fragments = ["<p>", "alice ", "pushes to ", "main", "</p>"];
        let chunks: Vec<String> = fragments
            .iter()
            .map(|f| format!("data: {}\n\n", serde_json::json!({ "content": f })))
            .collect();
        let server = mock::serve(MockResponse::stream(chunks)).await;

        let state = started();
        let repaints = Arc::new(AtomicUsize::new(0));
        let counter = repaints.clone();
        run_compare(
            client(&server.base_url),
            ResponseMode::Stream,
            CompareRequest::new("alice", "bob"),
            state.clone(),
            move || {
                counter.fetch_add(1, Ordering::SeqCst);
            },
        )
        .await;

        let s = lock_state(&state).clone();
        assert_eq!(s.result, fragments.concat());
        // Cleared by drive_compare after the ticker stops
        assert!(s.loading);
        // One repaint per fragment plus the final one
        assert_eq!(repaints.load(Ordering::SeqCst), fragments.len() + 1);
    }

    #[tokio::test]
    async fn malformed_stream_replaces_partial_text_with_fallback() {
        let chunks = vec!["data: {\"content\":\"half a ro\"}\n".to_string(), "data: nope\n".to_string()];
        let server = mock::serve(MockResponse::stream(chunks)).await;

        let s = drive(&server.base_url, ResponseMode::Stream).await;
        assert_eq!(s.result, TRANSPORT_FAILURE_FALLBACK);
        assert!(!s.loading);
    }

    #[tokio::test]
    async fn old_ticker_never_touches_the_next_request() {
        let body = r#"{"success":true,"roast":"```\n<p>done</p>\n```"}"#;
        let server = mock::serve(MockResponse::json(200, body)).await;

        let state = started();
        let restarted = Arc::new(AtomicBool::new(false));
        let repaint = {
            let state = state.clone();
            let restarted = restarted.clone();
            move || {
                // Resubmit the moment loading clears
                let mut s = lock_state(&state);
                if !s.loading && !restarted.swap(true, Ordering::SeqCst) {
                    s.begin();
                }
            }
        };

        drive_compare(
            client(&server.base_url),
            ResponseMode::Json,
            CompareRequest::new("alice", "bob"),
            state.clone(),
            Duration::from_millis(1),
            repaint,
        )
        .await;
        assert!(restarted.load(Ordering::SeqCst));

        tokio::time::sleep(Duration::from_millis(50)).await;
        let s = lock_state(&state).clone();
        assert!(s.loading);
        assert_eq!(s.progress, 0.0);
        assert_eq!(s.phrase_index, 0);
    }
}
