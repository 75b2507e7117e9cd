//! App module - contains the main application state and logic

pub mod compare;
pub mod progress;
pub mod toast;
mod views;

use crate::roast::RoastClient;
use crate::settings::{Overrides, Settings};
use crate::theme;
use crate::types::*;
use crate::ui::markup::{self, Block};
use eframe::egui;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use toast::Toast;
use tracing::debug;

/// Lock the shared roast state. A panicked task must not wedge the UI, so
/// poisoning is ignored.
pub(crate) fn lock_state(state: &Mutex<RoastState>) -> MutexGuard<'_, RoastState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

// ============================================================================
// APP STATE
// ============================================================================

pub struct App {
    // Form
    pub(crate) user1: String,
    pub(crate) user2: String,
    // Request state shared with background tasks
    pub(crate) state: Arc<Mutex<RoastState>>,
    pub(crate) client: RoastClient,
    // Endpoint and mode in use this session (settings plus env overrides)
    pub(crate) endpoint: String,
    pub(crate) response_mode: ResponseMode,
    pub(crate) runtime: tokio::runtime::Runtime,
    // Parsed result, re-parsed only when the text changes
    pub(crate) rendered_source: String,
    pub(crate) rendered: Vec<Block>,
    // Toast notification
    pub(crate) toast: Option<Toast>,
    // Settings
    pub(crate) settings: Settings,
    pub(crate) show_settings: bool,
    pub(crate) endpoint_draft: String,
    pub(crate) data_dir: PathBuf,
    pub(crate) window_pos: Option<egui::Pos2>,
    pub(crate) window_size: Option<egui::Vec2>,
    pub(crate) needs_center: bool,
}

// ============================================================================
// APP INITIALIZATION & HELPERS
// ============================================================================

impl App {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        settings: Settings,
        overrides: Overrides,
        data_dir: PathBuf,
    ) -> std::io::Result<Self> {
        // Force dark theme
        cc.egui_ctx.set_theme(egui::Theme::Dark);

        // Add Phosphor icons font
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        theme::apply_visuals(&cc.egui_ctx);

        Self::with_settings(settings, overrides, data_dir)
    }

    /// Build the app state without touching a window. `settings` stays the
    /// persisted copy; `overrides` only apply to this session.
    pub fn with_settings(settings: Settings, overrides: Overrides, data_dir: PathBuf) -> std::io::Result<Self> {
        let runtime = tokio::runtime::Runtime::new()?;
        let endpoint = overrides.endpoint(&settings).to_string();
        let response_mode = overrides.response_mode(&settings);
        let client = RoastClient::new(endpoint.clone());

        Ok(Self {
            user1: String::new(),
            user2: String::new(),
            state: Arc::new(Mutex::new(RoastState::default())),
            client,
            endpoint_draft: endpoint.clone(),
            endpoint,
            response_mode,
            runtime,
            rendered_source: String::new(),
            rendered: Vec::new(),
            toast: None,
            settings,
            show_settings: false,
            data_dir,
            window_pos: None,
            window_size: None,
            needs_center: false,
        })
    }

    pub fn save_settings(&mut self) {
        self.settings.window_x = self.window_pos.map(|p| p.x);
        self.settings.window_y = self.window_pos.map(|p| p.y);
        self.settings.window_w = self.window_size.map(|s| s.x);
        self.settings.window_h = self.window_size.map(|s| s.y);
        self.settings.save(&self.data_dir);
    }

    /// Point the client at a new endpoint. Takes effect on the next request
    /// and is saved, replacing any environment override.
    pub fn set_endpoint(&mut self, endpoint: &str) {
        let endpoint = endpoint.trim();
        if endpoint.is_empty() || endpoint == self.endpoint {
            return;
        }
        debug!(endpoint = %endpoint, "Endpoint changed");
        self.endpoint = endpoint.to_string();
        self.settings.endpoint = endpoint.to_string();
        self.client = RoastClient::new(endpoint);
    }

    /// Chosen in the settings window, so it is saved as well.
    pub fn set_response_mode(&mut self, mode: ResponseMode) {
        if mode == self.response_mode {
            return;
        }
        debug!(mode = mode.label(), "Response mode changed");
        self.response_mode = mode;
        self.settings.response_mode = mode;
    }

    pub fn show_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast::new(message));
    }

    pub fn is_loading(&self) -> bool {
        lock_state(&self.state).loading
    }

    /// Copy what the UI needs out of the shared state and surface any
    /// notice raised by the request task.
    pub(crate) fn snapshot(&mut self) -> RoastState {
        let snapshot = {
            let mut s = lock_state(&self.state);
            let snapshot = s.clone();
            s.pending_notice = None;
            snapshot
        };
        if let Some(msg) = &snapshot.pending_notice {
            self.show_toast(msg.clone());
        }
        if snapshot.result != self.rendered_source {
            self.rendered = markup::parse(&snapshot.result);
            self.rendered_source = snapshot.result.clone();
        }
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::*;
    use crate::roast::mock::{self, MockResponse};
    use std::collections::HashMap;
    use std::time::Duration;

    fn app_at(endpoint: &str) -> App {
        let settings = Settings {
            endpoint: endpoint.into(),
            ..Settings::default()
        };
        App::with_settings(settings, Overrides::default(), std::env::temp_dir()).unwrap()
    }

    fn app() -> App {
        // Nothing should ever be sent from these
        app_at("http://127.0.0.1:9")
    }

    #[test]
    fn short_username_raises_toast_and_sends_nothing() {
        let mut app = app();
        let server = app
            .runtime
            .block_on(mock::serve(MockResponse::json(200, r#"{"success":true,"roast":"```\n<p>hi</p>\n```"}"#)));
        let http = reqwest::Client::builder().no_proxy().build().unwrap();
        app.client = RoastClient::with_http(http, &server.base_url);
        app.user1 = "a".into();
        app.user2 = "octocat".into();

        let ctx = egui::Context::default();
        assert!(!app.start_compare(&ctx));
        assert_eq!(app.toast.as_ref().map(Toast::message), Some(VALIDATION_MESSAGE));

        app.runtime.block_on(async { tokio::time::sleep(Duration::from_millis(100)).await });
        assert!(!server.accepted(), "a rejected form reached the network");
        let s = lock_state(&app.state).clone();
        assert!(!s.loading);
        assert_eq!(s.progress, 0.0);
        assert!(s.result.is_empty());

        // Same app and server, valid names: now the request goes out
        app.user1 = "alice".into();
        assert!(app.start_compare(&ctx));
        let seen = app.runtime.block_on(server.request());
        assert!(seen.head.starts_with("POST /compare-users "));
    }

    #[test]
    fn second_submit_ignored_while_loading() {
        let mut app = app();
        app.user1 = "alice".into();
        app.user2 = "bob".into();
        lock_state(&app.state).begin();

        assert!(!app.start_compare(&egui::Context::default()));
        assert!(app.toast.is_none());
    }

    #[test]
    fn snapshot_moves_notice_into_toast_and_parses_result() {
        let mut app = app();
        {
            let mut s = lock_state(&app.state);
            s.pending_notice = Some("User not found".into());
            s.result = "<p>hi</p>".into();
        }

        let snap = app.snapshot();
        assert_eq!(snap.result, "<p>hi</p>");
        assert_eq!(app.toast.as_ref().map(Toast::message), Some("User not found"));
        assert!(lock_state(&app.state).pending_notice.is_none());
        assert_eq!(app.rendered.len(), 1);

        // Notice is only surfaced once
        app.toast = None;
        app.snapshot();
        assert!(app.toast.is_none());
    }

    #[test]
    fn endpoint_change_rebuilds_client() {
        let mut app = app();
        app.set_endpoint("  http://localhost:3000/api/ ");
        assert_eq!(app.settings.endpoint, "http://localhost:3000/api/");
        assert_eq!(app.client.compare_url(), "http://localhost:3000/api/compare-users");

        app.set_endpoint("   ");
        assert_eq!(app.settings.endpoint, "http://localhost:3000/api/");
    }

    #[test]
    fn environment_override_is_not_saved() {
        let dir = tempfile::tempdir().unwrap();
        let vars: HashMap<&str, &str> = [(ENV_ENDPOINT, "http://mock:1"), (ENV_MODE, "stream")].into();
        let overrides = Overrides::from_vars(|k| vars.get(k).map(|v| v.to_string()));

        let mut app = App::with_settings(Settings::load(dir.path()), overrides, dir.path().to_path_buf()).unwrap();
        assert_eq!(app.client.compare_url(), "http://mock:1/compare-users");
        assert_eq!(app.response_mode, ResponseMode::Stream);
        app.save_settings();

        let reloaded = Settings::load(dir.path());
        assert_eq!(reloaded.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(reloaded.response_mode, ResponseMode::Json);
    }

    #[test]
    fn settings_window_choice_replaces_override_and_is_saved() {
        let dir = tempfile::tempdir().unwrap();
        let overrides = Overrides {
            endpoint: Some("http://mock:1".into()),
            response_mode: Some(ResponseMode::Stream),
        };
        let mut app = App::with_settings(Settings::default(), overrides, dir.path().to_path_buf()).unwrap();

        app.set_endpoint("http://localhost:3000");
        app.set_response_mode(ResponseMode::Json);
        assert_eq!(app.client.compare_url(), "http://localhost:3000/compare-users");
        assert_eq!(app.response_mode, ResponseMode::Json);
        app.save_settings();

        let reloaded = Settings::load(dir.path());
        assert_eq!(reloaded.endpoint, "http://localhost:3000");
        assert_eq!(reloaded.response_mode, ResponseMode::Json);
    }
}
