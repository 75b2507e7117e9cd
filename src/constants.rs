//! Application constants and configuration

use std::time::Duration;

pub const APP_NAME: &str = "GitHub Roast Battle";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Base URL of the comparison service. `/compare-users` is appended.
pub const DEFAULT_ENDPOINT: &str = "https://sturl.live/backend/githubcompare";
pub const COMPARE_PATH: &str = "compare-users";

// Session overrides
pub const ENV_ENDPOINT: &str = "ROAST_ENDPOINT";
pub const ENV_MODE: &str = "ROAST_MODE";

pub const MIN_USERNAME_LEN: usize = 2;

// Progress simulation
pub const PROGRESS_CAP: f32 = 95.0;
pub const PROGRESS_DONE: f32 = 100.0;
pub const PROGRESS_MAX_STEP: f32 = 15.0;
pub const DEFAULT_TICK_MS: u64 = 800;

// Toast timing (visible, then fade)
pub const TOAST_VISIBLE: Duration = Duration::from_secs(5);
pub const TOAST_FADE: Duration = Duration::from_millis(300);

pub const VALIDATION_MESSAGE: &str = "Please enter valid usernames for both users";
pub const SERVICE_DEFAULT_MESSAGE: &str = "Something went wrong";
pub const SERVICE_FAILURE_PLACEHOLDER: &str = "Cannot Fetch Repos, something went wrong";
pub const TRANSPORT_FAILURE_FALLBACK: &str =
    "Failed to roast. The developers are being roasted instead. 🔥";

pub const MEME_PHRASES: &[&str] = &[
    "Analyzing spaghetti code... 🍝",
    "Counting empty commits... 👻",
    "Measuring keyboard smashing level... ⌨️",
    "Calculating coffee dependency... ☕",
    "Detecting Stack Overflow copies... 📝",
    "Mining documentation fossils... 🦖",
    "Evaluating meme potential... 🎭",
    "Scanning for console.log()... 🔍",
];
