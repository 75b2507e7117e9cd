//! Simulated progress while a roast is outstanding
//!
//! Purely cosmetic: the bar creeps up by a random step every tick and never
//! passes `PROGRESS_CAP` until the request settles.

use super::lock_state;
use crate::constants::*;
use crate::types::RoastState;
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Xorshift source for the progress step and phrase choice.
#[derive(Debug, Clone)]
pub struct Jitter(u64);

impl Jitter {
    pub fn seeded(seed: u64) -> Self {
        // An all-zero state would stay zero forever
        Self(if seed == 0 { 0x9E37_79B9_7F4A_7C15 } else { seed })
    }

    pub fn from_clock() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(12345);
        Self::seeded(nanos)
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    /// Uniform in `[0, 1)`
    pub fn unit(&mut self) -> f32 {
        (self.next_u64() >> 40) as f32 / (1u64 << 24) as f32
    }

    /// Uniform in `0..n`
    pub fn below(&mut self, n: usize) -> usize {
        if n == 0 {
            return 0;
        }
        (self.next_u64() % n as u64) as usize
    }
}

/// Advance the bar by one tick and rotate the status phrase.
pub fn tick(state: &mut RoastState, jitter: &mut Jitter) {
    if state.progress < PROGRESS_CAP {
        state.progress = (state.progress + jitter.unit() * PROGRESS_MAX_STEP).min(PROGRESS_CAP);
    }
    state.phrase_index = jitter.below(MEME_PHRASES.len());
}

/// Periodic ticker bound to one request. Cancelled by `stop()` or on drop.
pub struct ProgressTask {
    token: CancellationToken,
    handle: JoinHandle<()>,
}

impl ProgressTask {
    /// Must be called from within a tokio runtime.
    pub fn spawn<R>(
        state: Arc<Mutex<RoastState>>,
        interval: Duration,
        mut jitter: Jitter,
        repaint: R,
    ) -> Self
    where
        R: Fn() + Send + 'static,
    {
        let token = CancellationToken::new();
        let child = token.clone();

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            // First tick completes immediately
            ticker.tick().await;

            loop {
                tokio::select! {
                    biased;
                    _ = child.cancelled() => break,
                    _ = ticker.tick() => {
                        {
                            let mut s = lock_state(&state);
                            if !s.loading {
                                break;
                            }
                            tick(&mut s, &mut jitter);
                        }
                        repaint();
                    }
                }
            }
            debug!("Progress ticker stopped");
        });

        Self { token, handle }
    }

    /// Cancel and wait until the ticker has exited.
    pub async fn stop(mut self) {
        self.token.cancel();
        if let Err(e) = (&mut self.handle).await {
            warn!(error = %e, "Progress ticker ended abnormally");
        }
    }

    #[cfg(test)]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for ProgressTask {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
