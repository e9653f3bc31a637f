//! The frame driver: one `update` + `render` pair per display refresh.
//!
//! The driver is an explicit state machine instead of a self-rescheduling
//! closure. The first tick only records its timestamp (there is no valid
//! delta yet); every later tick computes the elapsed seconds, calls
//! `update(delta)` then `render()`, and records the new timestamp. A
//! [`CancelToken`] is one stop condition, a module error the other; a failed
//! tick must not be rescheduled.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// The module calls a driver makes each frame.
///
/// [`crate::Game`] implements this; tests use recording fakes.
pub trait FrameHooks {
    fn update(&mut self, delta_seconds: f32) -> Result<(), anyhow::Error>;
    fn render(&mut self) -> Result<(), anyhow::Error>;
}

/// Shared stop signal for a running driver.
#[derive(Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// What a single tick did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    /// First tick: timestamp recorded, no module calls.
    Warmup,
    /// One full `update` + `render` pair ran.
    Rendered,
    /// The token was cancelled; no module calls.
    Stopped,
}

pub struct FrameDriver {
    previous_timestamp: Option<f64>,
    token: CancelToken,
}

impl Default for FrameDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameDriver {
    pub fn new() -> Self {
        Self::with_token(CancelToken::new())
    }

    pub fn with_token(token: CancelToken) -> Self {
        Self {
            previous_timestamp: None,
            token,
        }
    }

    /// Handle for stopping the driver from outside the loop.
    pub fn token(&self) -> CancelToken {
        self.token.clone()
    }

    /// Run one scheduled callback at `timestamp_ms`.
    ///
    /// Timestamps must be monotonically non-decreasing; the delta passed to
    /// `update` is `(timestamp - previous) / 1000` seconds. An error from
    /// the module propagates and the caller must not tick again.
    pub fn tick(
        &mut self,
        timestamp_ms: f64,
        game: &mut impl FrameHooks,
    ) -> Result<FrameOutcome, anyhow::Error> {
        if self.token.is_cancelled() {
            return Ok(FrameOutcome::Stopped);
        }

        let outcome = match self.previous_timestamp {
            None => FrameOutcome::Warmup,
            Some(previous) => {
                let delta_seconds = ((timestamp_ms - previous) / 1000.0) as f32;
                game.update(delta_seconds)?;
                game.render()?;
                FrameOutcome::Rendered
            }
        };

        self.previous_timestamp = Some(timestamp_ms);
        Ok(outcome)
    }

    /// Drive `game` at `refresh_interval` until cancellation or an error.
    ///
    /// A frame either fully completes its update+render pair or the loop is
    /// failed; errors are returned without any further rescheduling.
    pub fn run(
        &mut self,
        game: &mut impl FrameHooks,
        refresh_interval: Duration,
    ) -> Result<(), anyhow::Error> {
        let start = Instant::now();
        loop {
            let timestamp_ms = start.elapsed().as_secs_f64() * 1000.0;
            if self.tick(timestamp_ms, game)? == FrameOutcome::Stopped {
                return Ok(());
            }
            std::thread::sleep(refresh_interval);
        }
    }
}
