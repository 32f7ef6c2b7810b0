//! Export progress reporting
//!
//! Progress is an integer percentage. Within one export the reported values
//! never decrease until the final reset to 0.

use std::time::Duration;

/// Reported right before the bundle is requested
pub const FETCH_STARTED: u8 = 10;
/// Reported once the bundle has arrived
pub const BUNDLE_RECEIVED: u8 = 30;
/// Upper bound while assets are being archived
pub const ARCHIVING_CEILING: u8 = 90;
/// Increment per tick while archiving
pub const TICK_STEP: u8 = 10;
/// Reported after delivery
pub const COMPLETE: u8 = 100;
/// Idle value after the export has ended
pub const IDLE: u8 = 0;

/// Receiver of progress updates
///
/// Implemented for any `Fn(u8)` closure:
///
/// ```
/// use medirecord::core::export::ProgressSink;
///
/// let sink = |percent: u8| println!("{percent}%");
/// sink.report(42);
/// ```
pub trait ProgressSink: Send + Sync {
    fn report(&self, percent: u8);
}

impl<F> ProgressSink for F
where
    F: Fn(u8) + Send + Sync,
{
    fn report(&self, percent: u8) {
        self(percent)
    }
}

/// Sink that discards every update
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&self, _percent: u8) {}
}

/// Forwards monotonic progress to a sink
pub struct ProgressTracker<'a> {
    sink: &'a dyn ProgressSink,
    current: u8,
}

impl<'a> ProgressTracker<'a> {
    pub fn new(sink: &'a dyn ProgressSink) -> Self {
        Self {
            sink,
            current: IDLE,
        }
    }

    pub fn current(&self) -> u8 {
        self.current
    }

    /// Move forward to `percent`; lower or repeated values are dropped
    pub fn advance_to(&mut self, percent: u8) {
        let percent = percent.min(COMPLETE);
        if percent > self.current {
            self.current = percent;
            self.sink.report(percent);
        }
    }

    /// One archiving tick, capped at [`ARCHIVING_CEILING`]
    pub fn tick(&mut self) {
        let next = self
            .current
            .saturating_add(TICK_STEP)
            .min(ARCHIVING_CEILING);
        self.advance_to(next);
    }

    /// Return to idle immediately
    pub fn reset(&mut self) {
        if self.current != IDLE {
            self.current = IDLE;
            self.sink.report(IDLE);
        }
    }

    /// Return to idle after a grace delay
    pub async fn reset_after(&mut self, delay: Duration) {
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        self.reset();
    }
}
