use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// Source of monotonic time in whole milliseconds.
///
/// Readings must never decrease. The origin is arbitrary; only differences
/// between two readings of the same clock are meaningful.
pub trait MonotonicClock {
    fn now_ms(&self) -> u64;
}

/// Wall clock backed by [`Instant`].
///
/// Reports milliseconds elapsed since the clock was created.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock for SystemClock {
    fn now_ms(&self) -> u64 {
        let ms = Instant::now()
            .saturating_duration_since(self.origin)
            .as_millis();
        u64::try_from(ms).unwrap_or(u64::MAX)
    }
}

/// Deterministic clock advanced by hand.
///
/// Clones share the same underlying time, so a test can keep one handle and
/// give another to the tracker. Not `Send`: a manual clock belongs to a single
/// render loop.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<u64>>,
}

impl ManualClock {
    /// Creates a clock reading `start_ms`.
    pub fn new(start_ms: u64) -> Self {
        Self {
            now: Rc::new(Cell::new(start_ms)),
        }
    }

    /// Moves the clock forward by `ms`.
    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get().saturating_add(ms));
    }

    /// Jumps to `ms`. Going backwards is ignored to keep readings monotonic.
    pub fn set(&self, ms: u64) {
        if ms >= self.now.get() {
            self.now.set(ms);
        }
    }
}

impl MonotonicClock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

impl<F> MonotonicClock for F
where
    F: Fn() -> u64,
{
    fn now_ms(&self) -> u64 {
        self()
    }
}
