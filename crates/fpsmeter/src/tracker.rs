use crate::config::{ConfigError, SlowFramePolicy, TrackerConfig};
use crate::time::{MonotonicClock, SystemClock};

/// Outcome of a single [`FrameRateTracker::on_frame`] call.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct FrameSample {
    /// Milliseconds since the previous frame.
    pub elapsed_ms: u64,
    /// Instantaneous FPS written into the history, if any.
    pub recorded: Option<u32>,
    /// Whether this frame latched a new synced FPS.
    pub synced: bool,
}

/// Rolling frames-per-second estimator.
///
/// Keeps a fixed ring of instantaneous FPS samples (one per frame with a
/// measurable frame time) and exposes their mean as the current FPS. A second,
/// slower value, the synced FPS, copies the current FPS at most once per sync
/// interval so a display can refresh without per-frame jitter.
///
/// One tracker per render loop. All state lives in the tracker; the only
/// external input is the injected [`MonotonicClock`].
#[derive(Debug)]
pub struct FrameRateTracker<C = SystemClock> {
    clock: C,
    config: TrackerConfig,
    sync_interval_ms: u64,

    history: Vec<Option<u32>>,
    write_index: usize,

    last_frame_ms: u64,
    last_sync_ms: u64,
    last_update_ms: u64,

    current_fps: u32,
    synced_fps: u32,
}

impl FrameRateTracker<SystemClock> {
    /// Creates a tracker on the system clock with the default configuration.
    pub fn new() -> Self {
        Self::with_clock(SystemClock::new())
    }
}

impl Default for FrameRateTracker<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: MonotonicClock> FrameRateTracker<C> {
    /// Creates a tracker reading `clock`, with the default configuration.
    pub fn with_clock(clock: C) -> Self {
        Self::build(clock, TrackerConfig::default())
    }

    /// Creates a tracker reading `clock` with a validated `config`.
    pub fn with_config(clock: C, config: TrackerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(clock, config))
    }

    fn build(clock: C, config: TrackerConfig) -> Self {
        let now = clock.now_ms();
        Self {
            sync_interval_ms: config.sync_interval_ms(),
            history: vec![None; config.history_capacity],
            write_index: 0,
            last_frame_ms: now,
            last_sync_ms: now,
            last_update_ms: now,
            current_fps: 0,
            synced_fps: 0,
            config,
            clock,
        }
    }

    /// Restarts the timing baseline and empties the history.
    ///
    /// Leaves the write position and both FPS values as they are; use
    /// [`FrameRateTracker::reset`] for a full restart.
    pub fn initialize(&mut self) {
        let now = self.clock.now_ms();
        self.last_update_ms = now;
        self.last_frame_ms = now;
        self.last_sync_ms = now;
        self.history.fill(None);
    }

    /// Returns the tracker to its freshly constructed state.
    pub fn reset(&mut self) {
        self.initialize();
        self.write_index = 0;
        self.current_fps = 0;
        self.synced_fps = 0;
        log::debug!("frame rate tracker reset");
    }

    /// Records one rendered frame.
    ///
    /// Call once per presented frame. A frame arriving in the same millisecond
    /// as the previous one records nothing but still moves the frame baseline.
    pub fn on_frame(&mut self) -> FrameSample {
        let now = self.clock.now_ms();
        let elapsed = now.saturating_sub(self.last_frame_ms);
        let mut recorded = None;

        if elapsed > 0 {
            // Truncates to 0 once a frame takes longer than a second.
            let instant = u32::try_from(1000 / elapsed).unwrap_or(u32::MAX);
            let slot = match (instant, self.config.slow_frames) {
                (0, SlowFramePolicy::Discard) => {
                    log::warn!("{elapsed}ms frame dropped from the fps average");
                    None
                }
                _ => Some(instant),
            };

            self.history[self.write_index] = slot;
            self.write_index = (self.write_index + 1) % self.history.len();

            if let Some(mean) = self.mean() {
                self.current_fps = mean;
            }
            self.last_update_ms = now;
            recorded = slot;

            log::trace!(
                "frame {elapsed}ms, instant {instant} fps, current {} fps",
                self.current_fps
            );
        }

        self.last_frame_ms = now;

        let synced = now.saturating_sub(self.last_sync_ms) >= self.sync_interval_ms;
        if synced {
            self.synced_fps = self.current_fps;
            self.last_sync_ms = now;
            log::debug!("synced fps latched at {}", self.synced_fps);
        }

        FrameSample {
            elapsed_ms: elapsed,
            recorded,
            synced,
        }
    }

    /// Integer mean of the recorded samples, `None` while the ring is empty.
    fn mean(&self) -> Option<u32> {
        let (sum, count) = self
            .history
            .iter()
            .flatten()
            .fold((0_u64, 0_u64), |(sum, count), &fps| (sum + u64::from(fps), count + 1));

        if count == 0 {
            return None;
        }
        Some(u32::try_from(sum / count).unwrap_or(u32::MAX))
    }

    /// Mean of the samples in the history ring.
    pub fn current_fps(&self) -> u32 {
        self.current_fps
    }

    /// Current FPS as of the last sync boundary.
    pub fn synced_fps(&self) -> u32 {
        self.synced_fps
    }

    /// Sample stored in ring slot `index`.
    ///
    /// Empty slots and out-of-range indices both read as 0.
    pub fn history_value(&self, index: isize) -> u32 {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.history.get(i).copied().flatten())
            .unwrap_or(0)
    }

    /// Ring slots in storage order, starting at slot 0.
    pub fn samples(&self) -> impl Iterator<Item = Option<u32>> + '_ {
        self.history.iter().copied()
    }

    /// Number of ring slots holding a sample.
    pub fn sample_count(&self) -> usize {
        self.history.iter().flatten().count()
    }

    pub fn history_capacity(&self) -> usize {
        self.history.len()
    }

    /// Timestamp of the last frame that produced a sample.
    pub fn last_update_ms(&self) -> u64 {
        self.last_update_ms
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}
