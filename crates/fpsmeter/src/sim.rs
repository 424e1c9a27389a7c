//! Deterministic frame cadence simulation.
//!
//! Drives a [`FrameRateTracker`] on a [`ManualClock`] at a fixed frame rate,
//! so frame pacing scenarios can be replayed without sleeping.

use crate::time::{ManualClock, MonotonicClock};
use crate::tracker::{FrameRateTracker, FrameSample};

/// A fixed frame rate: `frames` frames every `millis` milliseconds.
///
/// Frame `n` of a run lands at `floor(n * millis / frames)` ms after the run
/// starts, so fractional periods like 16.67 ms do not drift.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Cadence {
    millis: u64,
    frames: u64,
}

impl Cadence {
    /// `fps` frames per second. Zero produces no frames.
    pub const fn from_fps(fps: u32) -> Self {
        Self {
            millis: 1000,
            frames: fps as u64,
        }
    }

    /// One frame every `period_ms`. Zero produces no frames.
    pub const fn from_period_ms(period_ms: u64) -> Self {
        Self {
            millis: period_ms,
            frames: 1,
        }
    }

    pub const fn is_empty(&self) -> bool {
        self.millis == 0 || self.frames == 0
    }

    /// Offset of frame `n` from the start of a run, in milliseconds.
    pub fn offset_ms(&self, n: u64) -> u64 {
        if self.is_empty() {
            return 0;
        }
        let offset = u128::from(n) * u128::from(self.millis) / u128::from(self.frames);
        u64::try_from(offset).unwrap_or(u64::MAX)
    }

    /// Number of frames a run of `duration_ms` produces.
    pub fn frames_in(&self, duration_ms: u64) -> u64 {
        if self.is_empty() {
            return 0;
        }
        let frames = u128::from(duration_ms) * u128::from(self.frames) / u128::from(self.millis);
        u64::try_from(frames).unwrap_or(u64::MAX)
    }
}

/// Totals from one [`FrameSimulator::run`].
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct RunSummary {
    pub frames: u64,
    /// How many frames latched a synced FPS.
    pub syncs: u32,
}

/// Feeds simulated frames to a tracker.
#[derive(Debug)]
pub struct FrameSimulator {
    tracker: FrameRateTracker<ManualClock>,
    clock: ManualClock,
}

impl FrameSimulator {
    /// Wraps `tracker`, advancing the clock it was built with.
    pub fn new(tracker: FrameRateTracker<ManualClock>) -> Self {
        let clock = tracker.clock().clone();
        Self { tracker, clock }
    }

    /// Runs `cadence` for `duration_ms`, one `on_frame` per simulated frame.
    pub fn run(&mut self, cadence: Cadence, duration_ms: u64) -> RunSummary {
        let start = self.clock.now_ms();
        let mut summary = RunSummary::default();

        for n in 1..=cadence.frames_in(duration_ms) {
            self.clock.set(start.saturating_add(cadence.offset_ms(n)));
            let sample = self.tracker.on_frame();
            summary.frames += 1;
            if sample.synced {
                summary.syncs += 1;
            }
        }

        log::debug!(
            "simulated {} frames over {duration_ms}ms, current {} fps",
            summary.frames,
            self.tracker.current_fps()
        );
        summary
    }

    /// Delivers a single frame `ms` after the previous one.
    pub fn frame_after(&mut self, ms: u64) -> FrameSample {
        self.clock.advance(ms);
        self.tracker.on_frame()
    }

    pub fn tracker(&self) -> &FrameRateTracker<ManualClock> {
        &self.tracker
    }

    pub fn tracker_mut(&mut self) -> &mut FrameRateTracker<ManualClock> {
        &mut self.tracker
    }

    pub fn into_tracker(self) -> FrameRateTracker<ManualClock> {
        self.tracker
    }
}

impl Default for FrameSimulator {
    fn default() -> Self {
        Self::new(FrameRateTracker::with_clock(ManualClock::new(0)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sim() -> FrameSimulator {
        FrameSimulator::default()
    }

    // ── Cadence ───────────────────────────────────────────────────────────

    #[test]
    fn fractional_period_does_not_drift() {
        let c = Cadence::from_fps(60);
        let offsets: Vec<_> = (1..=6).map(|n| c.offset_ms(n)).collect();
        assert_eq!(offsets, vec![16, 33, 50, 66, 83, 100]);
        assert_eq!(c.offset_ms(60), 1000);
    }

    #[test]
    fn frames_in_duration() {
        assert_eq!(Cadence::from_fps(60).frames_in(2000), 120);
        assert_eq!(Cadence::from_fps(144).frames_in(1000), 144);
        assert_eq!(Cadence::from_period_ms(200).frames_in(1000), 5);
        assert_eq!(Cadence::from_period_ms(300).frames_in(1000), 3);
    }

    #[test]
    fn zero_cadence_is_empty() {
        assert!(Cadence::from_fps(0).is_empty());
        assert!(Cadence::from_period_ms(0).is_empty());
        assert_eq!(Cadence::from_fps(0).frames_in(10_000), 0);

        let mut s = sim();
        assert_eq!(s.run(Cadence::from_fps(0), 1000).frames, 0);
        assert_eq!(s.tracker().current_fps(), 0);
    }

    // ── steady rates ──────────────────────────────────────────────────────

    #[test]
    fn steady_60_fps() {
        let mut s = sim();
        let run = s.run(Cadence::from_fps(60), 2000);
        assert_eq!(run.frames, 120);
        // 16/17/17 ms frames average to 59.33.
        assert_eq!(s.tracker().current_fps(), 59);
    }

    #[test]
    fn steady_30_fps() {
        let mut s = sim();
        s.run(Cadence::from_fps(30), 2000);
        assert_eq!(s.tracker().current_fps(), 29);
    }

    #[test]
    fn steady_144_fps() {
        let mut s = sim();
        s.run(Cadence::from_fps(144), 1000);
        let fps = s.tracker().current_fps();
        assert!((140..=148).contains(&fps), "got {fps}");
    }

    #[test]
    fn very_high_fps() {
        let mut s = sim();
        s.run(Cadence::from_period_ms(1), 200);
        assert_eq!(s.tracker().current_fps(), 1000);
    }

    #[test]
    fn very_low_fps() {
        let mut s = sim();
        s.run(Cadence::from_period_ms(200), 2000);
        assert_eq!(s.tracker().current_fps(), 5);
    }

    #[test]
    fn alternating_frame_times_average_out() {
        let mut s = sim();
        for i in 0..100 {
            s.frame_after(if i % 2 == 0 { 16 } else { 33 });
        }
        // (62 + 30) / 2
        assert_eq!(s.tracker().current_fps(), 46);
    }

    // ── changing rates ────────────────────────────────────────────────────

    #[test]
    fn averaging_lags_a_rate_drop() {
        let mut s = sim();
        s.run(Cadence::from_fps(60), 1000);
        let fps_60 = s.tracker().current_fps();

        s.run(Cadence::from_fps(30), 1000);
        let after = s.tracker().current_fps();
        assert!(after < fps_60);
        assert!(after > 30, "half the ring still holds 60 fps samples, got {after}");
    }

    #[test]
    fn recovers_after_stall() {
        let mut s = sim();
        s.run(Cadence::from_fps(60), 1000);
        assert_eq!(s.tracker().current_fps(), 59);

        let stall = s.frame_after(1000);
        assert_eq!(stall.recorded, Some(1));
        assert!(s.tracker().current_fps() < 59);

        s.run(Cadence::from_fps(60), 2000);
        assert_eq!(s.tracker().current_fps(), 59);
    }

    #[test]
    fn long_running_stability() {
        let mut s = sim();
        let run = s.run(Cadence::from_fps(60), 10_000);
        assert_eq!(run.frames, 600);
        assert_eq!(run.syncs, 2);
        assert_eq!(s.tracker().current_fps(), 59);
        assert_eq!(s.tracker().synced_fps(), 59);
    }

    // ── sync ──────────────────────────────────────────────────────────────

    #[test]
    fn synced_fps_updates_after_five_seconds() {
        let mut s = sim();
        let first = s.run(Cadence::from_fps(60), 2000);
        assert_eq!(first.syncs, 0);
        assert_eq!(s.tracker().synced_fps(), 0);

        let second = s.run(Cadence::from_fps(60), 4000);
        assert_eq!(second.syncs, 1);
        assert_eq!(s.tracker().synced_fps(), 59);
    }

    #[test]
    fn multiple_sync_updates_follow_the_rate() {
        let mut s = sim();
        s.run(Cadence::from_fps(30), 5500);
        assert_eq!(s.tracker().synced_fps(), 29);

        s.run(Cadence::from_fps(60), 5000);
        assert_eq!(s.tracker().synced_fps(), 59);
    }

    // ── reset ─────────────────────────────────────────────────────────────

    #[test]
    fn reset_after_simulation() {
        let mut s = sim();
        s.run(Cadence::from_fps(120), 6000);
        assert!(s.tracker().current_fps() > 0);
        assert!(s.tracker().synced_fps() > 0);

        s.tracker_mut().reset();
        assert_eq!(s.tracker().current_fps(), 0);
        assert_eq!(s.tracker().synced_fps(), 0);
        assert_eq!(s.tracker().sample_count(), 0);
    }
}
