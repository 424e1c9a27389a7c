use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use fpsmeter::logging::{LoggingConfig, init_logging};
use fpsmeter::{Cadence, FrameRateTracker, SystemClock, TrackerConfig};

/// A stretch of frames paced at one rate.
struct Phase {
    name: &'static str,
    cadence: Cadence,
    duration_ms: u64,
}

const PHASES: [Phase; 4] = [
    Phase { name: "steady 60", cadence: Cadence::from_fps(60), duration_ms: 6_000 },
    Phase { name: "steady 30", cadence: Cadence::from_fps(30), duration_ms: 3_000 },
    Phase { name: "stall", cadence: Cadence::from_period_ms(1_000), duration_ms: 1_000 },
    Phase { name: "recovery 60", cadence: Cadence::from_fps(60), duration_ms: 6_000 },
];

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = TrackerConfig::from_env().context("failed to read tracker configuration")?;
    log::info!(
        "tracking {} samples, syncing every {}ms, slow frames: {:?}",
        config.history_capacity,
        config.sync_interval_ms(),
        config.slow_frames
    );

    let mut tracker = FrameRateTracker::with_config(SystemClock::new(), config)
        .context("failed to create frame rate tracker")?;

    for phase in &PHASES {
        run_phase(&mut tracker, phase);
    }

    Ok(())
}

/// Sleeps until each frame is due, then reports it to the tracker.
fn run_phase(tracker: &mut FrameRateTracker<SystemClock>, phase: &Phase) {
    log::info!("phase '{}' for {}ms", phase.name, phase.duration_ms);

    let start = Instant::now();
    for n in 1..=phase.cadence.frames_in(phase.duration_ms) {
        let due = start + Duration::from_millis(phase.cadence.offset_ms(n));
        if let Some(wait) = due.checked_duration_since(Instant::now()) {
            thread::sleep(wait);
        }

        if tracker.on_frame().synced {
            log::info!(
                "synced fps {} (current {})",
                tracker.synced_fps(),
                tracker.current_fps()
            );
        }
    }

    log::info!(
        "phase '{}' done: current {} fps, synced {} fps",
        phase.name,
        tracker.current_fps(),
        tracker.synced_fps()
    );
}
