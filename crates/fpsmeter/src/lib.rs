//! Rolling frames-per-second estimation.
//!
//! A [`FrameRateTracker`] takes one call per rendered frame, keeps a ring of
//! instantaneous FPS samples and reports their mean. A slower "synced" value
//! latches the mean at most once per sync interval (5 s by default), for
//! displays that should not flicker every frame.
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`tracker`] | `FrameRateTracker`, `FrameSample` |
//! | [`config`] | `TrackerConfig`, `SlowFramePolicy`, `ConfigError` |
//! | [`time`] | `MonotonicClock`, `SystemClock`, `ManualClock` |
//! | [`sim`] | `Cadence`, `FrameSimulator` |
//! | [`logging`] | `init_logging` |
//!
//! # Quick start
//!
//! ```rust
//! use fpsmeter::{FrameRateTracker, ManualClock};
//!
//! let clock = ManualClock::new(0);
//! let mut tracker = FrameRateTracker::with_clock(clock.clone());
//!
//! for _ in 0..60 {
//!     clock.advance(20);
//!     tracker.on_frame();
//! }
//! assert_eq!(tracker.current_fps(), 50);
//! ```

pub mod config;
pub mod logging;
pub mod sim;
pub mod time;
pub mod tracker;

pub use config::{ConfigError, SlowFramePolicy, TrackerConfig};
pub use sim::{Cadence, FrameSimulator};
pub use time::{ManualClock, MonotonicClock, SystemClock};
pub use tracker::{FrameRateTracker, FrameSample};
