//! Time subsystem.
//!
//! Supplies monotonic millisecond readings to the tracker without coupling it
//! to a platform timer. Intended usage:
//! - [`SystemClock`] in a real render loop
//! - [`ManualClock`] in tests and simulations, advanced explicitly per frame

mod clock;

pub use clock::{ManualClock, MonotonicClock, SystemClock};
