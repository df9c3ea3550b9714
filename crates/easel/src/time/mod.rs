//! Time subsystem.
//!
//! Millisecond clock with a test-time override:
//! - the base source is the host monotonic clock, or wall-clock time when the
//!   host has none
//! - `set_now` pins the clock to a constant until `restore_now`

mod clock;

pub use clock::{BaseClock, Clock, InstantClock, MonotonicClock};
