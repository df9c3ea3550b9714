use std::cell::Cell;
use std::rc::Rc;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

/// Host monotonic time source, in milliseconds since the host's time origin.
pub trait MonotonicClock {
    fn now_ms(&self) -> f64;
}

/// Monotonic clock backed by `std::time::Instant`.
///
/// Reports milliseconds elapsed since the clock was created, which plays the
/// role of the host's time origin.
#[derive(Debug, Clone, Copy)]
pub struct InstantClock {
    origin: Instant,
}

impl InstantClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for InstantClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock for InstantClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// The underlying time source a [`Clock`] falls back to when not overridden.
#[derive(Clone)]
pub enum BaseClock {
    /// Host monotonic clock.
    Monotonic(Rc<dyn MonotonicClock>),
    /// Wall-clock milliseconds since the UNIX epoch. Not guaranteed monotonic.
    WallClock,
}

impl BaseClock {
    pub fn now(&self) -> f64 {
        match self {
            BaseClock::Monotonic(clock) => clock.now_ms(),
            BaseClock::WallClock => wall_clock_ms(),
        }
    }

    pub fn is_monotonic(&self) -> bool {
        matches!(self, BaseClock::Monotonic(_))
    }
}

impl std::fmt::Debug for BaseClock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BaseClock::Monotonic(_) => f.write_str("Monotonic"),
            BaseClock::WallClock => f.write_str("WallClock"),
        }
    }
}

fn wall_clock_ms() -> f64 {
    // A system clock set before 1970 reads as the epoch.
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs_f64()
        * 1000.0
}

/// Swappable millisecond clock.
///
/// Exactly one source is active at a time: a fixed override installed by
/// [`Clock::set_now`], or the base clock.
#[derive(Debug)]
pub struct Clock {
    base: BaseClock,
    fixed: Cell<Option<f64>>,
}

impl Clock {
    pub fn new(base: BaseClock) -> Self {
        Self { base, fixed: Cell::new(None) }
    }

    /// Current time in milliseconds from the active source.
    #[inline]
    pub fn now(&self) -> f64 {
        match self.fixed.get() {
            Some(t) => t,
            None => self.base.now(),
        }
    }

    /// Pins `now()` to `time` until [`Clock::restore_now`].
    pub fn set_now(&self, time: f64) {
        self.fixed.set(Some(time));
    }

    /// Reinstates the base clock.
    pub fn restore_now(&self) {
        self.fixed.set(None);
    }

    pub fn is_overridden(&self) -> bool {
        self.fixed.get().is_some()
    }

    pub fn base(&self) -> &BaseClock {
        &self.base
    }
}
