//! Wall-clock abstraction so session timing logic is testable without real
//! delays.

use time::OffsetDateTime;

/// A source of the current wall-clock time.
///
/// Session deadlines are measured against wall-clock instants rather than
/// monotonic ticks so they survive the host process being suspended and
/// resumed. They are not resilient to system clock changes.
pub trait Clock {
    /// The current instant.
    fn now(&self) -> OffsetDateTime;
}

/// The real system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}
