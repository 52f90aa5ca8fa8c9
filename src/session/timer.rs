//! The inactivity-timeout state machine.
//!
//! Tracks one session's journey from [SessionPhase::Active] through
//! [SessionPhase::Warning] to [SessionPhase::Expired]. The machine itself is
//! synchronous and side-effect free: it owns the phase and the two deadlines
//! and nothing else. The [manager](super::manager) schedules its wakeups and
//! performs the termination side effects.

use time::{Duration, OffsetDateTime};

use crate::clock::Clock;

/// Timing configuration for the session lifecycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionConfig {
    /// The total inactivity allowance before forced logout.
    pub timeout: Duration,
}

impl SessionConfig {
    /// Inactivity span after which the warning appears: 80% of the timeout.
    pub fn warning_offset(&self) -> Duration {
        Duration::seconds_f64(self.timeout.as_seconds_f64() * 0.8)
    }

    /// Span from the warning appearing to forced logout: the remaining 20%.
    pub fn countdown(&self) -> Duration {
        self.timeout - self.warning_offset()
    }
}

impl Default for SessionConfig {
    /// Ten minutes of inactivity, warning at the eight-minute mark.
    fn default() -> Self {
        Self {
            timeout: Duration::minutes(10),
        }
    }
}

/// Where the session is in its inactivity lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// The user is considered active; qualifying activity re-arms the
    /// deadlines.
    Active,
    /// The warning dialog is up and the logout countdown is running.
    /// Activity signals are ignored in this phase.
    Warning,
    /// The session has been terminated. Terminal for this session instance.
    Expired,
}

/// A read-only view of the timer for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSnapshot {
    /// The current phase.
    pub phase: SessionPhase,
    /// Whole seconds left on the logout countdown. Zero outside
    /// [SessionPhase::Warning].
    pub seconds_remaining: u64,
}

/// A transition fired by [SessionTimer::poll] or [SessionTimer::force_logout].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// The warning deadline passed; the warning dialog should be shown.
    WarningDue,
    /// The logout deadline passed or logout was forced; the session must
    /// terminate. Reported at most once per session instance.
    Expired,
}

/// The inactivity state machine for one signed-in session.
///
/// Deadlines are wall-clock instants read from the injected [Clock], so
/// timing survives process suspension (but not system clock changes), and
/// tests drive the machine with a manual clock.
#[derive(Debug)]
pub struct SessionTimer<C: Clock> {
    clock: C,
    config: SessionConfig,
    phase: SessionPhase,
    warning_deadline: OffsetDateTime,
    logout_deadline: OffsetDateTime,
    expired_reported: bool,
}

impl<C: Clock> SessionTimer<C> {
    /// Create the machine in [SessionPhase::Active] with both deadlines
    /// armed from the current instant.
    pub fn new(clock: C, config: SessionConfig) -> Self {
        let now = clock.now();

        let timer = Self {
            phase: SessionPhase::Active,
            warning_deadline: now + config.warning_offset(),
            logout_deadline: now + config.timeout,
            expired_reported: false,
            clock,
            config,
        };
        tracing::debug!(
            "session timer armed: warning at {}, logout at {}",
            timer.warning_deadline,
            timer.logout_deadline
        );

        timer
    }

    /// A qualifying user interaction. Re-arms both deadlines from now.
    ///
    /// Ignored outside [SessionPhase::Active]: once the warning is showing,
    /// only an explicit [SessionTimer::stay_logged_in] keeps the session
    /// alive, so background signals cannot silently dismiss the warning.
    /// The phase guard lives here, inside the machine, not in the activity
    /// monitor.
    pub fn record_activity(&mut self) {
        if self.phase != SessionPhase::Active {
            tracing::debug!("activity ignored in phase {:?}", self.phase);
            return;
        }

        self.arm_deadlines();
    }

    /// The user chose to stay logged in from the warning dialog.
    ///
    /// A full reset: both deadlines are re-armed from now, never a resumed
    /// countdown. No-op outside [SessionPhase::Warning].
    pub fn stay_logged_in(&mut self) {
        if self.phase != SessionPhase::Warning {
            return;
        }

        self.phase = SessionPhase::Active;
        self.arm_deadlines();
        tracing::info!("user chose to stay logged in, session timer reset");
    }

    /// Terminate the session immediately, from any phase.
    ///
    /// Returns [TimerEvent::Expired] the first time only; the caller runs
    /// the termination side effects on that event, so repeated or
    /// concurrent logout requests cannot double-invoke them.
    pub fn force_logout(&mut self) -> Option<TimerEvent> {
        self.expire()
    }

    /// Fire any transition whose deadline has passed.
    ///
    /// Deadlines are compared against the clock at the moment of the call.
    /// That comparison is also the cancellation rule for stale wakeups: a
    /// wakeup armed in a phase that has since been left finds either a
    /// re-armed (later) deadline or an advanced phase, and does nothing.
    pub fn poll(&mut self) -> Option<TimerEvent> {
        let now = self.clock.now();

        match self.phase {
            SessionPhase::Active if now >= self.warning_deadline => {
                self.phase = SessionPhase::Warning;
                tracing::info!(
                    "inactivity warning due, logging out in {} seconds",
                    self.seconds_remaining()
                );
                Some(TimerEvent::WarningDue)
            }
            SessionPhase::Warning if now >= self.logout_deadline => self.expire(),
            _ => None,
        }
    }

    /// Whole seconds until forced logout, `ceil((logout - now) / 1s)`
    /// clamped to zero. Only meaningful while the warning is showing.
    pub fn seconds_remaining(&self) -> u64 {
        if self.phase != SessionPhase::Warning {
            return 0;
        }

        let left = self.logout_deadline - self.clock.now();
        if left.is_negative() {
            return 0;
        }

        let whole = left.whole_seconds() as u64;
        if left.subsec_nanoseconds() > 0 {
            whole + 1
        } else {
            whole
        }
    }

    /// The current phase.
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// A read-only view for the presentation layer.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            phase: self.phase,
            seconds_remaining: self.seconds_remaining(),
        }
    }

    /// How long the driver may sleep before the machine next needs
    /// servicing: the warning deadline while `Active`, the sooner of the
    /// logout deadline and the next one-second countdown tick while
    /// `Warning`, and `None` once `Expired`.
    pub fn until_next_wakeup(&self) -> Option<std::time::Duration> {
        let now = self.clock.now();

        let until = match self.phase {
            SessionPhase::Active => self.warning_deadline - now,
            SessionPhase::Warning => (self.logout_deadline - now).min(Duration::SECOND),
            SessionPhase::Expired => return None,
        };

        Some(until.max(Duration::ZERO).unsigned_abs())
    }

    fn arm_deadlines(&mut self) {
        let now = self.clock.now();
        self.warning_deadline = now + self.config.warning_offset();
        self.logout_deadline = now + self.config.timeout;
        tracing::debug!(
            "session deadlines re-armed: warning at {}, logout at {}",
            self.warning_deadline,
            self.logout_deadline
        );
    }

    fn expire(&mut self) -> Option<TimerEvent> {
        self.phase = SessionPhase::Expired;

        if self.expired_reported {
            return None;
        }
        self.expired_reported = true;
        tracing::info!("session expired");

        Some(TimerEvent::Expired)
    }
}
