//! Forwards environment interaction signals into the session command
//! channel.

use super::manager::SessionHandle;

/// The interaction signal kinds that count as user activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityKind {
    /// A pointer button was pressed.
    PointerPress,
    /// The pointer moved.
    PointerMove,
    /// A key was pressed.
    KeyPress,
    /// The page scrolled.
    Scroll,
    /// A touch began.
    TouchStart,
    /// A click completed.
    Click,
}

impl ActivityKind {
    /// Every signal kind the monitor listens for.
    pub const ALL: [ActivityKind; 6] = [
        ActivityKind::PointerPress,
        ActivityKind::PointerMove,
        ActivityKind::KeyPress,
        ActivityKind::Scroll,
        ActivityKind::TouchStart,
        ActivityKind::Click,
    ];
}

/// A lifecycle-scoped subscription forwarding activity signals to the
/// session manager.
///
/// The host attaches it once per mounted session with
/// [start](ActivityMonitor::start) and detaches it with
/// [stop](ActivityMonitor::stop) on teardown; signals outside that window
/// are dropped, so a remount can never leave a stale subscription feeding
/// the timer. Warning-phase suppression is deliberately not handled here:
/// the monitor forwards every signal and the guard lives in
/// [SessionTimer::record_activity](super::SessionTimer::record_activity),
/// exactly once, next to the phase it protects.
#[derive(Debug)]
pub struct ActivityMonitor {
    session: SessionHandle,
    attached: bool,
}

impl ActivityMonitor {
    /// Create a detached monitor that will forward to `session`.
    pub fn new(session: SessionHandle) -> Self {
        Self {
            session,
            attached: false,
        }
    }

    /// Attach the monitor. Repeat calls are no-ops, so a double mount
    /// cannot double-forward signals.
    pub fn start(&mut self) {
        if self.attached {
            tracing::warn!("activity monitor already started");
            return;
        }

        self.attached = true;
        tracing::debug!("activity monitor attached");
    }

    /// Forward one interaction signal to the session manager. Dropped
    /// unless the monitor is attached.
    pub fn signal(&self, kind: ActivityKind) {
        if !self.attached {
            return;
        }

        self.session.record_activity(kind);
    }

    /// Detach the monitor; further signals are dropped. Safe to call
    /// repeatedly.
    pub fn stop(&mut self) {
        if !self.attached {
            return;
        }

        self.attached = false;
        tracing::debug!("activity monitor detached");
    }
}
