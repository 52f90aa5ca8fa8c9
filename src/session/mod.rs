//! The session lifecycle: inactivity timing, activity signals, termination
//! side effects, and window-close credential cleanup.
//!
//! One [SessionManager] exists per signed-in session. It drives a
//! [SessionTimer] through `Active -> Warning -> Expired`, fed by an
//! [ActivityMonitor] and the warning dialog's buttons, and publishes
//! [SessionSnapshot] values for the presentation layer to render.

mod activity;
mod boundary;
mod manager;
mod timer;

pub use activity::{ActivityKind, ActivityMonitor};
pub use boundary::{CredentialStore, SessionBoundaryHandler, purge_local_credentials};
pub use manager::{Navigator, SessionCommand, SessionHandle, SessionManager};
pub use timer::{SessionConfig, SessionPhase, SessionSnapshot, SessionTimer, TimerEvent};
