//! Drives the session timer and performs the termination side effects.

use tokio::sync::{mpsc, watch};

use crate::{
    auth::{Authenticator, SignOutOptions},
    clock::Clock,
};

use super::{
    activity::ActivityKind,
    timer::{SessionSnapshot, SessionTimer, TimerEvent},
};

/// Navigation collaborator: sends the user to the unauthenticated view.
pub trait Navigator {
    /// Show the unauthenticated (login) view.
    fn to_login(&self);
}

/// Requests sent to the session manager by the activity monitor and the
/// warning dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    /// A qualifying user interaction was observed.
    Activity(ActivityKind),
    /// The user dismissed the warning dialog, keeping the session.
    StayLoggedIn,
    /// The user asked to log out now.
    LogOut,
}

/// Clonable sender half of the session command channel.
///
/// The presentation layer holds one of these to wire the warning dialog's
/// buttons; the [ActivityMonitor](super::ActivityMonitor) holds another for
/// interaction signals.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    commands: mpsc::UnboundedSender<SessionCommand>,
}

impl SessionHandle {
    /// Report a user interaction.
    pub fn record_activity(&self, kind: ActivityKind) {
        let _ = self.commands.send(SessionCommand::Activity(kind));
    }

    /// Keep the session alive from the warning dialog.
    pub fn stay_logged_in(&self) {
        let _ = self.commands.send(SessionCommand::StayLoggedIn);
    }

    /// Log out immediately.
    pub fn log_out(&self) {
        let _ = self.commands.send(SessionCommand::LogOut);
    }

    #[cfg(test)]
    pub(crate) fn for_tests(commands: mpsc::UnboundedSender<SessionCommand>) -> Self {
        Self { commands }
    }
}

/// Owns the inactivity timer for one signed-in session and runs its event
/// loop.
///
/// Exactly one manager exists per session; when it expires, [run](Self::run)
/// performs the termination side effects and returns. A new sign-in gets a
/// new manager.
pub struct SessionManager<C: Clock, A: Authenticator, N: Navigator> {
    timer: SessionTimer<C>,
    authenticator: A,
    navigator: N,
    commands: mpsc::UnboundedReceiver<SessionCommand>,
    handle: SessionHandle,
    snapshots: watch::Sender<SessionSnapshot>,
}

impl<C: Clock, A: Authenticator, N: Navigator> SessionManager<C, A, N> {
    /// Create a manager around a freshly armed timer.
    pub fn new(timer: SessionTimer<C>, authenticator: A, navigator: N) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let (snapshots, _) = watch::channel(timer.snapshot());

        Self {
            timer,
            authenticator,
            navigator,
            commands: receiver,
            handle: SessionHandle { commands: sender },
            snapshots,
        }
    }

    /// A command sender for the presentation layer and activity monitor.
    pub fn handle(&self) -> SessionHandle {
        self.handle.clone()
    }

    /// Subscribe to state snapshots (phase and countdown) for rendering the
    /// warning dialog.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshots.subscribe()
    }

    /// Run the session until it expires.
    ///
    /// This is the single event loop for the session: commands and timer
    /// wakeups interleave here, so every firing re-checks the phase against
    /// the clock at execution time and a command that arrives in the same
    /// tick as a deadline cannot apply a stale reset.
    pub async fn run(mut self) {
        self.publish();

        while let Some(wakeup) = self.timer.until_next_wakeup() {
            tokio::select! {
                command = self.commands.recv() => {
                    match command {
                        Some(SessionCommand::Activity(kind)) => {
                            tracing::trace!("activity signal: {kind:?}");
                            self.timer.record_activity();
                        }
                        Some(SessionCommand::StayLoggedIn) => self.timer.stay_logged_in(),
                        Some(SessionCommand::LogOut) => {
                            if self.timer.force_logout() == Some(TimerEvent::Expired) {
                                self.terminate().await;
                                return;
                            }
                        }
                        // The manager keeps its own handle, so the channel
                        // cannot close while the loop runs.
                        None => {}
                    }
                    self.publish();
                }
                _ = tokio::time::sleep(wakeup) => {
                    let event = self.timer.poll();
                    self.publish();

                    if event == Some(TimerEvent::Expired) {
                        self.terminate().await;
                        return;
                    }
                }
            }
        }
    }

    /// The termination side effects: provider sign-out, then navigation to
    /// the unauthenticated view.
    ///
    /// The timer's expiry latch guarantees this runs at most once per
    /// session. A provider failure is logged and superseded by local
    /// teardown: the user lands on the login view either way.
    async fn terminate(&mut self) {
        if let Err(error) = self
            .authenticator
            .sign_out(SignOutOptions { global: true })
            .await
        {
            tracing::error!("sign out failed during session termination: {error}");
        }

        self.navigator.to_login();
        self.publish();
    }

    fn publish(&self) {
        self.snapshots.send_replace(self.timer.snapshot());
    }
}
