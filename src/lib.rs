//! Trackit is a personal finance tracker: users sign in through a hosted
//! identity provider, record income and expense transactions, and review
//! their spending as charts and a sortable table.
//!
//! This crate is the application core behind that UI: the inactivity
//! session lifecycle (warning countdown and forced logout), activity
//! monitoring, window-close credential cleanup, the pure transaction
//! aggregation engine, and the seams for the external collaborators
//! (identity provider and transactions backend). Rendering, routing and
//! form handling belong to the embedding host.

#![warn(missing_docs)]

mod aggregation;
mod api;
mod auth;
mod clock;
mod logging;
mod session;
mod transaction;

pub use aggregation::{
    ALL_MONTHS, CategoryTotal, Granularity, PeriodTotals, SortDirection, SortKey, category_totals,
    distinct_months, filter_by_month, group_by_period, sort_transactions,
};
pub use api::TransactionsClient;
pub use auth::{AuthSession, AuthUser, Authenticator, SignOutOptions, is_authenticated};
pub use clock::{Clock, SystemClock};
pub use logging::init_logging;
pub use session::{
    ActivityKind, ActivityMonitor, CredentialStore, Navigator, SessionBoundaryHandler,
    SessionCommand, SessionConfig, SessionHandle, SessionManager, SessionPhase, SessionSnapshot,
    SessionTimer, TimerEvent, purge_local_credentials,
};
pub use transaction::{NewTransaction, Transaction, TransactionKind};

/// The errors that may occur in the application.
///
/// None of these are fatal: every failure path resolves to either an inline
/// message in the UI or a forced navigation to the unauthenticated view.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// No user is currently signed in.
    ///
    /// Callers should treat this as a redirect to the login view rather
    /// than surfacing it as an error.
    #[error("no user is currently signed in")]
    NotAuthenticated,

    /// The identity provider rejected or failed a sign-in attempt.
    #[error("sign in failed: {0}")]
    Auth(String),

    /// The identity provider rejected or failed a sign-out attempt.
    ///
    /// Session termination tolerates this error: local teardown and
    /// navigation to the login view proceed regardless.
    #[error("sign out failed: {0}")]
    SignOut(String),

    /// No auth session is available to supply a bearer token for API calls.
    #[error("no auth session is available")]
    NoSession,

    /// A transaction was submitted with a zero, negative or non-finite
    /// amount. Caught before any request is sent.
    #[error("{0} is not a valid amount, amounts must be greater than zero")]
    InvalidAmount(f64),

    /// A transaction was submitted with an empty category. Caught before
    /// any request is sent.
    #[error("the transaction category cannot be empty")]
    EmptyCategory,

    /// The transactions backend could not be reached, or its response could
    /// not be read.
    #[error("could not reach the transactions backend: {0}")]
    Network(String),

    /// The transactions backend returned a non-success status.
    ///
    /// `message` carries the backend's error text when it sent one, so the
    /// UI can show it to the user.
    #[error("the transactions backend returned status {status}: {message}")]
    Backend {
        /// The HTTP status code of the response.
        status: u16,
        /// The textual error body, if any.
        message: String,
    },
}
