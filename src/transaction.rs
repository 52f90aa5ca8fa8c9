//! The core transaction data model shared by the aggregation engine and the
//! backend client.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::Error;

/// Whether a transaction adds money to or takes money from the user's
/// balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money earned.
    Income,
    /// Money spent.
    Expense,
}

impl TransactionKind {
    /// The wire label for this kind, as the backend stores it.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }
}

/// A persisted income or expense record.
///
/// The backend assigns `id` and `timestamp` at creation; the record is
/// immutable from the client's perspective after that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Opaque unique identifier assigned by the backend.
    pub id: String,
    /// The ID of the user that owns this transaction.
    pub user_id: String,
    /// The amount of money earned or spent. Always positive; the direction
    /// is carried by `kind`.
    pub amount: f64,
    /// Free-text category, e.g. "Groceries".
    pub category: String,
    /// Whether this is income or an expense.
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// When the backend persisted the transaction.
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

/// A transaction submission before the backend has persisted it.
///
/// The client assigns no ID and no timestamp; both come back on the
/// persisted [Transaction].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    /// The ID of the submitting user.
    pub user_id: String,
    /// The amount of money earned or spent.
    pub amount: f64,
    /// Free-text category.
    pub category: String,
    /// Whether this is income or an expense.
    #[serde(rename = "type")]
    pub kind: TransactionKind,
}

impl NewTransaction {
    /// Validate the form inputs and create a submission.
    ///
    /// Validation happens here, before any request is built, so an invalid
    /// submission never reaches the backend.
    ///
    /// # Errors
    /// - [Error::InvalidAmount] if `amount` is zero, negative or not finite,
    /// - [Error::EmptyCategory] if `category` is empty or whitespace.
    pub fn new(
        user_id: &str,
        amount: f64,
        category: &str,
        kind: TransactionKind,
    ) -> Result<Self, Error> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(Error::InvalidAmount(amount));
        }

        let category = category.trim();

        if category.is_empty() {
            return Err(Error::EmptyCategory);
        }

        Ok(Self {
            user_id: user_id.to_owned(),
            amount,
            category: category.to_owned(),
            kind,
        })
    }
}
