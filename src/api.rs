//! HTTP client for the transactions backend.

use reqwest::header::AUTHORIZATION;
use serde::de::DeserializeOwned;

use crate::{
    Error,
    auth::AuthSession,
    transaction::{NewTransaction, Transaction},
};

/// Client for the managed transactions CRUD endpoint.
#[derive(Debug, Clone)]
pub struct TransactionsClient {
    http: reqwest::Client,
    base_url: String,
}

impl TransactionsClient {
    /// Create a client for the API rooted at `base_url`,
    /// e.g. `https://api.example.com/dev`.
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    /// Submit a transaction for persistence.
    ///
    /// The backend assigns the ID and timestamp and returns the persisted
    /// record. Nothing should be added to displayed state until this
    /// returns `Ok`: a failed submission is surfaced, never applied
    /// optimistically.
    ///
    /// # Errors
    /// - [Error::Network] if the request could not be sent or the response
    ///   body could not be read,
    /// - [Error::Backend] carrying the backend's error text on a
    ///   non-success status.
    pub async fn create(
        &self,
        transaction: &NewTransaction,
        session: &AuthSession,
    ) -> Result<Transaction, Error> {
        let response = self
            .http
            .post(format!("{}/transactions", self.base_url))
            .header(AUTHORIZATION, &session.id_token)
            .json(transaction)
            .send()
            .await
            .map_err(|error| Error::Network(error.to_string()))?;

        Self::parse_response(response).await
    }

    /// Fetch every transaction owned by `user_id`.
    ///
    /// # Errors
    /// Same as [TransactionsClient::create].
    pub async fn list(
        &self,
        user_id: &str,
        session: &AuthSession,
    ) -> Result<Vec<Transaction>, Error> {
        let response = self
            .http
            .get(format!("{}/transactions", self.base_url))
            .query(&[("userId", user_id)])
            .header(AUTHORIZATION, &session.id_token)
            .send()
            .await
            .map_err(|error| Error::Network(error.to_string()))?;

        Self::parse_response(response).await
    }

    async fn parse_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, Error> {
        let status = response.status();

        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "network response was not ok".to_owned());
            tracing::error!("transactions backend returned {status}: {message}");

            return Err(Error::Backend {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|error| Error::Network(error.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::TransactionsClient;

    #[test]
    fn new_trims_trailing_slash_from_base_url() {
        let client = TransactionsClient::new("https://api.example.com/dev/");

        assert_eq!(client.base_url, "https://api.example.com/dev");
    }
}
