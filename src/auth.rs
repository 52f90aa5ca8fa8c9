//! The authentication collaborator seam.
//!
//! The hosted identity provider lives outside this crate; everything here
//! depends only on this contract. The session manager tolerates a failing
//! [Authenticator::sign_out]: local teardown and navigation to the login
//! view proceed regardless.

use crate::Error;

/// The signed-in user's identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    /// Opaque stable identifier; the owner ID on transactions.
    pub user_id: String,
    /// The login the user signed in with, for display.
    pub login_id: String,
}

/// A live auth session holding credentials for backend calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    /// The bearer token sent in the `Authorization` header of
    /// transactions-backend requests.
    pub id_token: String,
}

/// Options for [Authenticator::sign_out].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SignOutOptions {
    /// Invalidate every session for this user with the provider, not just
    /// the local one.
    pub global: bool,
}

/// The hosted identity provider.
#[allow(async_fn_in_trait)]
pub trait Authenticator {
    /// The currently signed-in user.
    ///
    /// # Errors
    /// [Error::NotAuthenticated] when no valid session exists. Callers
    /// treat this as a redirect to the login view, not as a failure.
    async fn get_current_user(&self) -> Result<AuthUser, Error>;

    /// Begin redirect-based sign-in with the provider.
    ///
    /// # Errors
    /// [Error::Auth] on provider failure; surfaced to the user with the
    /// option to retry.
    async fn sign_in_with_redirect(&self) -> Result<(), Error>;

    /// Invalidate the session with the provider.
    ///
    /// # Errors
    /// [Error::SignOut] on provider failure. Session termination logs and
    /// tolerates this error.
    async fn sign_out(&self, options: SignOutOptions) -> Result<(), Error>;

    /// Credentials for calling the transactions backend.
    ///
    /// # Errors
    /// [Error::NoSession] when no token is available.
    async fn fetch_auth_session(&self) -> Result<AuthSession, Error>;
}

/// Whether a signed-in user exists, for guarding protected views.
pub async fn is_authenticated<A: Authenticator>(authenticator: &A) -> bool {
    authenticator.get_current_user().await.is_ok()
}

#[cfg(test)]
mod tests {
    use crate::Error;

    use super::{AuthSession, AuthUser, Authenticator, SignOutOptions, is_authenticated};

    struct FakeAuthenticator {
        signed_in: bool,
    }

    impl Authenticator for FakeAuthenticator {
        async fn get_current_user(&self) -> Result<AuthUser, Error> {
            if self.signed_in {
                Ok(AuthUser {
                    user_id: "test-user-123".to_owned(),
                    login_id: "test@example.com".to_owned(),
                })
            } else {
                Err(Error::NotAuthenticated)
            }
        }

        async fn sign_in_with_redirect(&self) -> Result<(), Error> {
            Ok(())
        }

        async fn sign_out(&self, _options: SignOutOptions) -> Result<(), Error> {
            Ok(())
        }

        async fn fetch_auth_session(&self) -> Result<AuthSession, Error> {
            if self.signed_in {
                Ok(AuthSession {
                    id_token: "token".to_owned(),
                })
            } else {
                Err(Error::NoSession)
            }
        }
    }

    #[tokio::test]
    async fn is_authenticated_reflects_provider_state() {
        assert!(is_authenticated(&FakeAuthenticator { signed_in: true }).await);
        assert!(!is_authenticated(&FakeAuthenticator { signed_in: false }).await);
    }
}
